//! Scannable marker images identifying a sheet.

use crate::error::{Result, SheetError};
use crate::sheet::file_stem;
use image::{DynamicImage, Luma};
use qrcode::QrCode;
use std::path::PathBuf;
use tracing::debug;

/// Turns an opaque sheet identifier into an image placed in the header.
pub trait MarkerEncoder {
    fn encode(&self, identifier: &str) -> Result<DynamicImage>;
}

/// QR code encoder. When an output directory is set, every encoded marker
/// is also written as `<dir>/<identifier>.png`.
#[derive(Debug, Clone, Default)]
pub struct QrMarkerEncoder {
    output_dir: Option<PathBuf>,
}

impl QrMarkerEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(dir.into()),
        }
    }

    pub fn artifact_path(&self, identifier: &str) -> Option<PathBuf> {
        self.output_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.png", file_stem(identifier))))
    }
}

impl MarkerEncoder for QrMarkerEncoder {
    fn encode(&self, identifier: &str) -> Result<DynamicImage> {
        let code = QrCode::new(identifier.as_bytes())
            .map_err(|e| SheetError::EncodingError(e.to_string()))?;

        let image = DynamicImage::ImageLuma8(code.render::<Luma<u8>>().build());

        if let Some(path) = self.artifact_path(identifier) {
            image
                .save(&path)
                .map_err(|e| SheetError::EncodingError(format!("{}: {}", path.display(), e)))?;
            debug!(path = %path.display(), "marker image written");
        }

        Ok(image)
    }
}
