//! Executes a [`LayoutPlan`] against a drawing surface.

use crate::error::{Result, SheetError};
use crate::marker::MarkerEncoder;
use crate::plan::{FontWeight, LayoutPlan, Position, Primitive, TextAlign};
use ::image::DynamicImage;
use printpdf::utils::calculate_points_for_circle;
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Drawing surface. Coordinates are points from the bottom-left corner.
pub trait Canvas {
    fn draw_text(&mut self, text: &str, at: Position, weight: FontWeight, size: f32) -> Result<()>;
    fn draw_centered_text(
        &mut self,
        text: &str,
        at: Position,
        weight: FontWeight,
        size: f32,
    ) -> Result<()>;
    /// Unfilled circle
    fn draw_circle(&mut self, center: Position, radius: f32) -> Result<()>;
    fn draw_image(&mut self, image: &DynamicImage, at: Position, width: f32, height: f32)
        -> Result<()>;
    fn new_page(&mut self) -> Result<()>;
}

/// Draws every primitive of `plan` in order.
pub fn render_plan<C, E>(plan: &LayoutPlan, canvas: &mut C, encoder: &E) -> Result<()>
where
    C: Canvas + ?Sized,
    E: MarkerEncoder + ?Sized,
{
    for primitive in plan.primitives() {
        match primitive {
            Primitive::Text {
                at,
                text,
                weight,
                size,
                align: TextAlign::Left,
            } => canvas.draw_text(text, *at, *weight, *size)?,
            Primitive::Text {
                at,
                text,
                weight,
                size,
                align: TextAlign::Center,
            } => canvas.draw_centered_text(text, *at, *weight, *size)?,
            Primitive::Circle { center, radius } => canvas.draw_circle(*center, *radius)?,
            Primitive::Image {
                at,
                width,
                height,
                source,
            } => {
                let image = encoder.encode(source)?;
                canvas.draw_image(&image, *at, *width, *height)?;
            }
            Primitive::PageBreak => canvas.new_page()?,
        }
    }
    Ok(())
}

// ============================================================================
// PDF Canvas
// ============================================================================

const OUTLINE_THICKNESS: f32 = 0.8;

fn pt(value: f32) -> Mm {
    Mm(value * 25.4 / 72.0)
}

pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font_regular: IndirectFontRef,
    font_bold: IndirectFontRef,
    page_width: f32,
    page_height: f32,
    pages: usize,
}

impl PdfCanvas {
    /// Creates a document with one empty page. Sizes are in points.
    pub fn new(title: &str, page_width: f32, page_height: f32) -> Result<Self> {
        let (doc, page1, layer1) =
            PdfDocument::new(title, pt(page_width), pt(page_height), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);

        let font_regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| SheetError::RenderError(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| SheetError::RenderError(e.to_string()))?;

        Ok(Self {
            doc,
            layer,
            font_regular,
            font_bold,
            page_width,
            page_height,
            pages: 1,
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn save(self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| SheetError::RenderError(format!("{}: {}", path.display(), e)))?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| SheetError::RenderError(e.to_string()))?;
        debug!(path = %path.display(), pages = self.pages, "PDF saved");
        Ok(())
    }

    fn font(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.font_regular,
            FontWeight::Bold => &self.font_bold,
        }
    }
}

impl Canvas for PdfCanvas {
    fn draw_text(&mut self, text: &str, at: Position, weight: FontWeight, size: f32) -> Result<()> {
        self.layer
            .use_text(text, size, pt(at.x), pt(at.y), self.font(weight));
        Ok(())
    }

    fn draw_centered_text(
        &mut self,
        text: &str,
        at: Position,
        weight: FontWeight,
        size: f32,
    ) -> Result<()> {
        let half = text_width(text, weight, size) / 2.0;
        self.draw_text(text, Position::new(at.x - half, at.y), weight, size)
    }

    fn draw_circle(&mut self, center: Position, radius: f32) -> Result<()> {
        let outline = Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None));
        self.layer.set_outline_color(outline);
        self.layer.set_outline_thickness(OUTLINE_THICKNESS);

        let line = Line {
            points: calculate_points_for_circle(Pt(radius), Pt(center.x), Pt(center.y)),
            is_closed: true,
        };
        self.layer.add_line(line);
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &DynamicImage,
        at: Position,
        width: f32,
        height: f32,
    ) -> Result<()> {
        let rgb_image = image.to_rgb8();
        let (width_px, height_px) = rgb_image.dimensions();
        if width_px == 0 || height_px == 0 {
            return Err(SheetError::RenderError("cannot embed an empty image".to_string()));
        }

        let image = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: rgb_image.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // At `dpi` the image is `width` points wide; stretch vertically to fit.
        let dpi = width_px as f32 * 72.0 / width;
        let natural_height = height_px as f32 * 72.0 / dpi;

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(pt(at.x)),
                translate_y: Some(pt(at.y)),
                dpi: Some(dpi),
                scale_y: Some(height / natural_height),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn new_page(&mut self) -> Result<()> {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            pt(self.page_width),
            pt(self.page_height),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        Ok(())
    }
}

// ============================================================================
// Text Metrics
// ============================================================================

/// Advance width in points, from the Helvetica AFM tables. Anything other
/// than capitals and spaces is measured at the digit width.
pub fn text_width(text: &str, weight: FontWeight, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c, weight) as u32).sum();
    units as f32 * size / 1000.0
}

fn glyph_width(c: char, weight: FontWeight) -> u16 {
    const REGULAR: [u16; 26] = [
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
        667, 611, 722, 667, 944, 667, 667, 611,
    ];
    const BOLD: [u16; 26] = [
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722,
        667, 611, 722, 667, 944, 667, 667, 611,
    ];

    match c {
        'A'..='Z' => {
            let idx = (c as u8 - b'A') as usize;
            match weight {
                FontWeight::Regular => REGULAR[idx],
                FontWeight::Bold => BOLD[idx],
            }
        }
        ' ' => 278,
        _ => 556,
    }
}
