//! Printable multiple-choice answer sheets.
//!
//! A [`SheetSpec`] describes one sheet. [`LayoutPlanner`] turns it into a
//! [`LayoutPlan`] of draw primitives, and [`render_plan`] executes that plan
//! against a [`Canvas`] such as [`PdfCanvas`], with the header marker
//! supplied by a [`MarkerEncoder`].
//!
//! # Example
//!
//! ```no_run
//! use answer_sheet::{LayoutConfig, LayoutPlanner, PdfCanvas, QrMarkerEncoder, SheetSpec};
//!
//! let spec = SheetSpec::new(
//!     "GAB-001-MAT-3A",
//!     "Mathematics",
//!     "3A",
//!     40,
//!     ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect(),
//! )?
//! .with_grid(10, 4)?;
//!
//! let config = LayoutConfig::default();
//! let plan = LayoutPlanner::new(config.clone())?.plan(&spec);
//!
//! let mut canvas = PdfCanvas::new("Answer Sheet", config.page_width, config.page_height)?;
//! answer_sheet::render_plan(&plan, &mut canvas, &QrMarkerEncoder::new())?;
//! canvas.save("GAB-001-MAT-3A.pdf")?;
//! # Ok::<(), answer_sheet::SheetError>(())
//! ```

pub mod config;
pub mod error;
pub mod marker;
pub mod plan;
pub mod render;
pub mod sheet;

pub use config::LayoutConfig;
pub use error::{Result, SheetError};
pub use marker::{MarkerEncoder, QrMarkerEncoder};
pub use plan::{FontWeight, LayoutPlan, LayoutPlanner, Position, Primitive, TextAlign};
pub use render::{render_plan, Canvas, PdfCanvas};
pub use sheet::{file_stem, EffectiveParams, SheetSpec};
