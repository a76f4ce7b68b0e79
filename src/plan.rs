//! Layout planning: turns a [`SheetSpec`] into an ordered list of draw
//! primitives partitioned into pages.
//!
//! The planner performs no I/O. A [`LayoutPlan`] is handed to a renderer
//! (see [`crate::render`]) that executes the primitives in order.

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::sheet::{EffectiveParams, SheetSpec};
use tracing::debug;

const NAME_FIELD: &str = "Name:___________________________";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    /// Horizontally centered on the position
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Text {
        at: Position,
        text: String,
        weight: FontWeight,
        size: f32,
        align: TextAlign,
    },
    Circle {
        center: Position,
        radius: f32,
    },
    /// `at` is the lower-left corner. `source` is the identifier the marker
    /// encoder turns into an image.
    Image {
        at: Position,
        width: f32,
        height: f32,
        source: String,
    },
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    params: EffectiveParams,
    primitives: Vec<Primitive>,
}

impl LayoutPlan {
    pub fn params(&self) -> &EffectiveParams {
        &self.params
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Primitives of each page, in order. The first page starts implicitly.
    pub fn pages(&self) -> impl Iterator<Item = &[Primitive]> {
        self.primitives
            .split(|p| matches!(p, Primitive::PageBreak))
    }

    pub fn page_count(&self) -> usize {
        self.page_breaks() + 1
    }

    pub fn page_breaks(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::PageBreak))
            .count()
    }

    pub fn question_count(&self) -> usize {
        self.params.question_count as usize
    }
}

/// Column and row of the zero-based question `index`.
pub fn grid_slot(index: u32, questions_per_column: u32) -> (u32, u32) {
    (index / questions_per_column, index % questions_per_column)
}

/// Zero-padded question label, e.g. `"07-"`.
pub fn question_label(number: u32) -> String {
    format!("{:02}-", number)
}

#[derive(Debug, Clone, Default)]
pub struct LayoutPlanner {
    config: LayoutConfig,
}

impl LayoutPlanner {
    /// Fails when `config` cannot produce a printable page.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn plan(&self, spec: &SheetSpec) -> LayoutPlan {
        let params = spec.effective_params();
        debug!(
            identifier = spec.identifier(),
            questions = params.question_count,
            columns_used = params.columns_used,
            capacity = params.capacity,
            "planning answer sheet"
        );
        if params.dropped() > 0 {
            debug!(
                requested = params.requested,
                dropped = params.dropped(),
                "question count clamped to sheet capacity"
            );
        }

        let per_question = 1 + 2 * spec.alternatives().len();
        let mut primitives = Vec::with_capacity(4 + params.question_count as usize * per_question);

        self.push_header(spec, &mut primitives);
        self.push_questions(spec, &params, &mut primitives);

        LayoutPlan { params, primitives }
    }

    fn push_header(&self, spec: &SheetSpec, out: &mut Vec<Primitive>) {
        let c = &self.config;
        let top = c.header_y();

        out.push(text(
            c.margin,
            top,
            format!("Subject: {}", spec.subject()),
            FontWeight::Bold,
            c.header_font_size,
            TextAlign::Left,
        ));
        out.push(text(
            c.margin + c.group_label_offset,
            top,
            format!("Class: {}", spec.group()),
            FontWeight::Bold,
            c.header_font_size,
            TextAlign::Left,
        ));
        out.push(text(
            c.margin,
            top - c.name_field_gap,
            NAME_FIELD.to_string(),
            FontWeight::Regular,
            c.header_font_size,
            TextAlign::Left,
        ));
        out.push(Primitive::Image {
            at: Position::new(c.margin + c.marker_offset_x, top - c.marker_offset_y),
            width: c.marker_size,
            height: c.marker_size,
            source: spec.identifier().to_string(),
        });
    }

    fn push_questions(&self, spec: &SheetSpec, params: &EffectiveParams, out: &mut Vec<Primitive>) {
        let c = &self.config;
        let radius = c.bubble_size / 2.0;
        let mut start_y = c.grid_start_y();

        for i in 0..params.question_count {
            let (column, row) = grid_slot(i, params.questions_per_column);
            let x_offset = column as f32 * c.column_spacing;
            let mut y = start_y - row as f32 * c.bubble_spacing;

            // Only the very first slot of the grid can open a new page;
            // later columns are never checked.
            if y < c.low_water_mark && row == 0 && column == 0 {
                out.push(Primitive::PageBreak);
                y = c.header_y();
                start_y = y;
            }

            out.push(text(
                c.margin + x_offset,
                y,
                question_label(i + 1),
                FontWeight::Regular,
                c.font_size,
                TextAlign::Left,
            ));

            for (idx, alternative) in spec.alternatives().iter().enumerate() {
                let x = c.margin + c.bubble_offset + x_offset + idx as f32 * c.horizontal_spacing;
                out.push(Primitive::Circle {
                    center: Position::new(x, y + 5.0),
                    radius,
                });
                out.push(text(
                    x,
                    y + 1.0,
                    alternative.clone(),
                    FontWeight::Bold,
                    c.label_font_size,
                    TextAlign::Center,
                ));
            }
        }
    }
}

fn text(x: f32, y: f32, text: String, weight: FontWeight, size: f32, align: TextAlign) -> Primitive {
    Primitive::Text {
        at: Position::new(x, y),
        text,
        weight,
        size,
        align,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;

    fn spec(total: u32, per_column: u32, columns: u32) -> SheetSpec {
        SheetSpec::new("GAB-001", "Math", "3A", total, vec!["A".into(), "B".into(), "C".into()])
            .unwrap()
            .with_grid(per_column, columns)
            .unwrap()
    }

    #[test]
    fn question_labels_are_zero_padded() {
        assert_eq!(question_label(1), "01-");
        assert_eq!(question_label(10), "10-");
        assert_eq!(question_label(120), "120-");
    }

    #[test]
    fn grid_slot_wraps_by_column() {
        assert_eq!(grid_slot(0, 10), (0, 0));
        assert_eq!(grid_slot(9, 10), (0, 9));
        assert_eq!(grid_slot(10, 10), (1, 0));
        assert_eq!(grid_slot(37, 10), (3, 7));
    }

    #[test]
    fn header_comes_first() {
        let plan = LayoutPlanner::default().plan(&spec(2, 10, 4));
        let prims = plan.primitives();
        match &prims[0] {
            Primitive::Text { text, weight, at, .. } => {
                assert_eq!(text, "Subject: Math");
                assert_eq!(*weight, FontWeight::Bold);
                assert_eq!(at.x, 50.0);
            }
            other => panic!("unexpected primitive: {:?}", other),
        }
        match &prims[1] {
            Primitive::Text { text, at, .. } => {
                assert_eq!(text, "Class: 3A");
                assert_eq!(at.x, 200.0);
            }
            other => panic!("unexpected primitive: {:?}", other),
        }
        match &prims[3] {
            Primitive::Image { width, height, source, at } => {
                assert_eq!((*width, *height), (80.0, 80.0));
                assert_eq!(source, "GAB-001");
                assert_eq!(at.x, 485.0);
            }
            other => panic!("unexpected primitive: {:?}", other),
        }
    }

    #[test]
    fn bubble_follows_question_label() {
        let planner = LayoutPlanner::default();
        let plan = planner.plan(&spec(1, 10, 4));
        let start_y = planner.config().grid_start_y();
        let prims = &plan.primitives()[4..];
        assert_eq!(prims.len(), 1 + 2 * 3);
        assert!(matches!(&prims[0], Primitive::Text { text, .. } if text == "01-"));
        match &prims[1] {
            Primitive::Circle { center, radius } => {
                assert_eq!(center.x, 85.0);
                assert_eq!(center.y, start_y + 5.0);
                assert_eq!(*radius, 7.5);
            }
            other => panic!("unexpected primitive: {:?}", other),
        }
        match &prims[2] {
            Primitive::Text { text, align, weight, at, .. } => {
                assert_eq!(text, "A");
                assert_eq!(*align, TextAlign::Center);
                assert_eq!(*weight, FontWeight::Bold);
                assert_eq!(at.y, start_y + 1.0);
            }
            other => panic!("unexpected primitive: {:?}", other),
        }
    }

    #[test]
    fn zero_questions_yield_header_only() {
        let plan = LayoutPlanner::default().plan(&spec(0, 10, 4));
        assert_eq!(plan.primitives().len(), 4);
        assert_eq!(plan.page_count(), 1);
    }

    #[test]
    fn low_grid_start_breaks_before_first_question_only() {
        let config = LayoutConfig {
            grid_start_gap: 760.0,
            ..Default::default()
        };
        let planner = LayoutPlanner::new(config.clone()).unwrap();
        let plan = planner.plan(&spec(25, 10, 3));

        assert_eq!(plan.page_breaks(), 1);
        assert!(matches!(plan.primitives()[4], Primitive::PageBreak));
        match &plan.primitives()[5] {
            Primitive::Text { text, at, .. } => {
                assert_eq!(text, "01-");
                assert_eq!(at.y, config.header_y());
            }
            other => panic!("unexpected primitive: {:?}", other),
        }
    }

    #[test]
    fn low_later_columns_never_break() {
        let config = LayoutConfig {
            bubble_spacing: 80.0,
            ..Default::default()
        };
        let plan = LayoutPlanner::new(config).unwrap().plan(&spec(40, 10, 4));
        assert_eq!(plan.page_breaks(), 0);
    }

    #[test]
    fn planner_rejects_invalid_config() {
        let config = LayoutConfig {
            horizontal_spacing: -18.0,
            ..Default::default()
        };
        match LayoutPlanner::new(config) {
            Err(SheetError::ConfigError { field, .. }) => assert_eq!(field, "horizontal_spacing"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn pages_split_on_breaks() {
        let config = LayoutConfig {
            grid_start_gap: 760.0,
            ..Default::default()
        };
        let plan = LayoutPlanner::new(config).unwrap().plan(&spec(2, 10, 3));
        let pages: Vec<_> = plan.pages().collect();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 4);
        assert_eq!(pages[1].len(), 2 * 7);
    }
}
