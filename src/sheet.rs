//! Sheet input and the parameters derived from it.

use crate::error::{Result, SheetError};

pub const DEFAULT_QUESTIONS_PER_COLUMN: u32 = 30;
pub const DEFAULT_COLUMNS: u32 = 4;

/// One answer sheet to lay out. Construction validates the grid, so every
/// `SheetSpec` in existence can be planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSpec {
    identifier: String,
    subject: String,
    group: String,
    total_questions: u32,
    alternatives: Vec<String>,
    questions_per_column: u32,
    columns: u32,
}

impl SheetSpec {
    pub fn new(
        identifier: impl Into<String>,
        subject: impl Into<String>,
        group: impl Into<String>,
        total_questions: u32,
        alternatives: Vec<String>,
    ) -> Result<Self> {
        let identifier = identifier.into();
        if identifier.trim().is_empty() {
            return Err(SheetError::config("identifier", "must not be empty"));
        }
        if alternatives.is_empty() {
            return Err(SheetError::config("alternatives", "at least one label is required"));
        }
        if let Some(idx) = alternatives.iter().position(|a| a.trim().is_empty()) {
            return Err(SheetError::config(
                "alternatives",
                format!("label {} is blank", idx + 1),
            ));
        }

        Ok(Self {
            identifier,
            subject: subject.into(),
            group: group.into(),
            total_questions,
            alternatives,
            questions_per_column: DEFAULT_QUESTIONS_PER_COLUMN,
            columns: DEFAULT_COLUMNS,
        })
    }

    /// Overrides the grid shape. Zero in either dimension is rejected.
    pub fn with_grid(mut self, questions_per_column: u32, columns: u32) -> Result<Self> {
        if questions_per_column == 0 {
            return Err(SheetError::config("questions_per_column", "must be at least 1"));
        }
        if columns == 0 {
            return Err(SheetError::config("columns", "must be at least 1"));
        }
        self.questions_per_column = questions_per_column;
        self.columns = columns;
        Ok(self)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn questions_per_column(&self) -> u32 {
        self.questions_per_column
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn capacity(&self) -> u32 {
        self.questions_per_column.saturating_mul(self.columns)
    }

    /// Clamps the question count to capacity. Questions past capacity are
    /// dropped without an error.
    pub fn effective_params(&self) -> EffectiveParams {
        let capacity = self.capacity();
        let question_count = self.total_questions.min(capacity);
        let columns_used = question_count
            .div_ceil(self.questions_per_column)
            .min(self.columns);

        EffectiveParams {
            requested: self.total_questions,
            capacity,
            question_count,
            questions_per_column: self.questions_per_column,
            column_count: self.columns,
            columns_used,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveParams {
    pub requested: u32,
    pub capacity: u32,
    /// Number of questions actually laid out
    pub question_count: u32,
    pub questions_per_column: u32,
    pub column_count: u32,
    pub columns_used: u32,
}

impl EffectiveParams {
    pub fn dropped(&self) -> u32 {
        self.requested - self.question_count
    }
}

/// Filesystem-safe stem for output files named after a sheet identifier.
///
/// Bytes outside `[A-Za-z0-9._-]` are percent-encoded (`%` included), so
/// distinct identifiers never share a file.
pub fn file_stem(identifier: &str) -> String {
    let mut stem = String::with_capacity(identifier.len());
    for byte in identifier.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
            stem.push(byte as char);
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}
