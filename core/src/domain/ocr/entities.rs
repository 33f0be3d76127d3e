use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of an asynchronous read job on the OCR delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
}

impl ReadStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ReadStatus::NotStarted | ReadStatus::Running)
    }
}

impl fmt::Display for ReadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            ReadStatus::NotStarted => "notStarted",
            ReadStatus::Running => "running",
            ReadStatus::Succeeded => "succeeded",
            ReadStatus::Failed => "failed",
        };
        f.write_str(status)
    }
}

/// Snapshot of a read job. `lines` is only populated once the job succeeded,
/// in page order then line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOperation {
    pub status: ReadStatus,
    pub lines: Vec<String>,
}

impl ReadOperation {
    pub fn pending(status: ReadStatus) -> Self {
        Self {
            status,
            lines: Vec::new(),
        }
    }

    pub fn succeeded(lines: Vec<String>) -> Self {
        Self {
            status: ReadStatus::Succeeded,
            lines,
        }
    }

    pub fn failed() -> Self {
        Self::pending(ReadStatus::Failed)
    }
}

/// Recognized label text, one OCR line per `\n`-terminated line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutritionLabelText(String);

impl NutritionLabelText {
    /// Returns `None` when no line carried any text.
    pub fn from_lines<I, S>(lines: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text: String = lines
            .into_iter()
            .map(|line| format!("{}\n", line.as_ref()))
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn line_count(&self) -> usize {
        self.0.lines().count()
    }
}

impl fmt::Display for NutritionLabelText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
