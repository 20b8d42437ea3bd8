//! Batch input records.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of leading fields a line must carry.
const REQUIRED_FIELDS: usize = 3;

/// One `url,category,subcategory` line of the batch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Video watch URL
    pub url: String,
    /// Top-level category (first folder level)
    pub category: String,
    /// Subcategory (second folder level)
    pub subcategory: String,
}

impl InputRecord {
    pub fn new(
        url: impl Into<String>,
        category: impl Into<String>,
        subcategory: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            category: category.into(),
            subcategory: subcategory.into(),
        }
    }

    /// Folder the record's files are written to: `{root}/{category}/{subcategory}`.
    pub fn output_dir(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(&self.category).join(&self.subcategory)
    }
}

impl fmt::Display for InputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.url, self.category, self.subcategory)
    }
}

/// A line that could not be turned into an [`InputRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineParseError {
    #[error("expected at least 3 comma-separated fields, found {found}: {line:?}")]
    TooFewFields { line: String, found: usize },

    /// Category or subcategory would leave the output root.
    #[error("folder name {field:?} must be relative and stay inside the output root: {line:?}")]
    UnsafeFolder { line: String, field: String },
}

impl LineParseError {
    /// The offending line, trimmed.
    pub fn line(&self) -> &str {
        match self {
            LineParseError::TooFewFields { line, .. } | LineParseError::UnsafeFolder { line, .. } => {
                line
            }
        }
    }
}

/// Only plain relative segments; no root, drive prefix or `..`.
fn is_contained(folder: &str) -> bool {
    Path::new(folder)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Parse one line of the batch file.
///
/// Returns `Ok(None)` for blank lines, which are not records at all.
/// Fields past the third are ignored. There is no quoting or escaping.
/// Category and subcategory become folders, so absolute paths and `..`
/// segments are rejected.
pub fn parse_line(line: &str) -> Result<Option<InputRecord>, LineParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < REQUIRED_FIELDS {
        return Err(LineParseError::TooFewFields {
            line: line.to_string(),
            found: parts.len(),
        });
    }

    if let Some(field) = parts[1..REQUIRED_FIELDS].iter().find(|f| !is_contained(f)) {
        return Err(LineParseError::UnsafeFolder {
            line: line.to_string(),
            field: field.to_string(),
        });
    }

    Ok(Some(InputRecord::new(parts[0], parts[1], parts[2])))
}
