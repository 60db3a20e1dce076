//! Project file loading.
//!
//! A project file is either a full editor state (with `initial` and `final`
//! snapshots) or a single bare calculation.

use crate::error::{QuoteError, Result};
use crate::model::{AppState, CalculationData};
use std::path::Path;
use tracing::debug;

/// Parse project JSON text.
pub fn parse_project_str(content: &str) -> Result<AppState> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    let is_app_state = value
        .as_object()
        .is_some_and(|obj| obj.contains_key("initial") || obj.contains_key("final"));

    if is_app_state {
        debug!("Parsing full application state");
        Ok(serde_json::from_value(value)?)
    } else {
        debug!("Parsing bare calculation");
        let data: CalculationData = serde_json::from_value(value)?;
        Ok(AppState::from_calculation(data))
    }
}

/// Load a project file from disk.
pub fn load_project_file(path: &Path) -> Result<AppState> {
    if !path.exists() {
        return Err(QuoteError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;

    if content.trim().is_empty() {
        return Err(QuoteError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    parse_project_str(&content)
}
