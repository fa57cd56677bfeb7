//! Loads paywall definitions from YAML or JSON files.
//!
//! The format is chosen by file extension: `.yaml`/`.yml` or `.json`.

use std::path::Path;

use crate::domain::paywall::{PaywallConfiguration, PaywallError};

/// Reads and parses a paywall definition file.
///
/// Only parsing happens here; comparison legality is checked when a
/// `PaywallSession` is built from the result.
///
/// # Errors
///
/// `PaywallError::Definition` if the file cannot be read, has an
/// unsupported extension, or does not parse.
pub fn load_paywall_definition(path: impl AsRef<Path>) -> Result<PaywallConfiguration, PaywallError> {
    let path = path.as_ref();
    let path_text = path.display().to_string();

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let source = std::fs::read_to_string(path)
        .map_err(|e| PaywallError::definition(&path_text, e.to_string()))?;

    let configuration = match extension.as_deref() {
        Some("yaml") | Some("yml") => PaywallConfiguration::from_yaml(&source)
            .map_err(|e| PaywallError::definition(&path_text, e.to_string()))?,
        Some("json") => PaywallConfiguration::from_json(&source)
            .map_err(|e| PaywallError::definition(&path_text, e.to_string()))?,
        other => {
            return Err(PaywallError::definition(
                &path_text,
                format!("unsupported extension {:?}", other.unwrap_or("")),
            ))
        }
    };

    tracing::debug!(
        path = %path_text,
        options = configuration.options.len(),
        "Loaded paywall definition"
    );

    Ok(configuration)
}
