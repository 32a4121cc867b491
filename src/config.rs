// src/config.rs

use std::{path::PathBuf, time::Duration};

/// Countries endpoint, restricted to the `name` field.
pub const DEFAULT_URL: &str = "https://restcountries.com/v3.1/all?fields=name";

/// Output file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "json/countries.json";

/// Everything one export run needs. `Default` is the plain no-argument run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub url: String,
    pub output: PathBuf,
    /// No timeout unless set.
    pub timeout: Option<Duration>,
    /// Write non-ASCII characters as `\uXXXX` escapes instead of raw UTF-8.
    pub escape_non_ascii: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            timeout: None,
            escape_non_ascii: true,
        }
    }
}
