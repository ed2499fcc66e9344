//! Static provider capability declarations.

use serde::{Deserialize, Serialize};

/// What a provider accepts and produces. Callers use this to pick a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub input_formats: Vec<String>,
    pub output_formats: Vec<String>,
    /// Destination types, e.g. `"s3"`.
    pub destinations: Vec<String>,
}

impl Capabilities {
    pub fn new(inputs: &[&str], outputs: &[&str], destinations: &[&str]) -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            input_formats: owned(inputs),
            output_formats: owned(outputs),
            destinations: owned(destinations),
        }
    }

    pub fn supports_output(&self, format: &str) -> bool {
        self.output_formats.iter().any(|f| f.eq_ignore_ascii_case(format))
    }
}
