use serde::{Deserialize, Serialize};

/// Describes a single run, attached to JSON reports.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct RunMetadata {
    pub nucleo_version: String,
    pub input: String,
    pub analysis_date: String,
    pub elapsed: f64,
}

impl RunMetadata {
    /// Starts metadata for an input, stamped with the current local time. `elapsed` is filled in
    /// by the caller once the analysis finishes.
    pub fn new(version: &str, input: &str) -> Self {
        RunMetadata {
            nucleo_version: version.to_string(),
            input: input.to_string(),
            analysis_date: format!("{:?}", chrono::offset::Local::now()),
            ..RunMetadata::default()
        }
    }
}
