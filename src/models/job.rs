use serde::{Deserialize, Serialize};

pub const DEFAULT_JOB_ID: &str = "default";
pub const DEFAULT_JOB_NAME: &str = "Work";
pub const DEFAULT_RATE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,   // ⇔ jobs.id (TEXT PRIMARY KEY)
    pub name: String, // ⇔ jobs.name
    pub rate: f64,    // ⇔ jobs.rate (REAL, hourly)
}

impl Job {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rate: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rate,
        }
    }

    /// Derive an identifier from a display name: lowercase ASCII alphanumerics
    /// joined by `-`.
    pub fn slug(name: &str) -> String {
        let mut out = String::new();
        for c in name.trim().chars() {
            if c.is_ascii_alphanumeric() {
                out.push(c.to_ascii_lowercase());
            } else if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
        }
        let trimmed = out.trim_end_matches('-');
        if trimmed.is_empty() {
            "job".to_string()
        } else {
            trimmed.to_string()
        }
    }
}
