use super::{entry::Entry, job::Job, settings::PaySettings};
use serde::{Deserialize, Serialize};

pub const DOCUMENT_VERSION: u32 = 1;

/// The whole user state as a single value, read and written wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub version: u32,
    pub saved_at: String,
    pub settings: PaySettings,
    pub jobs: Vec<Job>,
    pub entries: Vec<Entry>,
}
