pub mod document;
pub mod entry;
pub mod job;
pub mod settings;
pub mod time_block;
