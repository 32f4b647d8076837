pub mod add;
pub mod backup;
pub mod calculator;
pub mod config;
pub mod del;
pub mod document;
pub mod job;
pub mod log;
pub mod logic;
