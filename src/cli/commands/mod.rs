pub mod add;
pub mod backup;
pub mod config;
pub mod db;
pub mod del;
pub mod init;
pub mod job;
pub mod list;
pub mod log;
pub mod restore;
pub mod snapshot;
pub mod summary;
