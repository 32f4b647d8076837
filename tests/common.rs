#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use rpaylog::models::entry::Entry;
use rpaylog::models::time_block::TimeBlock;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rpl() -> Command {
    cargo_bin_cmd!("rpaylog")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpaylog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rpaylog_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB through the CLI in test mode (no config file written)
pub fn init_db(db_path: &str) {
    rpl()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn add_day(db_path: &str, date: &str, blocks: &[&str]) {
    let mut args = vec!["--db", db_path, "--test", "add", date];
    for b in blocks {
        args.push("--block");
        args.push(b);
    }
    rpl().args(args).assert().success();
}

/// Fresh directory to use as `HOME`, with `.rpaylog/rpaylog.conf` holding
/// `config_yaml`.
pub fn temp_home(name: &str, config_yaml: &str) -> PathBuf {
    let mut home: PathBuf = env::temp_dir();
    home.push(format!("{}_rpaylog_home", name));
    fs::remove_dir_all(&home).ok();
    fs::create_dir_all(home.join(".rpaylog")).expect("create home");
    fs::write(home.join(".rpaylog").join("rpaylog.conf"), config_yaml).expect("write config");
    home
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid time")
}

pub fn block(start: &str, end: &str) -> TimeBlock {
    TimeBlock::new(t(start), t(end))
}

/// Entry with an explicit id and the given blocks.
pub fn entry(id: i64, date: &str, job: &str, blocks: &[(&str, &str)]) -> Entry {
    let mut e = Entry::new(
        d(date),
        job,
        blocks.iter().map(|(s, e)| block(s, e)).collect(),
    );
    e.id = id;
    e
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
