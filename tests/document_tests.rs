mod common;
use common::{approx, entry, setup_test_db, temp_out};

use rpaylog::core::add::AddLogic;
use rpaylog::core::del::DeleteLogic;
use rpaylog::core::document::DocumentLogic;
use rpaylog::core::job::JobLogic;
use rpaylog::core::logic::Core;
use rpaylog::db::log::load_log;
use rpaylog::db::migrate::MigrationSeed;
use rpaylog::db::pool::DbPool;
use rpaylog::db::queries::load_entries;
use rpaylog::errors::AppError;
use rpaylog::models::document::DOCUMENT_VERSION;
use rpaylog::models::entry::Entry;
use rpaylog::models::settings::PaySettings;
use std::fs;
use std::path::Path;

fn without_ids(entries: &[Entry]) -> Vec<Entry> {
    entries
        .iter()
        .cloned()
        .map(|mut e| {
            e.id = 0;
            e
        })
        .collect()
}

fn seeded_pool(name: &str) -> DbPool {
    let db = setup_test_db(name);
    let mut pool = DbPool::new(&db).expect("open db");

    JobLogic::add(&mut pool, "Night Shift", 15.0, None).expect("job");

    let e1 = entry(0, "2025-09-01", "default", &[("09:00", "13:00"), ("14:00", "18:00")])
        .with_notes("office");
    let e2 = entry(0, "2025-09-02", "night-shift", &[("22:00", "02:00")]);
    AddLogic::apply(&mut pool, &e1).expect("add e1");
    AddLogic::apply(&mut pool, &e2).expect("add e2");

    pool
}

#[test]
fn test_new_database_has_default_job() {
    let db = setup_test_db("doc_default_job");
    let pool = DbPool::new(&db).expect("open db");

    let jobs = JobLogic::list(&pool).expect("jobs");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "default");
    assert!(approx(jobs[0].rate, 10.0));
}

#[test]
fn test_entries_round_trip_through_storage() {
    let pool = seeded_pool("doc_storage");

    let entries = load_entries(&pool.conn).expect("load");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].notes, "office");
    assert_eq!(entries[0].blocks.len(), 2);
    assert_eq!(entries[0].blocks[1].to_string(), "14:00-18:00");
    assert_eq!(entries[1].job_id, "night-shift");
    assert_eq!(entries[1].raw_minutes(), 240);
}

#[test]
fn test_open_block_is_stored_but_not_counted() {
    let db = setup_test_db("doc_open_block");
    let mut pool = DbPool::new(&db).expect("open db");

    let mut e = entry(0, "2025-09-03", "default", &[("09:00", "12:00")]);
    e.blocks.push(rpaylog::models::time_block::TimeBlock {
        start: Some(common::t("13:00")),
        end: None,
    });
    AddLogic::apply(&mut pool, &e).expect("add");

    let stored = load_entries(&pool.conn).expect("load");
    assert_eq!(stored[0].blocks.len(), 2);
    assert_eq!(stored[0].blocks[1].end, None);

    let ledger = Core::build_ledger(&pool, &PaySettings::default()).expect("ledger");
    assert_eq!(ledger.report.entries[0].minutes, 180);
    assert!(approx(ledger.report.entries[0].pay, 30.0));
}

#[test]
fn test_add_rejects_unknown_job() {
    let db = setup_test_db("doc_unknown_job");
    let mut pool = DbPool::new(&db).expect("open db");

    let e = entry(0, "2025-09-03", "nope", &[("09:00", "12:00")]);
    let err = AddLogic::apply(&mut pool, &e).unwrap_err();
    assert!(matches!(err, AppError::JobNotFound(ref id) if id == "nope"));
    assert!(load_entries(&pool.conn).expect("load").is_empty());
}

#[test]
fn test_add_requires_a_block() {
    let db = setup_test_db("doc_no_block");
    let mut pool = DbPool::new(&db).expect("open db");

    let e = entry(0, "2025-09-03", "default", &[]);
    let err = AddLogic::apply(&mut pool, &e).unwrap_err();
    assert!(matches!(err, AppError::InvalidBlock(_)));
}

#[test]
fn test_delete_entry_and_missing_entry() {
    let mut pool = seeded_pool("doc_delete");
    let id = load_entries(&pool.conn).expect("load")[0].id;

    let removed = DeleteLogic::apply(&mut pool, id).expect("delete");
    assert_eq!(removed.notes, "office");
    assert_eq!(load_entries(&pool.conn).expect("load").len(), 1);

    let blocks: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM blocks WHERE entry_id = ?1", [id], |r| r.get(0))
        .expect("count blocks");
    assert_eq!(blocks, 0);

    let err = DeleteLogic::apply(&mut pool, id).unwrap_err();
    assert!(matches!(err, AppError::EntryNotFound(missing) if missing == id));
}

#[test]
fn test_job_ids_are_unique() {
    let db = setup_test_db("doc_job_ids");
    let mut pool = DbPool::new(&db).expect("open db");

    let a = JobLogic::add(&mut pool, "Bar Work", 12.0, None).expect("a");
    let b = JobLogic::add(&mut pool, "bar work!", 13.0, None).expect("b");
    assert_eq!(a.id, "bar-work");
    assert_eq!(b.id, "bar-work-2");

    let err = JobLogic::add(&mut pool, "Other", 9.0, Some("bar-work")).unwrap_err();
    assert!(matches!(err, AppError::JobExists(_)));

    let err = JobLogic::add(&mut pool, "Other", -1.0, None).unwrap_err();
    assert!(matches!(err, AppError::InvalidRate(_)));
}

#[test]
fn test_deleting_job_orphans_entries_at_zero_rate() {
    let mut pool = seeded_pool("doc_orphan");

    let orphaned = JobLogic::delete(&mut pool, "night-shift").expect("delete job");
    assert_eq!(orphaned, 1);

    let ledger = Core::build_ledger(&pool, &PaySettings::default()).expect("ledger");
    assert_eq!(ledger.entries.len(), 2);
    assert_eq!(ledger.report.entries[1].minutes, 240);
    assert!(approx(ledger.report.entries[1].pay, 0.0));

    let err = JobLogic::delete(&mut pool, "night-shift").unwrap_err();
    assert!(matches!(err, AppError::JobNotFound(_)));
}

#[test]
fn test_snapshot_restore_into_fresh_database() {
    let source = seeded_pool("doc_snapshot_src");
    let settings = PaySettings {
        break_minutes: 15,
        ..PaySettings::new(38.0, 1.5)
    };

    let doc = DocumentLogic::collect(&source, &settings).expect("collect");
    assert_eq!(doc.version, DOCUMENT_VERSION);
    assert_eq!(doc.jobs.len(), 2);

    let out = temp_out("doc_snapshot", "json");
    DocumentLogic::save(&doc, Path::new(&out)).expect("save");
    let loaded = DocumentLogic::load(Path::new(&out)).expect("load");
    assert_eq!(loaded, doc);

    let target_db = setup_test_db("doc_snapshot_dst");
    let mut target = DbPool::new(&target_db).expect("open target");
    DocumentLogic::restore(&mut target, &loaded, &out).expect("restore");

    let restored = DocumentLogic::collect(&target, &loaded.settings).expect("collect again");
    assert_eq!(restored.jobs, doc.jobs);
    assert_eq!(without_ids(&restored.entries), without_ids(&doc.entries));
    assert_eq!(restored.settings, settings);

    let ops: Vec<String> = load_log(&target.conn)
        .expect("log")
        .into_iter()
        .map(|r| r.operation)
        .collect();
    assert!(ops.iter().any(|op| op == "restore"));
}

#[test]
fn test_restore_replaces_existing_state() {
    let source = seeded_pool("doc_replace_src");
    let doc = DocumentLogic::collect(&source, &PaySettings::default()).expect("collect");

    let mut target = seeded_pool("doc_replace_dst");
    AddLogic::apply(
        &mut target,
        &entry(0, "2025-10-01", "default", &[("08:00", "09:00")]),
    )
    .expect("extra entry");
    assert_eq!(load_entries(&target.conn).expect("load").len(), 3);

    DocumentLogic::restore(&mut target, &doc, "memory").expect("restore");
    assert_eq!(load_entries(&target.conn).expect("load").len(), 2);
}

#[test]
fn test_newer_document_version_is_rejected() {
    let pool = seeded_pool("doc_version");
    let mut doc = DocumentLogic::collect(&pool, &PaySettings::default()).expect("collect");
    doc.version = DOCUMENT_VERSION + 1;

    let out = temp_out("doc_version", "json");
    DocumentLogic::save(&doc, Path::new(&out)).expect("save");

    let err = DocumentLogic::load(Path::new(&out)).unwrap_err();
    assert!(matches!(err, AppError::DocumentVersion(v) if v == DOCUMENT_VERSION + 1));
}

#[test]
fn test_malformed_document_is_an_error() {
    let out = temp_out("doc_garbage", "json");
    fs::write(&out, "{ not json").expect("write");

    let err = DocumentLogic::load(Path::new(&out)).unwrap_err();
    assert!(matches!(err, AppError::Json(_)));
}

#[test]
fn test_default_job_uses_configured_rate_once() {
    let db = setup_test_db("doc_seed_rate");
    let seed = MigrationSeed { default_rate: 12.5 };

    let mut pool = DbPool::open(&db, &seed).expect("open db");
    let jobs = JobLogic::list(&pool).expect("jobs");
    assert_eq!(jobs.len(), 1);
    assert!(approx(jobs[0].rate, 12.5));

    // a deleted default job is not seeded again on the next open
    JobLogic::delete(&mut pool, "default").expect("delete default");
    drop(pool);
    let pool = DbPool::open(&db, &seed).expect("reopen db");
    assert!(JobLogic::list(&pool).expect("jobs").is_empty());
}

#[test]
fn test_document_with_negative_settings_is_rejected() {
    let pool = seeded_pool("doc_bad_settings");
    let mut doc = DocumentLogic::collect(&pool, &PaySettings::default()).expect("collect");
    doc.settings.break_minutes = -15;

    let out = temp_out("doc_bad_settings", "json");
    DocumentLogic::save(&doc, Path::new(&out)).expect("save");

    let err = DocumentLogic::load(Path::new(&out)).unwrap_err();
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("break_minutes")));
}

#[test]
fn test_pay_settings_validation() {
    assert!(PaySettings::default().validate().is_ok());
    assert!(PaySettings::new(0.0, 1.0).validate().is_ok());
    assert!(PaySettings::new(-1.0, 1.25).validate().is_err());
    assert!(PaySettings::new(40.0, -0.5).validate().is_err());
    assert!(PaySettings::new(f64::NAN, 1.25).validate().is_err());

    let rounding = PaySettings {
        rounding_minutes: -5,
        ..PaySettings::default()
    };
    assert!(rounding.validate().is_err());
}
