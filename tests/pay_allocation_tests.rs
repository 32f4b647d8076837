mod common;
use common::{approx, d, entry, t};

use rpaylog::core::calculator::pay::{
    FlatBlock, adjust_entry_minutes, allocate, allocate_overtime, flatten,
};
use rpaylog::models::entry::{Entry, week_start};
use rpaylog::models::job::Job;
use rpaylog::models::settings::PaySettings;
use rpaylog::models::time_block::TimeBlock;
use std::collections::HashMap;

fn rates() -> HashMap<String, f64> {
    HashMap::from([("default".to_string(), 10.0), ("night".to_string(), 20.0)])
}

fn flat(entry: usize, date: &str, start: &str, minutes: i64, rate: f64) -> FlatBlock {
    FlatBlock {
        entry,
        week: week_start(d(date)),
        date: d(date),
        start: t(start),
        minutes,
        rate,
        overtime_minutes: 0,
    }
}

/// Monday 2025-09-01 .. Friday 2025-09-05, one 09:00-18:00 entry per day (45h).
fn long_week() -> Vec<Entry> {
    (1..=5)
        .map(|day| {
            entry(
                day,
                &format!("2025-09-0{}", day),
                "default",
                &[("09:00", "18:00")],
            )
        })
        .collect()
}

#[test]
fn test_week_at_threshold_has_no_overtime() {
    let entries: Vec<Entry> = (1..=5)
        .map(|day| {
            entry(
                day,
                &format!("2025-09-0{}", day),
                "default",
                &[("09:00", "17:00")],
            )
        })
        .collect();

    let report = allocate(&entries, &rates(), &PaySettings::default());

    assert_eq!(report.entries.len(), 5);
    for p in &report.entries {
        assert_eq!(p.minutes, 480);
        assert_eq!(p.overtime_minutes, 0);
        assert!(approx(p.pay, 80.0));
    }
    assert_eq!(report.weeks.len(), 1);
    assert!(approx(report.weeks[0].overtime_pay, 0.0));
}

#[test]
fn test_single_42_hour_block() {
    let mut week = vec![flat(0, "2025-09-01", "00:00", 42 * 60, 10.0)];
    let settings = PaySettings::new(40.0, 1.25);

    allocate_overtime(&mut week, &settings);

    assert_eq!(week[0].overtime_minutes, 120);
    let pay = week[0].regular_pay() + week[0].overtime_pay(settings.overtime_multiplier);
    assert!(approx(pay, 425.0));
}

#[test]
fn test_later_block_absorbs_overtime_first() {
    let mut week = vec![
        flat(0, "2025-09-01", "06:00", 30 * 60, 10.0),
        flat(1, "2025-09-03", "08:00", 15 * 60, 10.0),
    ];
    let settings = PaySettings::default();

    allocate_overtime(&mut week, &settings);

    assert_eq!(week[0].overtime_minutes, 0);
    assert_eq!(week[1].overtime_minutes, 300);

    let first = week[0].regular_pay() + week[0].overtime_pay(1.25);
    let second = week[1].regular_pay() + week[1].overtime_pay(1.25);
    assert!(approx(first, 300.0));
    assert!(approx(second, 162.5));
    assert!(approx(first + second, 462.5));
}

#[test]
fn test_overtime_spills_backwards_when_last_block_is_short() {
    let mut week = vec![
        flat(0, "2025-09-01", "08:00", 40 * 60, 10.0),
        flat(1, "2025-09-02", "08:00", 60, 10.0),
        flat(2, "2025-09-02", "14:00", 30, 10.0),
    ];

    allocate_overtime(&mut week, &PaySettings::default());

    // 41.5h worked: 90 minutes of overtime, 30 fit in the last block
    assert_eq!(week[2].overtime_minutes, 30);
    assert_eq!(week[1].overtime_minutes, 60);
    assert_eq!(week[0].overtime_minutes, 0);
}

#[test]
fn test_friday_carries_overtime_regardless_of_input_order() {
    let mut entries = long_week();
    entries.reverse();

    let report = allocate(&entries, &rates(), &PaySettings::default());

    let friday = report.for_entry(5).expect("friday");
    assert_eq!(friday.minutes, 540);
    assert_eq!(friday.overtime_minutes, 300);
    assert!(approx(friday.pay, 4.0 * 10.0 + 5.0 * 10.0 * 1.25));

    for id in 1..=4 {
        let p = report.for_entry(id).expect("weekday");
        assert_eq!(p.overtime_minutes, 0);
        assert!(approx(p.pay, 90.0));
    }

    assert!(approx(report.total_pay(), 462.5));
}

#[test]
fn test_report_keeps_input_order() {
    let mut entries = long_week();
    entries.swap(0, 3);

    let report = allocate(&entries, &rates(), &PaySettings::default());
    let ids: Vec<i64> = report.entries.iter().map(|p| p.entry_id).collect();
    assert_eq!(ids, vec![4, 2, 3, 1, 5]);
}

#[test]
fn test_week_pay_matches_independent_total() {
    let entries = long_week();
    let settings = PaySettings::new(38.5, 1.5);

    let report = allocate(&entries, &rates(), &settings);

    let total_minutes: i64 = report.entries.iter().map(|p| p.minutes).sum();
    let overtime_minutes = ((total_minutes as f64 / 60.0 - 38.5) * 60.0).round() as i64;
    let expected = (total_minutes - overtime_minutes) as f64 / 60.0 * 10.0
        + overtime_minutes as f64 / 60.0 * 10.0 * 1.5;

    let assigned: i64 = report.entries.iter().map(|p| p.overtime_minutes).sum();
    assert_eq!(assigned, overtime_minutes);
    assert_eq!(assigned, 390);
    assert!(approx(report.total_pay(), expected));
    assert!(approx(report.weeks[0].pay(), expected));
}

#[test]
fn test_overtime_minutes_round_to_nearest_minute() {
    let entries = long_week();
    // 45h worked, threshold 44.99h → 0.6 minutes over → 1 minute
    let report = allocate(&entries, &rates(), &PaySettings::new(44.99, 1.25));

    let assigned: i64 = report.entries.iter().map(|p| p.overtime_minutes).sum();
    assert_eq!(assigned, 1);
    assert_eq!(report.for_entry(5).map(|p| p.overtime_minutes), Some(1));
}

#[test]
fn test_weeks_are_allocated_independently() {
    let mut entries = Vec::new();
    // 30h in week 36, 30h in week 37: 60h total but never over 40 in one week
    for (i, date) in ["2025-09-04", "2025-09-05", "2025-09-06"].iter().enumerate() {
        entries.push(entry(i as i64 + 1, date, "default", &[("08:00", "18:00")]));
    }
    for (i, date) in ["2025-09-08", "2025-09-09", "2025-09-10"].iter().enumerate() {
        entries.push(entry(i as i64 + 10, date, "default", &[("08:00", "18:00")]));
    }

    let report = allocate(&entries, &rates(), &PaySettings::default());

    assert_eq!(report.weeks.len(), 2);
    assert_eq!(report.weeks[0].week_start, d("2025-09-01"));
    assert_eq!(report.weeks[1].week_start, d("2025-09-08"));
    assert!(report.entries.iter().all(|p| p.overtime_minutes == 0));
    assert!(approx(report.total_pay(), 600.0));
}

#[test]
fn test_sunday_belongs_to_the_week_that_started_monday() {
    assert_eq!(week_start(d("2025-09-07")), d("2025-09-01"));
    assert_eq!(week_start(d("2025-09-08")), d("2025-09-08"));
}

#[test]
fn test_invalid_blocks_are_excluded_without_side_effects() {
    let base = long_week();

    let mut with_junk = base.clone();
    let mut junk = Entry::new(
        d("2025-09-05"),
        "default",
        vec![
            TimeBlock {
                start: Some(t("19:00")),
                end: None,
            },
            TimeBlock {
                start: None,
                end: Some(t("20:00")),
            },
            TimeBlock::new(t("21:00"), t("21:00")),
        ],
    );
    junk.id = 99;
    with_junk.push(junk);

    let settings = PaySettings::default();
    let clean = allocate(&base, &rates(), &settings);
    let dirty = allocate(&with_junk, &rates(), &settings);

    let junk_pay = dirty.for_entry(99).expect("junk entry");
    assert_eq!(junk_pay.minutes, 0);
    assert!(approx(junk_pay.pay, 0.0));

    for p in &clean.entries {
        assert_eq!(dirty.for_entry(p.entry_id), Some(p));
    }
}

#[test]
fn test_block_crossing_midnight() {
    let entries = vec![entry(1, "2025-09-01", "night", &[("22:00", "02:30")])];

    let report = allocate(&entries, &rates(), &PaySettings::default());

    assert_eq!(report.entries[0].minutes, 270);
    assert!(approx(report.entries[0].pay, 4.5 * 20.0));
}

#[test]
fn test_missing_job_counts_hours_but_pays_nothing() {
    let mut entries = long_week();
    entries.push(entry(42, "2025-09-06", "deleted-job", &[("10:00", "12:00")]));

    let report = allocate(&entries, &rates(), &PaySettings::default());

    // the orphaned Saturday block is the latest and takes 2h of the 7h overtime
    let orphan = report.for_entry(42).expect("orphan");
    assert_eq!(orphan.minutes, 120);
    assert_eq!(orphan.overtime_minutes, 120);
    assert!(approx(orphan.pay, 0.0));

    let friday = report.for_entry(5).expect("friday");
    assert_eq!(friday.overtime_minutes, 300);
}

#[test]
fn test_rate_lookup_from_jobs_slice() {
    let jobs = vec![Job::new("default", "Work", 12.0)];
    let entries = vec![entry(1, "2025-09-01", "default", &[("09:00", "10:00")])];

    let report = allocate(&entries, &jobs, &PaySettings::default());
    assert!(approx(report.entries[0].pay, 12.0));

    let report = allocate(&entries, jobs.as_slice(), &PaySettings::default());
    assert!(approx(report.entries[0].pay, 12.0));
}

#[test]
fn test_allocation_is_idempotent() {
    let entries = long_week();
    let settings = PaySettings::default();

    let first = allocate(&entries, &rates(), &settings);
    let second = allocate(&entries, &rates(), &settings);
    assert_eq!(first, second);
}

#[test]
fn test_flatten_orders_by_date_then_start() {
    let entries = vec![
        entry(1, "2025-09-02", "default", &[("13:00", "15:00"), ("08:00", "12:00")]),
        entry(2, "2025-09-01", "default", &[("09:00", "10:00")]),
    ];

    let blocks = flatten(&entries, &rates(), &PaySettings::default());

    let order: Vec<(usize, String)> = blocks
        .iter()
        .map(|b| (b.entry, b.start.format("%H:%M").to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            (1, "09:00".to_string()),
            (0, "08:00".to_string()),
            (0, "13:00".to_string()),
        ]
    );
}

#[test]
fn test_break_is_taken_from_last_blocks() {
    let settings = PaySettings {
        break_minutes: 30,
        ..PaySettings::default()
    };

    let mut minutes = vec![240, 20];
    adjust_entry_minutes(&mut minutes, &settings);
    assert_eq!(minutes, vec![230, 0]);

    let entries = vec![entry(1, "2025-09-01", "default", &[("09:00", "17:00")])];
    let report = allocate(&entries, &rates(), &settings);
    assert_eq!(report.entries[0].minutes, 450);
    assert!(approx(report.entries[0].pay, 75.0));
}

#[test]
fn test_rounding_to_quarter_hours() {
    let settings = PaySettings {
        rounding_minutes: 15,
        ..PaySettings::default()
    };

    let mut down = vec![472];
    adjust_entry_minutes(&mut down, &settings);
    assert_eq!(down, vec![465]);

    let mut up = vec![200, 273];
    adjust_entry_minutes(&mut up, &settings);
    assert_eq!(up, vec![200, 280]);
}

#[test]
fn test_break_never_goes_negative() {
    let settings = PaySettings {
        break_minutes: 60,
        ..PaySettings::default()
    };

    let entries = vec![entry(1, "2025-09-01", "default", &[("09:00", "09:30")])];
    let report = allocate(&entries, &rates(), &settings);

    assert_eq!(report.entries[0].minutes, 0);
    assert!(approx(report.entries[0].pay, 0.0));
    assert!(report.weeks.is_empty());
}

#[test]
fn test_overtime_never_exceeds_worked_minutes() {
    let mut week = vec![
        flat(0, "2025-09-01", "09:00", 240, 10.0),
        flat(1, "2025-09-02", "09:00", 180, 10.0),
    ];
    // a negative threshold asks for more overtime than was worked
    let settings = PaySettings::new(-10.0, 1.25);

    allocate_overtime(&mut week, &settings);

    let assigned: i64 = week.iter().map(|b| b.overtime_minutes).sum();
    assert_eq!(assigned, 420);
    for b in &week {
        assert_eq!(b.overtime_minutes, b.minutes);
        assert_eq!(b.regular_minutes(), 0);
    }

    let entries = vec![entry(1, "2025-09-01", "default", &[("09:00", "13:00")])];
    let report = allocate(&entries, &rates(), &settings);
    assert_eq!(report.entries[0].overtime_minutes, 240);
    assert!(approx(report.entries[0].pay, 4.0 * 10.0 * 1.25));
}

#[test]
fn test_break_comes_off_latest_block_whatever_the_typed_order() {
    let settings = PaySettings {
        break_minutes: 60,
        ..PaySettings::default()
    };
    let entries = vec![entry(
        1,
        "2025-09-01",
        "default",
        &[("13:00", "15:00"), ("08:00", "09:00")],
    )];

    let blocks = flatten(&entries, &rates(), &settings);

    let split: Vec<(String, i64)> = blocks
        .iter()
        .map(|b| (b.start.format("%H:%M").to_string(), b.minutes))
        .collect();
    assert_eq!(
        split,
        vec![("08:00".to_string(), 60), ("13:00".to_string(), 60)]
    );
}
