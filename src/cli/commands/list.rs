use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::{Core, Ledger};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entry::week_label;
use crate::utils::colors::{RESET, color_for_overtime, colorize_optional};
use crate::utils::date::{self, DateRange};
use crate::utils::formatting::fmt_hours;
use crate::utils::table::{Column, Table};
use crate::utils::{fmt_money, mins2readable};
use chrono::Duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, job, weeks } = cmd {
        let pool = DbPool::from_config(cfg)?;
        let range = resolve_period(period)?;

        // Pay is allocated over everything so weeks cut by the range stay correct.
        let ledger = Core::build_ledger(&pool, &cfg.pay_settings())?;

        let selected: Vec<usize> = ledger
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| range.is_none_or(|r| r.contains(e.date)))
            .filter(|(_, e)| job.as_ref().is_none_or(|j| &e.job_id == j))
            .map(|(i, _)| i)
            .collect();

        if selected.is_empty() {
            println!("No entries found.");
            return Ok(());
        }

        print_entries(&ledger, &selected, cfg);

        if *weeks {
            print_weeks(&ledger, range, cfg);
        }
    }
    Ok(())
}

/// `None` means every stored entry.
fn resolve_period(period: &Option<String>) -> AppResult<Option<DateRange>> {
    let Some(p) = period else {
        return date::current_month().map(Some).map_err(AppError::InvalidDate);
    };

    if p == "all" {
        return Ok(None);
    }

    if let Some((start, end)) = p.split_once(':') {
        return date::range_between(start, end)
            .map(Some)
            .map_err(AppError::InvalidDate);
    }

    date::range_from_period(p)
        .map(Some)
        .map_err(AppError::InvalidDate)
}

fn print_entries(ledger: &Ledger, selected: &[usize], cfg: &Config) {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("DATE"),
        Column::left("WEEK"),
        Column::left("JOB"),
        Column::left("BLOCKS"),
        Column::right("HOURS"),
        Column::right("OVERTIME"),
        Column::right("PAY"),
        Column::left("NOTES"),
    ]);

    let mut minutes = 0;
    let mut overtime = 0;
    let mut pay = 0.0;

    for &i in selected {
        let e = &ledger.entries[i];
        let p = &ledger.report.entries[i];

        let job = ledger
            .job_name(&e.job_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} (missing)", e.job_id));
        let blocks: Vec<String> = e.blocks.iter().map(|b| b.to_string()).collect();
        let ot = mins2readable(p.overtime_minutes, false, false);

        table.add_row(vec![
            e.id.to_string(),
            e.date_str(),
            week_label(e.date),
            job,
            blocks.join(" "),
            colorize_optional(&mins2readable(p.minutes, false, false)),
            format!(
                "{}{}{}",
                color_for_overtime(p.overtime_minutes),
                colorize_optional(&ot),
                RESET
            ),
            fmt_money(p.pay, &cfg.currency),
            e.notes.clone(),
        ]);

        minutes += p.minutes;
        overtime += p.overtime_minutes;
        pay += p.pay;
    }

    print!("{}", table.render());
    println!(
        "\nTotal: {} entries | {}h ({}) | overtime {} | {}",
        selected.len(),
        fmt_hours(minutes as f64 / 60.0),
        mins2readable(minutes, false, false),
        mins2readable(overtime, false, false),
        fmt_money(pay, &cfg.currency)
    );
}

fn print_weeks(ledger: &Ledger, range: Option<DateRange>, cfg: &Config) {
    let mut table = Table::new(vec![
        Column::left("WEEK"),
        Column::left("FROM"),
        Column::right("HOURS"),
        Column::right("OVERTIME"),
        Column::right("REGULAR"),
        Column::right("OT PAY"),
        Column::right("TOTAL"),
    ]);

    for w in &ledger.report.weeks {
        let week_end = w.week_start + Duration::days(6);
        if !range.is_none_or(|r| w.week_start <= r.end && week_end >= r.start) {
            continue;
        }

        table.add_row(vec![
            week_label(w.week_start),
            w.week_start.format("%Y-%m-%d").to_string(),
            fmt_hours(w.hours()),
            mins2readable(w.overtime_minutes, false, false),
            fmt_money(w.regular_pay, &cfg.currency),
            fmt_money(w.overtime_pay, &cfg.currency),
            fmt_money(w.pay(), &cfg.currency),
        ]);
    }

    println!(
        "\nWeekly breakdown (threshold {}h, x{}):",
        cfg.overtime_threshold_hours, cfg.overtime_multiplier
    );
    print!("{}", table.render());
}
