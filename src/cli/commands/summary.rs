use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::colors::{CYAN, GREEN, RESET};
use crate::utils::date;
use crate::utils::formatting::fmt_hours;
use crate::utils::fmt_money;
use chrono::{Datelike, NaiveDate};

fn parse_month_arg(m: &str) -> AppResult<(i32, u32)> {
    date::parse_month(m).ok_or_else(|| AppError::InvalidDate(m.to_string()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { month, at } = cmd {
        let pool = DbPool::from_config(cfg)?;
        let ledger = Core::build_ledger(&pool, &cfg.pay_settings())?;

        let day: NaiveDate = match at {
            Some(a) => date::parse_date(a).ok_or_else(|| AppError::InvalidDate(a.clone()))?,
            None => date::today(),
        };
        let (year, mon) = match month {
            Some(m) => parse_month_arg(m)?,
            None => (day.year(), day.month()),
        };

        let totals = ledger.month_totals(year, mon);
        header(totals.label());
        println!(
            "{}Hours:{} {} | {}Pay:{} {}{}{} | {}Worked days:{} {}",
            CYAN,
            RESET,
            fmt_hours(totals.hours()),
            CYAN,
            RESET,
            GREEN,
            fmt_money(totals.pay, &cfg.currency),
            RESET,
            CYAN,
            RESET,
            totals.worked_days
        );

        // the projection only makes sense while the month is running
        if day.year() == year && day.month() == mon {
            let p = ledger.projection(day);
            println!(
                "{}Projection at {}:{} avg/day {} x {} remaining weekdays → {}{}{}",
                CYAN,
                p.today,
                RESET,
                fmt_money(p.avg_daily_pay, &cfg.currency),
                p.remaining_weekdays,
                GREEN,
                fmt_money(p.projected_pay, &cfg.currency),
                RESET
            );
        }
    }
    Ok(())
}
