use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::job::JobLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::job::Job;
use crate::ui::messages::{success, warning};
use crate::utils::fmt_money;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Job {
        list,
        add,
        rate,
        id,
        del,
    } = cmd
    {
        let mut pool = DbPool::from_config(cfg)?;

        if let Some(name) = add {
            let job = JobLogic::add(
                &mut pool,
                name,
                rate.unwrap_or(cfg.default_rate),
                id.as_deref(),
            )?;
            success(format!(
                "Job '{}' created with id '{}' at {}/h.",
                job.name,
                job.id,
                fmt_money(job.rate, &cfg.currency)
            ));
        }

        if let Some(job_id) = del {
            let orphaned = JobLogic::delete(&mut pool, job_id)?;
            success(format!("Job '{}' deleted.", job_id));
            if orphaned > 0 {
                warning(format!(
                    "{} entries still reference '{}' and now count at a zero rate.",
                    orphaned, job_id
                ));
            }
        }

        if *list || (add.is_none() && del.is_none()) {
            print_jobs(&JobLogic::list(&pool)?, &cfg.currency);
        }
    }

    Ok(())
}

fn print_jobs(jobs: &[Job], currency: &str) {
    if jobs.is_empty() {
        println!("No jobs defined.");
        return;
    }

    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("NAME"),
        Column::right("RATE/H"),
    ]);
    for j in jobs {
        table.add_row(vec![
            j.id.clone(),
            j.name.clone(),
            fmt_money(j.rate, currency),
        ]);
    }
    print!("{}", table.render());
}
