use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{count_entries_for_job, delete_job, find_job, insert_job, load_jobs};
use crate::errors::{AppError, AppResult};
use crate::models::job::Job;

pub struct JobLogic;

impl JobLogic {
    pub fn list(pool: &DbPool) -> AppResult<Vec<Job>> {
        load_jobs(&pool.conn)
    }

    /// Create a job. Without an explicit id one is derived from the name,
    /// suffixed (`-2`, `-3`, ...) until it is free.
    pub fn add(pool: &mut DbPool, name: &str, rate: f64, id: Option<&str>) -> AppResult<Job> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(AppError::InvalidRate(rate.to_string()));
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("job name must not be empty".to_string()));
        }

        let id = match id {
            Some(explicit) => {
                let explicit = explicit.trim();
                if find_job(&pool.conn, explicit)?.is_some() {
                    return Err(AppError::JobExists(explicit.to_string()));
                }
                explicit.to_string()
            }
            None => {
                let base = Job::slug(name);
                let mut candidate = base.clone();
                let mut n = 2;
                while find_job(&pool.conn, &candidate)?.is_some() {
                    candidate = format!("{}-{}", base, n);
                    n += 1;
                }
                candidate
            }
        };

        let job = Job::new(id, name, rate);
        insert_job(&pool.conn, &job)?;
        ttlog(
            &pool.conn,
            "job_add",
            &job.id,
            &format!("{} at {:.2}/h", job.name, job.rate),
        )?;

        Ok(job)
    }

    /// Delete a job. Entries that still reference it are kept and will pay
    /// nothing; their count is returned.
    pub fn delete(pool: &mut DbPool, id: &str) -> AppResult<i64> {
        if delete_job(&pool.conn, id)? == 0 {
            return Err(AppError::JobNotFound(id.to_string()));
        }

        let orphaned = count_entries_for_job(&pool.conn, id)?;
        ttlog(
            &pool.conn,
            "job_del",
            id,
            &format!("{} entries left without a rate", orphaned),
        )?;

        Ok(orphaned)
    }
}
