//! Simulated PSU firmware update job table.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;
use wedge_domain::error::RequestError;

/// Jobs retained in the table; the oldest is dropped past this.
pub const MAX_JOBS: usize = 64;

/// One submitted firmware update.
#[derive(Debug, Clone, Serialize)]
pub struct PsuJob {
    pub job_id: Uuid,
    pub file: String,
    pub status: &'static str,
    pub submitted_at: DateTime<Utc>,
    /// The job spec exactly as the client posted it.
    pub spec: Value,
}

/// In-memory list of the most recent PSU update jobs, oldest first.
#[derive(Default)]
pub struct PsuJobs {
    jobs: Mutex<VecDeque<PsuJob>>,
}

impl PsuJobs {
    #[must_use]
    pub fn list(&self) -> Vec<PsuJob> {
        self.jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Queue a job for `spec`, which must name the firmware image in `file`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::MissingField`] when `file` is absent, empty, or
    /// not a string.
    pub fn submit(&self, spec: Value) -> Result<PsuJob, RequestError> {
        let file = spec
            .get("file")
            .and_then(Value::as_str)
            .filter(|file| !file.is_empty())
            .ok_or(RequestError::MissingField("file"))?
            .to_string();

        let job = PsuJob {
            job_id: Uuid::new_v4(),
            file,
            status: "queued",
            submitted_at: Utc::now(),
            spec,
        };
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if jobs.len() == MAX_JOBS {
            jobs.pop_front();
        }
        jobs.push_back(job.clone());
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn should_start_empty() {
        assert!(PsuJobs::default().list().is_empty());
    }

    #[test]
    fn should_queue_job_with_spec() {
        let jobs = PsuJobs::default();
        let spec = json!({"file": "/tmp/psu.hex", "address": "0xa4"});
        let job = jobs.submit(spec.clone()).unwrap();

        assert_eq!(job.status, "queued");
        assert_eq!(job.file, "/tmp/psu.hex");
        assert_eq!(job.spec, spec);
        assert_eq!(jobs.list().len(), 1);
        assert_eq!(jobs.list()[0].job_id, job.job_id);
    }

    #[test]
    fn should_keep_only_most_recent_jobs() {
        let jobs = PsuJobs::default();
        for n in 0..MAX_JOBS + 3 {
            jobs.submit(json!({"file": format!("/tmp/psu-{n}.hex")}))
                .unwrap();
        }

        let list = jobs.list();
        assert_eq!(list.len(), MAX_JOBS);
        assert_eq!(list[0].file, "/tmp/psu-3.hex");
        assert_eq!(list[MAX_JOBS - 1].file, format!("/tmp/psu-{}.hex", MAX_JOBS + 2));
    }

    #[test]
    fn should_reject_spec_without_file() {
        let jobs = PsuJobs::default();
        let result = jobs.submit(json!({"address": "0xa4"}));
        assert!(matches!(result, Err(RequestError::MissingField("file"))));
        assert!(jobs.list().is_empty());
    }

    #[test]
    fn should_reject_empty_file() {
        let result = PsuJobs::default().submit(json!({"file": ""}));
        assert!(result.is_err());
    }
}
