//! Plain-text report writing.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::AppError;
use crate::models::JobCandidate;

/// Default report location: `job_results/job_results_<timestamp>.txt`.
pub fn default_report_path() -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from("job_results").join(format!("job_results_{stamp}.txt"))
}

/// Write the final report, creating parent directories as needed.
pub fn write_report(jobs: &[JobCandidate], path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Job Search Results - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    out.push_str(&"=".repeat(60));
    out.push_str("\n\n");

    if jobs.is_empty() {
        out.push_str("No jobs found matching your criteria.\n");
    } else {
        for (i, job) in jobs.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, job.title);
            let _ = writeln!(out, "   Source: {}", job.source_url);
            let _ = writeln!(out, "   Apply: {}", job.url);
            let _ = writeln!(
                out,
                "   Matched Keywords: {}",
                job.matched_keywords.join(", ")
            );
            out.push_str(&"-".repeat(40));
            out.push('\n');
        }
    }

    fs::write(path, out)?;
    tracing::info!(path = %path.display(), jobs = jobs.len(), "report written");
    Ok(())
}
