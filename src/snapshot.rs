use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::report::SimulationReport;

/// Persists every `interval_runs`-th report as pretty JSON under
/// `<output_dir>/<scenario>/run_NNNNNN.json`. An interval of 0 disables output.
pub struct ReportWriter {
    output_dir: PathBuf,
    interval_runs: u64,
}

impl ReportWriter {
    pub fn new(output_dir: impl AsRef<Path>, interval_runs: u64) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            interval_runs,
        }
    }

    pub fn maybe_write(&self, report: &SimulationReport) -> Result<Option<PathBuf>> {
        if self.interval_runs == 0 || report.run % self.interval_runs != 0 {
            return Ok(None);
        }

        let dir = self.output_dir.join(&report.scenario);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
        let path = dir.join(format!("run_{:06}.json", report.run));
        let json = serde_json::to_string_pretty(report)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        Ok(Some(path))
    }
}
