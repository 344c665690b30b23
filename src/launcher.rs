use colored::*;
use serde::Serialize;
use std::fs;
use std::path::*;

use crate::backend::Backend;
use crate::config::{expand_home, LaunchConfig};
use crate::error::*;
use crate::verify::{verify, Mismatch};
use crate::workload::Workload;

/// Summary of one launch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub backend: String,
    pub size: usize,
    pub seed: u64,
    pub mismatches: usize,
    pub first_mismatches: Vec<Mismatch>,
    pub kernel_time_ms: Option<f64>,
    /// Leading `(a, b, c)` triples
    pub sample: Vec<(i32, i32, i32)>,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }

    /// Turn a run with mismatches into `VerificationFailure`
    pub fn into_result(self) -> Result<Self> {
        if self.passed() {
            Ok(self)
        } else {
            Err(LaunchError::VerificationFailure {
                mismatches: self.mismatches,
                size: self.size,
            })
        }
    }

    pub fn pass_line(&self) -> String {
        format!("TEST PASSED (size={})", self.size)
    }

    pub fn timing_line(&self) -> Option<String> {
        self.kernel_time_ms
            .map(|ms| format!("Kernel time: {:.3} ms", ms))
    }

    pub fn sample_line(&self) -> String {
        let mut line = "Sample results:".to_string();
        for (a, b, c) in &self.sample {
            line.push_str(&format!(" {}+{}={}", a, b, c));
        }
        line
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).log(Step::Config, "Cannot serialize report")
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = expand_home(path);
        fs::write(&path, self.to_json()?)
            .log(Step::Config, &format!("Cannot write report {}", path.display()))
    }
}

/// Generate inputs, run them through `backend`, and verify the output
///
/// The leading `max_reported_mismatches` mismatches are printed on stderr;
/// the report counts all of them. Only infrastructure failures are `Err`.
pub fn run<B: Backend>(backend: &mut B, cfg: &LaunchConfig, size: usize) -> Result<Report> {
    let mut workload = Workload::from_config(size, cfg);
    info!("Running {} elements on {}", size, backend.describe());
    let kernel_time_ms = backend.execute(&mut workload)?;

    let verification = verify(&workload, cfg.max_reported_mismatches);
    for m in &verification.first {
        eprintln!("{}", m);
    }
    if !verification.passed() {
        warn!("{} mismatches out of {}", verification.mismatches, size);
    }

    let sample = (0..size.min(cfg.sample_len))
        .map(|i| (workload.a[i], workload.b[i], workload.c[i]))
        .collect();
    Ok(Report {
        backend: backend.describe(),
        size,
        seed: cfg.seed,
        mismatches: verification.mismatches,
        first_mismatches: verification.first,
        kernel_time_ms,
        sample,
    })
}

/// Progress line on stderr, e.g. `   Verifying 1024 elements`
pub fn status(quiet: bool, verb: &str, message: &str) {
    if !quiet {
        eprintln!("{:>12} {}", verb.bright_green(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Simulator;

    #[test]
    fn simulate_pass() {
        let cfg = LaunchConfig::default();
        let report = run(&mut Simulator::new(), &cfg, 5).unwrap();
        assert!(report.passed());
        assert_eq!(report.size, 5);
        assert_eq!(report.sample.len(), 5);
        assert_eq!(report.pass_line(), "TEST PASSED (size=5)");
        assert!(report.timing_line().is_none());
        for (a, b, c) in &report.sample {
            assert_eq!(a + b, *c);
        }
    }

    #[test]
    fn sample_is_bounded_by_size() {
        let cfg = LaunchConfig::default();
        let report = run(&mut Simulator::new(), &cfg, 2).unwrap();
        assert_eq!(report.sample.len(), 2);
        let (a0, b0, c0) = report.sample[0];
        let (a1, b1, c1) = report.sample[1];
        let expected = format!("Sample results: {}+{}={} {}+{}={}", a0, b0, c0, a1, b1, c1);
        assert_eq!(report.sample_line(), expected);
    }

    #[test]
    fn timing_format() {
        let cfg = LaunchConfig::default();
        let mut report = run(&mut Simulator::new(), &cfg, 1).unwrap();
        report.kernel_time_ms = Some(1.23456);
        assert_eq!(report.timing_line().unwrap(), "Kernel time: 1.235 ms");
    }

    #[test]
    fn json_report() {
        let cfg = LaunchConfig::default();
        let report = run(&mut Simulator::new(), &cfg, 3).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["size"], 3);
        assert_eq!(value["mismatches"], 0);
        assert_eq!(value["backend"], "host simulation");
        assert!(value["kernel_time_ms"].is_null());
    }
}
