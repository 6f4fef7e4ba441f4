//! Wall-clock trial driver.
//!
//! A lightweight measurement collaborator for quick rankings from the command
//! line. For statistically careful numbers use the `divan` bench target
//! (`cargo bench --bench map_ops`), which drives the same harness entry points.
//!
//! One trial: set up a [`WorkloadContext`] (untimed), run `warmup`
//! invocations, time `iterations` invocations, tear down (untimed). Every
//! invocation gets a fresh backend.

use std::fmt::Write as FmtWrite;
use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::backend::{
    ArrayMap, DashMapBackend, HashbrownMap, MapBackend, PapayaBackend, SkipMapBackend, StdBTreeMap,
    StdHashMap, Synchronized, SyncPolicy, TreeIndexBackend, Unlocked,
};
use crate::context::WorkloadContext;
use crate::error::ConfigError;
use crate::harness::{self, Outcome};
use crate::profile::Profile;
use crate::tracing_helpers::{info_log, warn_log};
use crate::workload::Operation;

/// Default number of timed invocations per trial.
pub const DEFAULT_ITERATIONS: usize = 10;

/// Default number of untimed warm-up invocations per trial.
pub const DEFAULT_WARMUP: usize = 2;

// ============================================================================
//  TrialConfig
// ============================================================================

/// Iteration policy for one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialConfig {
    iterations: usize,
    warmup: usize,
    validate_copy: bool,
    seed: Option<u64>,
}

impl TrialConfig {
    /// `iterations` timed invocations with default warm-up.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroIterations`] if `iterations == 0`.
    pub const fn new(iterations: usize) -> Result<Self, ConfigError> {
        if iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(Self {
            iterations,
            warmup: DEFAULT_WARMUP,
            validate_copy: true,
            seed: None,
        })
    }

    /// Parse an iteration count from a command-line argument.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if `raw` is not a positive integer.
    pub fn parse_iterations(raw: &str) -> Result<Self, ConfigError> {
        let n: usize = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidIterations(raw.to_string()))?;
        Self::new(n)
    }

    /// Set the number of untimed warm-up invocations.
    #[must_use]
    pub const fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Check the size of every Copy duplicate against the fixture size.
    #[must_use]
    pub const fn with_copy_validation(mut self, enabled: bool) -> Self {
        self.validate_copy = enabled;
        self
    }

    /// Pin the trial seed. Unpinned trials draw from OS entropy.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Timed invocations per trial.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Untimed invocations per trial.
    #[must_use]
    pub const fn warmup(&self) -> usize {
        self.warmup
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            warmup: DEFAULT_WARMUP,
            validate_copy: true,
            seed: None,
        }
    }
}

// ============================================================================
//  TrialReport
// ============================================================================

/// Timing summary for one (backend × operation) trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialReport {
    /// Backend label.
    pub backend: String,
    /// Backend sync policy.
    pub policy: SyncPolicy,
    /// Sequence that was run.
    pub operation: Operation,
    /// Profile name.
    pub profile: &'static str,
    /// Fixture size `N`.
    pub fixture_size: usize,
    /// Timed invocations.
    pub iterations: usize,
    /// Sum of timed invocations.
    pub total: Duration,
    /// Fastest invocation.
    pub min: Duration,
    /// Slowest invocation.
    pub max: Duration,
    /// Copy runs only: whether every duplicate held exactly `N` entries.
    pub copy_valid: Option<bool>,
}

impl TrialReport {
    /// Mean time per invocation.
    #[must_use]
    pub fn mean(&self) -> Duration {
        let n = u32::try_from(self.iterations).unwrap_or(u32::MAX).max(1);
        self.total / n
    }

    /// Mean nanoseconds per backend call.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn ns_per_call(&self) -> f64 {
        let calls = self.operation.call_count(self.fixture_size).max(1);
        self.mean().as_nanos() as f64 / calls as f64
    }
}

// ============================================================================
//  Running
// ============================================================================

/// Run one trial of `op` against backend `B`.
pub fn run_trial<B: MapBackend>(op: Operation, profile: Profile, config: &TrialConfig) -> TrialReport {
    let mut ctx = match config.seed {
        Some(seed) => WorkloadContext::setup_seeded(profile, seed),
        None => WorkloadContext::setup(profile),
    };
    let expected_len = ctx.len();

    for _ in 0..config.warmup {
        black_box(harness::run::<B, _>(op, &mut ctx));
    }

    let mut total = Duration::ZERO;
    let mut min = Duration::MAX;
    let mut max = Duration::ZERO;
    let mut copy_valid = (op == Operation::Copy && config.validate_copy).then_some(true);

    for _ in 0..config.iterations {
        let start = Instant::now();
        let outcome = harness::run::<B, _>(op, &mut ctx);
        let elapsed = start.elapsed();

        total += elapsed;
        min = min.min(elapsed);
        max = max.max(elapsed);

        if let (Some(valid), Outcome::Copied { duplicate, .. }) = (copy_valid.as_mut(), &outcome) {
            if duplicate.len() != expected_len {
                warn_log!(
                    backend = %B::label(),
                    expected = expected_len,
                    actual = duplicate.len(),
                    "duplicate size mismatch"
                );
                *valid = false;
            }
        }
        drop(outcome);
    }

    let report = TrialReport {
        backend: B::label(),
        policy: B::SYNC,
        operation: op,
        profile: profile.name(),
        fixture_size: expected_len,
        iterations: config.iterations,
        total,
        min,
        max,
        copy_valid,
    };

    info_log!(
        backend = %report.backend,
        operation = op.name(),
        mean_us = report.mean().as_micros(),
        "trial complete"
    );

    ctx.teardown();
    report
}

/// Run every operation against backend `B`, appending to `reports`.
pub fn run_backend<B: MapBackend>(profile: Profile, config: &TrialConfig, reports: &mut Vec<TrialReport>) {
    for op in Operation::ALL {
        reports.push(run_trial::<B>(op, profile, config));
    }
}

/// Run every operation against every shipped backend.
///
/// The `map_ops` bench groups cover the same backends.
pub fn run_all(profile: Profile, config: &TrialConfig) -> Vec<TrialReport> {
    let mut reports = Vec::new();

    run_backend::<StdHashMap>(profile, config, &mut reports);
    run_backend::<Unlocked<StdHashMap>>(profile, config, &mut reports);
    run_backend::<Synchronized<StdHashMap>>(profile, config, &mut reports);
    run_backend::<StdBTreeMap>(profile, config, &mut reports);
    run_backend::<HashbrownMap>(profile, config, &mut reports);
    run_backend::<Synchronized<HashbrownMap>>(profile, config, &mut reports);
    run_backend::<ArrayMap>(profile, config, &mut reports);
    run_backend::<DashMapBackend>(profile, config, &mut reports);
    run_backend::<PapayaBackend>(profile, config, &mut reports);
    run_backend::<SkipMapBackend>(profile, config, &mut reports);
    run_backend::<TreeIndexBackend>(profile, config, &mut reports);

    reports
}

/// Render reports as a table, grouped by operation and ranked by mean time.
#[must_use]
pub fn format_table(reports: &[TrialReport]) -> String {
    let mut sorted: Vec<&TrialReport> = reports.iter().collect();
    sorted.sort_by(|a, b| a.operation.cmp(&b.operation).then(a.mean().cmp(&b.mean())));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<34} {:<16} {:>12} {:>12} {:>10}  {}",
        "operation", "backend", "policy", "mean", "min", "ns/call", "copy"
    );
    let _ = writeln!(out, "{}", "-".repeat(108));

    let mut current = None;
    for r in sorted {
        if current.is_some_and(|op| op != r.operation) {
            out.push('\n');
        }
        current = Some(r.operation);

        let copy = match r.copy_valid {
            Some(true) => "ok",
            Some(false) => "MISMATCH",
            None => "-",
        };
        let _ = writeln!(
            out,
            "{:<12} {:<34} {:<16} {:>12} {:>12} {:>10.1}  {}",
            r.operation.name(),
            r.backend,
            r.policy.name(),
            format_duration(r.mean()),
            format_duration(r.min),
            r.ns_per_call(),
            copy
        );
    }
    out
}

#[expect(clippy::cast_precision_loss)]
fn format_duration(d: Duration) -> String {
    let ns = d.as_nanos();
    if ns >= 1_000_000 {
        format!("{:.2} ms", ns as f64 / 1e6)
    } else if ns >= 1_000 {
        format!("{:.2} us", ns as f64 / 1e3)
    } else {
        format!("{ns} ns")
    }
}
