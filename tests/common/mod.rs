//! Shared test utilities: tracing setup and a call-recording backend.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//!
//! #[test]
//! fn my_test() {
//!     common::init_tracing();
//!     // ... test code with tracing::info!, tracing::debug!, etc.
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Filter directives (e.g., `mapbench=debug,mapbench::harness=trace`)
//! - `MAPBENCH_LOG_DIR`: Log directory (default: `logs/`)
//! - `MAPBENCH_LOG_CONSOLE`: Set to "0" to disable console output
//!
//! Logs are appended to `logs/mapbench.jsonl` as newline-delimited JSON.
//! Crate-internal events only appear with `--features tracing`.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Once;

use mapbench::{Key, MapBackend, SyncPolicy, Value};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

// ============================================================================
//  Tracing
// ============================================================================

/// Ensures tracing is only initialized once across all tests.
static INIT: Once = Once::new();

/// Initialize the tracing subscriber with file and console logging.
///
/// Safe to call multiple times - only the first call takes effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        setup_tracing();
    });
}

/// Configuration for tracing setup.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Directory for log files.
    pub log_dir: PathBuf,
    /// Log file name.
    pub log_file: String,
    /// Enable console output.
    pub console_enabled: bool,
    /// Default log level if RUST_LOG is not set.
    pub default_level: Level,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file: "mapbench.jsonl".to_string(),
            console_enabled: true,
            default_level: Level::INFO,
        }
    }
}

impl TracingConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("MAPBENCH_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }

        if env::var("MAPBENCH_LOG_CONSOLE").is_ok_and(|v| v == "0") {
            config.console_enabled = false;
        }

        config
    }
}

fn make_filter(default_level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{default_level}")))
}

fn setup_tracing() {
    let config = TracingConfig::from_env();

    let console_layer = config.console_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .compact()
            .with_filter(make_filter(config.default_level))
    });

    // A missing or read-only log directory only loses the file layer.
    let file_layer = std::fs::create_dir_all(&config.log_dir)
        .and_then(|()| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(config.log_dir.join(&config.log_file))
        })
        .ok()
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(make_filter(config.default_level))
        });

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

// ============================================================================
//  Recording backend
// ============================================================================

/// One call made against a [`Recording`] backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Put(Key),
    Get(Key),
    Remove(Key),
    Duplicate,
}

/// `HashMap` backend that logs every call in order.
#[derive(Debug, Default, Clone)]
pub struct Recording {
    pub map: HashMap<Key, Value>,
    pub calls: RefCell<Vec<Call>>,
}

impl Recording {
    /// Calls made so far.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Keys passed to `get`, in order.
    pub fn gets(&self) -> Vec<Key> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Get(k) => Some(*k),
                _ => None,
            })
            .collect()
    }
}

impl MapBackend for Recording {
    const NAME: &'static str = "recording";
    const SYNC: SyncPolicy = SyncPolicy::ExternalLock;

    fn new() -> Self {
        Self::default()
    }

    fn put(&mut self, key: Key, value: Value) {
        self.calls.get_mut().push(Call::Put(key));
        self.map.insert(key, value);
    }

    fn get(&self, key: Key) -> Option<Value> {
        self.calls.borrow_mut().push(Call::Get(key));
        self.map.get(&key).cloned()
    }

    fn remove(&mut self, key: Key) {
        self.calls.get_mut().push(Call::Remove(key));
        self.map.remove(&key);
    }

    fn duplicate(&self) -> Self {
        self.calls.borrow_mut().push(Call::Duplicate);
        Self {
            map: self.map.clone(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_init() {
        init_tracing();
        tracing::info!("Tracing initialized successfully");
        tracing::debug!(key = 7, "Debug event");
    }
}
