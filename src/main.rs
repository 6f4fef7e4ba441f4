//! Rank every shipped backend on every sequence.
//!
//! Run with:
//! ```bash
//! cargo run --release -- [small|large] [iterations]
//! RUST_LOG=mapbench=info cargo run --release --features tracing -- large 5
//! MAPBENCH_PROFILE=large MAPBENCH_FIXTURE_SIZE=10000 cargo run --release
//! ```
//!
//! Arguments override the environment. Defaults: profile from
//! `MAPBENCH_PROFILE` (else `small`), 10 timed iterations.

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use mapbench::driver::{self, TrialConfig};
use mapbench::{ConfigError, Profile};

fn parse_args(args: &[String]) -> Result<(Profile, TrialConfig), ConfigError> {
    let profile = match args.first() {
        Some(name) => name.parse()?,
        None => Profile::from_env()?,
    };

    let config = match args.get(1) {
        Some(raw) => TrialConfig::parse_iterations(raw)?,
        None => TrialConfig::default(),
    };

    Ok((profile, config))
}

fn main() {
    mapbench::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (profile, config) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("Usage: mapbench [small|large] [iterations]");
            std::process::exit(2);
        }
    };

    eprintln!("mapbench: {profile}");
    eprintln!(
        "{} timed + {} warm-up invocations per trial\n",
        config.iterations(),
        config.warmup()
    );

    let reports = driver::run_all(profile, &config);
    print!("{}", driver::format_table(&reports));

    if reports.iter().any(|r| r.copy_valid == Some(false)) {
        eprintln!("\nerror: at least one backend produced a malformed duplicate");
        std::process::exit(1);
    }
}
