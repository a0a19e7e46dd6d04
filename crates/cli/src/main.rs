use clap::Parser;
use exitkit_core::{fatal, EXIT_FAILURE, EXIT_SUCCESS};
use exitkit_core::{EXITKIT_CPUPROFILE_VAR, EXITKIT_MEMPROFILERATE_VAR, EXITKIT_MEMPROFILE_VAR};
use exitkit_profiling::{configure_profiling, ProfilingConfig, SystemProfiler};
use exitkit_utils::exit;
use std::path::PathBuf;
use std::sync::Arc;

mod commands;
mod execute;

use commands::Commands;

#[cfg(all(feature = "jemalloc", unix))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

// Profiling is compiled in and switched on at runtime by --memprofile
#[cfg(all(feature = "jemalloc", unix))]
#[allow(non_upper_case_globals)]
#[export_name = "_rjem_malloc_conf"]
pub static malloc_conf: &[u8] = b"prof:true,prof_active:false\0";

#[derive(Parser)]
#[command(name = "exitkit")]
#[command(about = "Small text utilities with profiling flushed on exit", long_about = None)]
#[command(version)]
struct Cli {
    /// Write a CPU profile to this file
    #[arg(long = "cpuprofile", value_name = "FILE", env = EXITKIT_CPUPROFILE_VAR)]
    cpu_profile: Option<PathBuf>,

    /// Write a heap profile to this file
    #[arg(long = "memprofile", value_name = "FILE", env = EXITKIT_MEMPROFILE_VAR)]
    heap_profile: Option<PathBuf>,

    /// Average bytes between heap samples (0 keeps the allocator default)
    #[arg(
        long = "memprofilerate",
        value_name = "BYTES",
        default_value = "0",
        value_parser = parse_rate,
        env = EXITKIT_MEMPROFILERATE_VAR
    )]
    heap_sample_rate: u64,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn profiling_config(&self) -> ProfilingConfig {
        ProfilingConfig {
            cpu_profile: self.cpu_profile.clone(),
            heap_profile: self.heap_profile.clone(),
            heap_sample_rate: self.heap_sample_rate,
        }
    }
}

/// Accepts the same prefixed literals as the `atoi` command
fn parse_rate(value: &str) -> Result<u64, String> {
    let rate = exitkit_utils::text::parse_int(value).map_err(|e| e.to_string())?;
    u64::try_from(rate).map_err(|_| "rate must not be negative".to_string())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = exitkit_utils::logging::init() {
        eprintln!("exitkit: failed to initialize logging: {e}");
    }
    if let Err(e) = exit::install_signal_handlers() {
        tracing::warn!(error = %e, "continuing without signal handling");
    }

    let config = cli.profiling_config();
    if !config.is_enabled() {
        tracing::debug!("no profile requested");
    }
    let backend = Arc::new(SystemProfiler::new());
    if let Err(e) = configure_profiling(&config, backend, exit::hooks()) {
        fatal::abort(&e);
    }

    let mut stdout = std::io::stdout().lock();
    let code = match cli.command.execute(&mut stdout) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("exitkit: {e}");
            EXIT_FAILURE
        }
    };
    drop(stdout);

    exit::exit(code)
}
