//! Start-up sequencing for CPU and heap profiles

use crate::backend::ProfilerBackend;
use crate::config::ProfilingConfig;
use exitkit_core::{Error, IoResultExt, Result, ResultExt};
use exitkit_utils::ExitHooks;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Start the profiles named in `config` and register their teardown with `hooks`.
///
/// Each profile registers its hook only once it has started, so a failed start
/// never schedules a stop. CPU is configured before heap; at drain time the
/// heap snapshot is therefore taken first, while CPU sampling is still on.
///
/// Errors are configuration errors: the host is expected to hand them to
/// [`exitkit_core::fatal::abort`].
pub fn configure_profiling(
    config: &ProfilingConfig,
    backend: Arc<dyn ProfilerBackend>,
    hooks: &ExitHooks,
) -> Result<()> {
    if let Some(path) = config.cpu_profile() {
        configure_cpu(path, &backend, hooks)?;
    }
    if let Some(path) = config.heap_profile() {
        configure_heap(path, config.heap_sample_rate, &backend, hooks)?;
    }
    Ok(())
}

fn configure_cpu(
    path: &Path,
    backend: &Arc<dyn ProfilerBackend>,
    hooks: &ExitHooks,
) -> Result<()> {
    let output = create_profile(path)?;
    backend
        .start_cpu_profile(output)
        .with_context(|| format!("cannot start CPU profile '{}'", path.display()))?;

    let backend = Arc::clone(backend);
    let path_display = path.display().to_string();
    hooks.register(move || {
        tracing::debug!(path = %path_display, "stopping CPU profile");
        backend
            .stop_cpu_profile()
            .map_err(|e| Error::hook_failed(format!("writing CPU profile '{path_display}': {e}")))
    });

    tracing::info!(path = %path.display(), "CPU profiling enabled");
    Ok(())
}

fn configure_heap(
    path: &Path,
    sample_rate: u64,
    backend: &Arc<dyn ProfilerBackend>,
    hooks: &ExitHooks,
) -> Result<()> {
    // The rate only affects allocations made after it is set
    if sample_rate != 0 {
        backend
            .set_heap_sample_rate(sample_rate)
            .with_context(|| format!("cannot set heap sampling rate to {sample_rate}"))?;
    }

    let mut output = create_profile(path)?;
    backend
        .start_heap_profile()
        .with_context(|| format!("cannot start heap profile '{}'", path.display()))?;

    let backend = Arc::clone(backend);
    let path_display = path.display().to_string();
    hooks.register(move || {
        tracing::debug!(path = %path_display, "writing heap profile");
        backend
            .collect_garbage()
            .and_then(|()| backend.write_heap_profile(&mut output))
            .map_err(|e| Error::hook_failed(format!("writing heap profile '{path_display}': {e}")))
    });

    tracing::info!(path = %path.display(), sample_rate, "heap profiling enabled");
    Ok(())
}

fn create_profile(path: &Path) -> Result<File> {
    File::create(path)
        .fs_context(path, "create profile")
        .with_context(|| format!("cannot open profile destination '{}'", path.display()))
}
