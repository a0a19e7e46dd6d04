use exitkit_core::Result;
use std::fs::File;

/// The profiling subsystem as seen by [`configure_profiling`].
///
/// Implementations own sampling and encoding; the bootstrapper only decides
/// when each call happens.
///
/// [`configure_profiling`]: crate::configure_profiling
#[cfg_attr(test, mockall::automock)]
pub trait ProfilerBackend: Send + Sync {
    /// Begin CPU sampling; the profile is written to `output` on stop.
    fn start_cpu_profile(&self, output: File) -> Result<()>;

    /// Stop CPU sampling, then write, flush and close the profile.
    fn stop_cpu_profile(&self) -> Result<()>;

    /// Average number of allocated bytes between heap samples.
    fn set_heap_sample_rate(&self, rate: u64) -> Result<()>;

    fn start_heap_profile(&self) -> Result<()>;

    /// Settle the allocator so a snapshot holds only live allocations.
    fn collect_garbage(&self) -> Result<()>;

    fn write_heap_profile(&self, output: &mut File) -> Result<()>;
}
