//! Profiling bootstrap for exitkit.
//!
//! [`configure_profiling`] is called once at start-up. It opens the profile
//! destinations, starts the profilers, and registers the hooks that finish
//! the profiles when the exit hook registry drains.
//!
//! ## Key Components
//!
//! - **`config`**: `ProfilingConfig`, the three profiling settings.
//! - **`backend`**: `ProfilerBackend`, the seam to the profiling subsystem.
//! - **`bootstrap`**: `configure_profiling`, the sequencing logic.
//! - **`system`**: `SystemProfiler`, pprof for CPU and jemalloc for heap.

pub mod backend;
pub mod bootstrap;
pub mod config;
pub mod cpu;
pub mod heap;
pub mod system;

pub use backend::ProfilerBackend;
pub use bootstrap::configure_profiling;
pub use config::ProfilingConfig;
pub use system::SystemProfiler;
