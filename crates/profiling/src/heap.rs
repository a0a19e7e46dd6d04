//! Heap profiles through jemalloc's `prof.*` controls.
//!
//! Only available with the `jemalloc` feature on unix, and only useful when
//! the binary runs on jemalloc started with `prof:true`. Everywhere else the
//! operations report `Unsupported`, which the bootstrapper turns into a
//! start-up error.

use exitkit_core::{Error, Result};
use std::fs::File;

/// jemalloc samples on average once every `2^lg_prof_sample` bytes.
///
/// The largest power of two not above `rate` is used; a rate of 1 samples
/// every allocation.
pub fn lg_sample_for_rate(rate: u64) -> usize {
    rate.max(1).ilog2() as usize
}

#[derive(Debug, Default)]
pub struct HeapProfiler;

impl HeapProfiler {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(all(feature = "jemalloc", unix))]
mod imp {
    use super::*;
    use exitkit_core::IoResultExt;
    use std::ffi::CString;
    use std::io::Write;
    use std::os::unix::ffi::OsStrExt;
    use tikv_jemalloc_ctl::{epoch, raw};

    const OPT_PROF: &[u8] = b"opt.prof\0";
    const PROF_ACTIVE: &[u8] = b"prof.active\0";
    const PROF_DUMP: &[u8] = b"prof.dump\0";
    const PROF_RESET: &[u8] = b"prof.reset\0";
    const THREAD_TCACHE_FLUSH: &[u8] = b"thread.tcache.flush\0";
    // Returned by thread.tcache.flush when the thread cache is disabled
    const EFAULT: i32 = 14;

    fn ctl_error(operation: &str, e: tikv_jemalloc_ctl::Error) -> Error {
        Error::profiling(operation, e.to_string())
    }

    impl HeapProfiler {
        pub fn set_sample_rate(&self, rate: u64) -> Result<()> {
            let lg_sample = lg_sample_for_rate(rate);
            // SAFETY: prof.reset takes a size_t
            unsafe { raw::write(PROF_RESET, lg_sample) }
                .map_err(|e| ctl_error("set heap sampling rate", e))?;
            tracing::debug!(rate, lg_sample, "heap sampling rate set");
            Ok(())
        }

        pub fn start(&self) -> Result<()> {
            // SAFETY: opt.prof is a bool
            let enabled: bool = unsafe { raw::read(OPT_PROF) }
                .map_err(|e| ctl_error("query heap profiling", e))?;
            if !enabled {
                return Err(Error::unsupported(
                    "heap profiling",
                    "jemalloc was started without prof:true",
                ));
            }
            // SAFETY: prof.active is a bool
            unsafe { raw::write(PROF_ACTIVE, true) }
                .map_err(|e| ctl_error("activate heap profiling", e))
        }

        /// Return cached blocks to their arenas and refresh the statistics
        pub fn collect_garbage(&self) -> Result<()> {
            // SAFETY: thread.tcache.flush takes and returns nothing
            let rc = unsafe {
                tikv_jemalloc_sys::mallctl(
                    THREAD_TCACHE_FLUSH.as_ptr().cast(),
                    std::ptr::null_mut(),
                    std::ptr::null_mut(),
                    std::ptr::null_mut(),
                    0,
                )
            };
            if rc != 0 && rc != EFAULT {
                return Err(Error::profiling(
                    "flush thread cache",
                    format!("mallctl returned {rc}"),
                ));
            }
            epoch::advance().map_err(|e| ctl_error("advance stats epoch", e))?;
            Ok(())
        }

        /// Dump to a scratch file, then copy into `output`.
        pub fn write(&self, output: &mut File) -> Result<()> {
            let scratch = tempfile::NamedTempFile::new()
                .fs_context(std::env::temp_dir(), "create heap dump")?;
            let path = CString::new(scratch.path().as_os_str().as_bytes())
                .map_err(|e| Error::profiling("dump heap profile", e.to_string()))?;

            // SAFETY: prof.dump takes a NUL-terminated path that outlives the call
            unsafe { raw::write(PROF_DUMP, path.as_ptr()) }
                .map_err(|e| ctl_error("dump heap profile", e))?;

            let mut dump =
                File::open(scratch.path()).fs_context(scratch.path(), "read heap dump")?;
            std::io::copy(&mut dump, output).fs_context("", "write heap profile")?;
            output.flush().fs_context("", "flush heap profile")?;
            output.sync_all().fs_context("", "sync heap profile")?;
            Ok(())
        }
    }
}

#[cfg(not(all(feature = "jemalloc", unix)))]
impl HeapProfiler {
    fn unsupported() -> Error {
        Error::unsupported(
            "heap profiling",
            "exitkit was built without the `jemalloc` feature",
        )
    }

    pub fn set_sample_rate(&self, _rate: u64) -> Result<()> {
        Err(Self::unsupported())
    }

    pub fn start(&self) -> Result<()> {
        Err(Self::unsupported())
    }

    pub fn collect_garbage(&self) -> Result<()> {
        Err(Self::unsupported())
    }

    pub fn write(&self, _output: &mut File) -> Result<()> {
        Err(Self::unsupported())
    }
}
