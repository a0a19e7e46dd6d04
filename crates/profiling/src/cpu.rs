//! CPU profiles through `pprof`'s SIGPROF sampler.

use exitkit_core::{Error, Result};
use std::fs::File;

/// Owns at most one running CPU sampling session.
pub struct CpuProfiler {
    #[cfg_attr(not(unix), allow(dead_code))]
    frequency: i32,
    #[cfg(unix)]
    session: parking_lot::Mutex<Option<imp::CpuSession>>,
}

impl CpuProfiler {
    /// `frequency` is the number of samples per second.
    pub fn new(frequency: i32) -> Self {
        Self {
            frequency,
            #[cfg(unix)]
            session: parking_lot::Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        #[cfg(unix)]
        {
            self.session.lock().is_some()
        }
        #[cfg(not(unix))]
        {
            false
        }
    }
}

#[cfg(unix)]
mod imp {
    use super::*;
    use exitkit_core::IoResultExt;
    use pprof::protos::Message;
    use std::io::Write;

    pub(super) struct CpuSession {
        guard: pprof::ProfilerGuard<'static>,
        output: File,
    }

    impl CpuProfiler {
        pub fn start(&self, output: File) -> Result<()> {
            let mut session = self.session.lock();
            if session.is_some() {
                return Err(Error::profiling(
                    "start CPU profile",
                    "a CPU profile is already running",
                ));
            }

            let guard = pprof::ProfilerGuardBuilder::default()
                .frequency(self.frequency)
                .build()
                .map_err(|e| Error::profiling("start CPU profile", e.to_string()))?;

            *session = Some(CpuSession { guard, output });
            tracing::debug!(frequency = self.frequency, "CPU sampling started");
            Ok(())
        }

        /// Stop sampling, then encode the pprof protobuf into the output file.
        pub fn stop(&self) -> Result<()> {
            let CpuSession { guard, mut output } = self
                .session
                .lock()
                .take()
                .ok_or_else(|| Error::profiling("stop CPU profile", "no CPU profile is running"))?;

            let report = guard
                .report()
                .build()
                .map_err(|e| Error::profiling("build CPU report", e.to_string()))?;
            // Sampling ends here, before anything is written
            drop(guard);

            let profile = report
                .pprof()
                .map_err(|e| Error::profiling("encode CPU profile", e.to_string()))?;
            output
                .write_all(&profile.encode_to_vec())
                .fs_context("", "write CPU profile")?;
            output.flush().fs_context("", "flush CPU profile")?;
            output.sync_all().fs_context("", "sync CPU profile")?;
            tracing::debug!(samples = report.data.len(), "CPU profile written");
            Ok(())
        }
    }
}

#[cfg(not(unix))]
impl CpuProfiler {
    pub fn start(&self, _output: File) -> Result<()> {
        Err(Error::unsupported(
            "CPU profiling",
            "the pprof sampler needs a unix platform",
        ))
    }

    pub fn stop(&self) -> Result<()> {
        Err(Error::profiling("stop CPU profile", "no CPU profile is running"))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn burn_cpu(duration: Duration) -> u64 {
        let deadline = Instant::now() + duration;
        let mut acc: u64 = 0;
        while Instant::now() < deadline {
            for i in 0..10_000u64 {
                acc = acc.wrapping_mul(31).wrapping_add(i);
            }
        }
        acc
    }

    #[test]
    #[serial]
    fn test_profile_written_after_stop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cpu.pprof");
        let profiler = CpuProfiler::new(100);

        profiler.start(File::create(&path).unwrap()).unwrap();
        assert!(profiler.is_running());
        std::hint::black_box(burn_cpu(Duration::from_millis(200)));
        profiler.stop().unwrap();

        assert!(!profiler.is_running());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    #[serial]
    fn test_second_start_is_rejected() {
        let dir = TempDir::new().unwrap();
        let profiler = CpuProfiler::new(100);

        profiler
            .start(File::create(dir.path().join("a.pprof")).unwrap())
            .unwrap();
        let err = profiler
            .start(File::create(dir.path().join("b.pprof")).unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("already running"));

        profiler.stop().unwrap();
    }

    #[test]
    fn test_stop_without_start() {
        let profiler = CpuProfiler::new(100);
        let err = profiler.stop().unwrap_err();
        assert!(matches!(err, Error::Profiling { .. }));
    }
}
