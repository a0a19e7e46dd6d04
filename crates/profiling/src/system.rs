use crate::backend::ProfilerBackend;
use crate::cpu::CpuProfiler;
use crate::heap::HeapProfiler;
use exitkit_core::{Result, CPU_PROFILE_FREQUENCY};
use std::fs::File;

/// The production backend: pprof for CPU, jemalloc for heap
pub struct SystemProfiler {
    cpu: CpuProfiler,
    heap: HeapProfiler,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self {
            cpu: CpuProfiler::new(CPU_PROFILE_FREQUENCY),
            heap: HeapProfiler::new(),
        }
    }
}

impl Default for SystemProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfilerBackend for SystemProfiler {
    fn start_cpu_profile(&self, output: File) -> Result<()> {
        self.cpu.start(output)
    }

    fn stop_cpu_profile(&self) -> Result<()> {
        self.cpu.stop()
    }

    fn set_heap_sample_rate(&self, rate: u64) -> Result<()> {
        self.heap.set_sample_rate(rate)
    }

    fn start_heap_profile(&self) -> Result<()> {
        self.heap.start()
    }

    fn collect_garbage(&self) -> Result<()> {
        self.heap.collect_garbage()
    }

    fn write_heap_profile(&self, output: &mut File) -> Result<()> {
        self.heap.write(output)
    }
}
