//! Profiling settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where to write profiles, and how finely to sample the heap.
///
/// An empty path disables the corresponding profile, the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfilingConfig {
    pub cpu_profile: Option<PathBuf>,
    pub heap_profile: Option<PathBuf>,
    /// Bytes between heap samples; 0 keeps the allocator default
    pub heap_sample_rate: u64,
}

impl ProfilingConfig {
    pub fn cpu_profile(&self) -> Option<&Path> {
        non_empty(self.cpu_profile.as_deref())
    }

    pub fn heap_profile(&self) -> Option<&Path> {
        non_empty(self.heap_profile.as_deref())
    }

    pub fn is_enabled(&self) -> bool {
        self.cpu_profile().is_some() || self.heap_profile().is_some()
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled() {
        let config = ProfilingConfig::default();
        assert!(!config.is_enabled());
        assert_eq!(config.heap_sample_rate, 0);
    }

    #[test]
    fn test_empty_paths_are_disabled() {
        let config = ProfilingConfig {
            cpu_profile: Some(PathBuf::new()),
            heap_profile: Some(PathBuf::from("")),
            heap_sample_rate: 4096,
        };
        assert_eq!(config.cpu_profile(), None);
        assert_eq!(config.heap_profile(), None);
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ProfilingConfig =
            serde_json::from_str(r#"{ "heapProfile": "mem.prof", "heapSampleRate": 512 }"#)
                .unwrap();
        assert_eq!(config.cpu_profile(), None);
        assert_eq!(config.heap_profile(), Some(Path::new("mem.prof")));
        assert_eq!(config.heap_sample_rate, 512);
        assert!(config.is_enabled());
    }
}
