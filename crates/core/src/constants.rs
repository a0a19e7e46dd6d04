/// Constants used throughout the exitkit codebase
pub const APP_NAME: &str = "exitkit";

// Exit statuses
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Status used by `fatal::abort`, distinct from ordinary command failures.
pub const FATAL_EXIT_CODE: i32 = 2;
/// Signal-triggered exits report `SIGNAL_EXIT_BASE + signo`, like a shell.
pub const SIGNAL_EXIT_BASE: i32 = 128;

// Environment variable names
pub const EXITKIT_CPUPROFILE_VAR: &str = "EXITKIT_CPUPROFILE";
pub const EXITKIT_MEMPROFILE_VAR: &str = "EXITKIT_MEMPROFILE";
pub const EXITKIT_MEMPROFILERATE_VAR: &str = "EXITKIT_MEMPROFILERATE";

// CPU sampling frequency in Hz
pub const CPU_PROFILE_FREQUENCY: i32 = 100;
