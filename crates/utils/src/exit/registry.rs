//! Exit hook registry
//!
//! Hooks are zero-argument cleanup actions run in reverse registration order
//! when the process leaves through [`ExitHooks::terminate`]. The lock is only
//! held to push or pop a single hook, never while a hook runs, so a hook may
//! register further hooks (they run in the same drain, newest first) or even
//! call `terminate` itself.
//!
//! Only one thread ever terminates. Once a thread has started, a `terminate`
//! from any other thread (the signal bridge, say) parks that thread forever,
//! so a drain in progress is never cut short and its exit code stands.

use exitkit_core::{fatal, Error, Result};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, ThreadId};

/// A registered cleanup action.
///
/// Returning an error (or panicking) makes the drain fail, which ends the
/// process through [`fatal::abort`].
pub type Hook = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

/// Process-wide registry used by [`at_exit`] and [`exit`]
static EXIT_HOOKS: Lazy<ExitHooks> = Lazy::new(ExitHooks::new);

/// Ordered list of exit hooks
#[derive(Default)]
pub struct ExitHooks {
    hooks: Mutex<Vec<Hook>>,
    // The thread that owns process termination, once one has begun
    terminating: Mutex<Option<ThreadId>>,
}

impl ExitHooks {
    pub fn new() -> Self {
        Self {
            hooks: Mutex::new(Vec::with_capacity(4)),
            terminating: Mutex::new(None),
        }
    }

    /// Append a hook. It runs before every hook registered earlier.
    pub fn register<F>(&self, hook: F)
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let mut hooks = self.hooks.lock();
        hooks.push(Box::new(hook));
        tracing::trace!(pending = hooks.len(), "registered exit hook");
    }

    /// Number of hooks still waiting to run
    pub fn len(&self) -> usize {
        self.hooks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.lock().is_empty()
    }

    fn pop(&self) -> Option<(usize, Hook)> {
        let mut hooks = self.hooks.lock();
        let hook = hooks.pop()?;
        Some((hooks.len(), hook))
    }

    /// First caller wins. The owning thread may claim again, which lets a
    /// hook call `terminate` from inside the drain.
    fn claim_termination(&self) -> bool {
        let current = thread::current().id();
        let mut owner = self.terminating.lock();
        match *owner {
            None => {
                *owner = Some(current);
                true
            }
            Some(id) => id == current,
        }
    }

    /// Run every pending hook, newest first, until the list is empty.
    ///
    /// The length is re-read after each hook, so hooks registered while
    /// draining run in this same pass. Stops at the first failing hook and
    /// returns its error; hooks below it stay registered and are not run.
    /// On success returns how many hooks ran.
    pub fn drain(&self) -> Result<usize> {
        let mut ran = 0;
        while let Some((position, hook)) = self.pop() {
            tracing::debug!(position, "running exit hook");
            if let Err(e) = run_hook(hook) {
                tracing::error!(position, error = %e, "exit hook failed");
                return Err(e);
            }
            ran += 1;
        }
        Ok(ran)
    }

    /// Drain all hooks and end the process with `code`.
    ///
    /// A failing hook ends the process through [`fatal::abort`] instead, and
    /// the remaining hooks never run. If another thread is already
    /// terminating, the calling thread blocks until that thread ends the
    /// process.
    pub fn terminate(&self, code: i32) -> ! {
        if !self.claim_termination() {
            tracing::debug!(code, "exit already in progress on another thread");
            loop {
                thread::park();
            }
        }

        match self.drain() {
            Ok(ran) => {
                tracing::debug!(ran, code, "exit hooks drained, exiting");
                let _ = std::io::stdout().flush();
                let _ = std::io::stderr().flush();
                std::process::exit(code)
            }
            Err(e) => fatal::abort(&e),
        }
    }
}

impl fmt::Debug for ExitHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExitHooks")
            .field("pending", &self.len())
            .finish()
    }
}

fn run_hook(hook: Hook) -> Result<()> {
    match panic::catch_unwind(AssertUnwindSafe(hook)) {
        Ok(result) => result,
        Err(payload) => Err(Error::hook_failed(format!(
            "panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// The process-wide registry
pub fn hooks() -> &'static ExitHooks {
    &EXIT_HOOKS
}

/// Register `hook` with the process-wide registry
pub fn at_exit<F>(hook: F)
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    EXIT_HOOKS.register(hook);
}

/// Drain the process-wide registry and exit with `code`
pub fn exit(code: i32) -> ! {
    EXIT_HOOKS.terminate(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Arc;

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn record(log: &Log, label: &'static str) -> impl FnOnce() -> Result<()> + Send + 'static {
        let log = Arc::clone(log);
        move || {
            log.lock().push(label);
            Ok(())
        }
    }

    #[test]
    fn test_drain_runs_newest_first() {
        let hooks = ExitHooks::new();
        let log: Log = Arc::default();

        hooks.register(record(&log, "1"));
        hooks.register(record(&log, "2"));
        hooks.register(record(&log, "3"));

        assert_eq!(hooks.drain().unwrap(), 3);
        assert_eq!(*log.lock(), vec!["3", "2", "1"]);
        assert!(hooks.is_empty());
    }

    #[test]
    fn test_drain_with_no_hooks() {
        let hooks = ExitHooks::new();
        assert_eq!(hooks.drain().unwrap(), 0);
    }

    #[test]
    fn test_hooks_run_exactly_once() {
        let hooks = ExitHooks::new();
        let log: Log = Arc::default();

        hooks.register(record(&log, "only"));
        hooks.drain().unwrap();
        assert_eq!(hooks.drain().unwrap(), 0);

        assert_eq!(*log.lock(), vec!["only"]);
    }

    #[test]
    fn test_hook_registered_during_drain_runs_in_same_pass() {
        let hooks = Arc::new(ExitHooks::new());
        let log: Log = Arc::default();

        hooks.register(record(&log, "first"));
        {
            let registry = Arc::clone(&hooks);
            let log = Arc::clone(&log);
            hooks.register(move || {
                log.lock().push("outer");
                registry.register(record(&log, "inner"));
                Ok(())
            });
        }
        hooks.register(record(&log, "last"));

        assert_eq!(hooks.drain().unwrap(), 4);
        // "inner" was appended after "outer" popped, so it is newest and runs next
        assert_eq!(*log.lock(), vec!["last", "outer", "inner", "first"]);
    }

    #[test]
    fn test_transitive_registration_is_drained() {
        let hooks = Arc::new(ExitHooks::new());
        let log: Log = Arc::default();

        let registry = Arc::clone(&hooks);
        let log_outer = Arc::clone(&log);
        hooks.register(move || {
            log_outer.lock().push("a");
            let nested_registry = Arc::clone(&registry);
            let log_b = Arc::clone(&log_outer);
            registry.register(move || {
                log_b.lock().push("b");
                nested_registry.register(record(&log_b, "c"));
                Ok(())
            });
            Ok(())
        });

        assert_eq!(hooks.drain().unwrap(), 3);
        assert_eq!(*log.lock(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_failing_hook_stops_drain() {
        let hooks = ExitHooks::new();
        let log: Log = Arc::default();

        hooks.register(record(&log, "1"));
        hooks.register(|| Err(Error::hook_failed("disk full")));
        hooks.register(record(&log, "3"));

        let err = hooks.drain().unwrap_err();
        assert!(matches!(err, Error::HookFailed { .. }));
        assert_eq!(*log.lock(), vec!["3"]);
        // The hook below the failure was neither run nor discarded
        assert_eq!(hooks.len(), 1);
    }

    #[test]
    fn test_panicking_hook_is_reported_as_failure() {
        let hooks = ExitHooks::new();
        let log: Log = Arc::default();

        hooks.register(record(&log, "never"));
        hooks.register(|| panic!("profile writer exploded"));

        let err = hooks.drain().unwrap_err();
        assert!(err.to_string().contains("profile writer exploded"));
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_concurrent_registration_keeps_every_hook() {
        let hooks = Arc::new(ExitHooks::new());
        let counter = Arc::new(Mutex::new(0usize));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let hooks = Arc::clone(&hooks);
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        let counter = Arc::clone(&counter);
                        hooks.register(move || {
                            *counter.lock() += 1;
                            Ok(())
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(hooks.len(), 200);
        assert_eq!(hooks.drain().unwrap(), 200);
        assert_eq!(*counter.lock(), 200);
    }

    #[test]
    fn test_only_first_thread_claims_termination() {
        let hooks = Arc::new(ExitHooks::new());

        assert!(hooks.claim_termination());
        // Reentrant claim from a hook on the same thread
        assert!(hooks.claim_termination());

        let other = Arc::clone(&hooks);
        let claimed = std::thread::spawn(move || other.claim_termination())
            .join()
            .unwrap();
        assert!(!claimed);
    }

    #[test]
    fn test_debug_shows_pending_count() {
        let hooks = ExitHooks::new();
        hooks.register(|| Ok(()));
        assert_eq!(format!("{hooks:?}"), "ExitHooks { pending: 1 }");
    }

    #[test]
    #[serial]
    fn test_global_registry_round_trip() {
        let log: Log = Arc::default();
        let before = hooks().len();

        at_exit(record(&log, "global"));
        assert_eq!(hooks().len(), before + 1);

        hooks().drain().unwrap();
        assert!(log.lock().contains(&"global"));
        assert!(hooks().is_empty());
    }
}
