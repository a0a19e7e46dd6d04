//! Signal bridge: SIGINT and SIGTERM run the exit hooks before the process
//! ends, with status `128 + signo`.

use exitkit_core::Result;

/// Spawn the signal watcher thread (called once at startup)
#[cfg(unix)]
pub fn install_signal_handlers() -> Result<()> {
    use exitkit_core::{Error, SIGNAL_EXIT_BASE};
    use signal_hook::{consts::SIGINT, consts::SIGTERM, iterator::Signals};
    use std::thread;

    let mut signals = Signals::new([SIGINT, SIGTERM])
        .map_err(|e| Error::configuration(format!("failed to register signal handlers: {e}")))?;

    thread::Builder::new()
        .name("exitkit-signals".to_string())
        .spawn(move || {
            #[allow(clippy::never_loop)]
            for sig in signals.forever() {
                tracing::info!(signal = sig, "received signal, running exit hooks");
                super::exit(SIGNAL_EXIT_BASE + sig);
            }
        })
        .map_err(|e| Error::configuration(format!("failed to spawn signal thread: {e}")))?;

    Ok(())
}

#[cfg(not(unix))]
pub fn install_signal_handlers() -> Result<()> {
    tracing::debug!("signal bridge is only available on unix");
    Ok(())
}
