//! Raw terminal mode with guaranteed restore.
//!
//! [`RawMode::enable`] switches the controlling terminal into raw mode and
//! hands back a guard. The terminal is put back exactly once, whichever comes
//! first: an explicit [`RawMode::restore`], the guard being dropped, or a
//! SIGINT/SIGTERM caught by the interrupt watcher.
//!
//! The watcher thread is started with the first session and lives for the
//! rest of the process. A signal that arrives while no session is active gets
//! the default action, so the process stays killable between prompts.

#[cfg(unix)]
use crate::terminal::ansi;
#[cfg(unix)]
use std::io::Write;
use std::io::{self, IsTerminal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;
#[cfg(unix)]
use std::sync::OnceLock;

type Slot = Mutex<Option<Arc<RestoreOnce>>>;

/// The session the interrupt watcher restores.
static ACTIVE: Slot = Mutex::new(None);

#[cfg(unix)]
static WATCHER: OnceLock<Result<(), String>> = OnceLock::new();

fn lock(slot: &Slot) -> MutexGuard<'_, Option<Arc<RestoreOnce>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An active raw-mode session.
///
/// Only one session may be active per terminal at a time.
#[derive(Debug)]
pub struct RawMode {
    restore: Arc<RestoreOnce>,
}

impl RawMode {
    /// Enter raw mode on `device`, remembering the mode it was in.
    ///
    /// # Errors
    ///
    /// Fails if `device` is not a terminal or raw mode cannot be enabled. The
    /// terminal is untouched in both cases.
    pub fn enable<D: IsTerminal>(device: &D) -> io::Result<Self> {
        if !device.is_terminal() {
            return Err(io::Error::other("input device is not a terminal"));
        }

        let was_raw = crossterm::terminal::is_raw_mode_enabled()?;
        crossterm::terminal::enable_raw_mode()?;
        log::debug!("terminal raw mode enabled (previously raw: {was_raw})");

        let restore = Arc::new(RestoreOnce::new(was_raw));

        #[cfg(unix)]
        let watcher = ensure_watcher();
        #[cfg(not(unix))]
        let watcher: io::Result<()> = Ok(());
        if let Err(err) = watcher {
            let _ = restore.run();
            return Err(err);
        }

        Ok(Self::register(restore))
    }

    /// Make `restore` the session the interrupt watcher puts back.
    fn register(restore: Arc<RestoreOnce>) -> Self {
        *lock(&ACTIVE) = Some(Arc::clone(&restore));
        Self { restore }
    }

    /// Put the terminal back into the mode captured by [`RawMode::enable`].
    ///
    /// Calls after the first are no-ops.
    pub fn restore(&self) -> io::Result<()> {
        self.restore.run()
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        {
            let mut active = lock(&ACTIVE);
            if active.as_ref().is_some_and(|a| Arc::ptr_eq(a, &self.restore)) {
                *active = None;
            }
        }
        let _ = self.restore.run();
    }
}

type Disable = Box<dyn Fn() -> io::Result<()> + Send + Sync>;

/// Once-only restore shared between the session and the interrupt watcher.
struct RestoreOnce {
    done: AtomicBool,
    disable: Disable,
}

impl RestoreOnce {
    fn new(was_raw: bool) -> Self {
        if was_raw {
            return Self::with_disable(|| Ok(()));
        }
        Self::with_disable(|| {
            crossterm::terminal::disable_raw_mode()?;
            log::debug!("terminal raw mode disabled");
            Ok(())
        })
    }

    fn with_disable<F>(disable: F) -> Self
    where
        F: Fn() -> io::Result<()> + Send + Sync + 'static,
    {
        Self { done: AtomicBool::new(false), disable: Box::new(disable) }
    }

    fn run(&self) -> io::Result<()> {
        if self.done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        (self.disable)()
    }
}

impl std::fmt::Debug for RestoreOnce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestoreOnce").field("done", &self.done).finish_non_exhaustive()
    }
}

/// What the watcher found when a signal arrived.
#[derive(Debug, PartialEq, Eq)]
enum Interrupted {
    /// A session was active and has been restored.
    Restored,
    /// No session was active.
    Idle,
}

fn restore_active(slot: &Slot) -> Interrupted {
    let session = lock(slot).take();
    match session {
        Some(restore) => {
            let _ = restore.run();
            Interrupted::Restored
        }
        None => Interrupted::Idle,
    }
}

#[cfg(unix)]
fn ensure_watcher() -> io::Result<()> {
    WATCHER
        .get_or_init(|| spawn_watcher().map_err(|err| err.to_string()))
        .clone()
        .map_err(io::Error::other)
}

#[cfg(unix)]
fn spawn_watcher() -> io::Result<()> {
    let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
    std::thread::Builder::new().name("parley-interrupts".into()).spawn(move || {
        for signal in signals.forever() {
            on_signal(&ACTIVE, signal);
        }
    })?;
    log::debug!("interrupt watcher started");
    Ok(())
}

#[cfg(unix)]
fn on_signal(slot: &Slot, signal: i32) {
    match restore_active(slot) {
        Interrupted::Restored => {
            log::warn!("signal {signal} received, terminal restored");
            let mut stdout = io::stdout();
            let _ = ansi::cursor_show(&mut stdout);
            let _ = stdout.flush();
            std::process::exit(128 + signal);
        }
        Interrupted::Idle => {
            if let Err(err) = signal_hook::low_level::emulate_default_handler(signal) {
                log::warn!("could not apply default action for signal {signal}: {err}");
                std::process::exit(128 + signal);
            }
        }
    }
}
