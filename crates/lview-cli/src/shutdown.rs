use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// Stop flag shared between the Ctrl+C handler and the polling loops.
///
/// Waits return as soon as the flag is raised, so a long poll interval
/// never delays exit.
pub struct ShutdownSignal {
    stopped: AtomicBool,
    wakeup: Condvar,
    lock: Mutex<()>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
            wakeup: Condvar::new(),
            lock: Mutex::new(()),
        }
    }

    /// Raise the flag and wake every pending [`wait`](Self::wait)
    pub fn trigger(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        // Taken so a waiter between its flag check and its wait sees the notify.
        let _guard = self.lock.lock();
        self.wakeup.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Sleep for `duration` unless stopped first; `true` means stop
    pub fn wait(&self, duration: Duration) -> bool {
        if self.is_shutdown() {
            return true;
        }

        // A poisoned lock counts as shutdown.
        let Ok(guard) = self.lock.lock() else {
            return true;
        };

        match self
            .wakeup
            .wait_timeout_while(guard, duration, |_| !self.is_shutdown())
        {
            Ok((_, timeout)) => !timeout.timed_out(),
            Err(_) => true,
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
