//! Terminal alarm pulse for an active reminder.
//!
//! While a reminder prompt is up, a background task rings the terminal
//! bell every two seconds until explicitly cancelled. The task touches no
//! application state and its effects are fire-and-forget: a terminal that
//! swallows the bell simply stays silent.

use crate::constants::ALARM_PULSE_SECS;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A cancellable periodic bell. Dropping the handle stops the pulse.
pub struct AlarmPulse {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl AlarmPulse {
    /// Starts the pulse. With sound disabled no thread is spawned and the
    /// handle is inert.
    pub fn start(sound_enabled: bool) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let handle = if sound_enabled {
            let stop = Arc::clone(&stop);
            Some(thread::spawn(move || {
                let period = Duration::from_secs(ALARM_PULSE_SECS);
                while !stop.load(Ordering::Relaxed) {
                    ring_bell();
                    // Sleep in short slices so cancellation lands quickly.
                    let mut slept = Duration::ZERO;
                    while slept < period && !stop.load(Ordering::Relaxed) {
                        let slice = Duration::from_millis(100);
                        thread::sleep(slice);
                        slept += slice;
                    }
                }
            }))
        } else {
            None
        };
        AlarmPulse { stop, handle }
    }

    /// Stops the pulse and waits for the task to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for AlarmPulse {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn ring_bell() {
    let mut stderr = std::io::stderr();
    let _ = stderr.write_all(b"\x07");
    let _ = stderr.flush();
}
