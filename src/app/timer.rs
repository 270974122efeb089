//! Poll timer driven by the thread's message queue.
//!
//! `WM_TIMER` is only generated while the owning thread pumps messages, so
//! ticks are serialized with tray callbacks and never overlap.

use super::error::TrayError;
use super::tray::PollTimer;
use std::ptr;
use std::time::Duration;
use tracing::debug;
use winapi::shared::basetsd::UINT_PTR;
use winapi::um::winuser;

/// Windows clamps shorter intervals to this anyway.
const MIN_INTERVAL_MS: u32 = 10;

/// A thread timer (`SetTimer` without a window). Killed on `stop` or drop.
#[derive(Default)]
pub struct ThreadTimer {
    id: Option<UINT_PTR>,
}

impl PollTimer for ThreadTimer {
    fn start(&mut self, interval: Duration) -> Result<(), TrayError> {
        // Ensure any existing timer is stopped before starting a new one.
        self.stop();

        let ms = u32::try_from(interval.as_millis())
            .unwrap_or(u32::MAX)
            .max(MIN_INTERVAL_MS);
        let id = unsafe { winuser::SetTimer(ptr::null_mut(), 0, ms, None) };
        if id == 0 {
            return Err(TrayError::Timer);
        }
        self.id = Some(id);
        debug!(interval_ms = ms, "poll timer started");
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(id) = self.id.take() {
            unsafe {
                winuser::KillTimer(ptr::null_mut(), id);
            }
            debug!("poll timer stopped");
        }
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
