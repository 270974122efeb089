//! Watches the active virtual desktop and keeps the tray glyph in sync.

use super::desktop::DesktopSource;
use super::error::{DesktopError, RenderError, TrayError};
use super::glyph::{desktop_label, Glyph};
use super::state::WatcherState;
use super::tray::{IconFactory, PollTimer, Tray};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of a single poll.
#[derive(Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Same desktop as last time; nothing was rendered.
    Unchanged,
    /// A new glyph was rendered and installed.
    Rendered { index: u32, label: String },
    /// The glyph could not be turned into an icon; the tray shows none.
    RenderFailed { index: u32, error: RenderError },
    QueryFailed(DesktopError),
    InstallFailed(TrayError),
}

/// Owns the tray icon and the poll timer for the lifetime of the process.
pub struct Watcher<D, F, T, P>
where
    F: IconFactory,
    T: Tray<Icon = F::Icon>,
{
    desktops: D,
    icons: F,
    tray: T,
    timer: P,
    interval: Duration,
    /// Last desktop a glyph was produced for; 0 until the first tick.
    cached: u32,
    state: WatcherState,
}

impl<D, F, T, P> Watcher<D, F, T, P>
where
    D: DesktopSource,
    F: IconFactory,
    T: Tray<Icon = F::Icon>,
    P: PollTimer,
{
    pub fn new(desktops: D, icons: F, tray: T, timer: P, interval: Duration) -> Self {
        Watcher {
            desktops,
            icons,
            tray,
            timer,
            interval,
            cached: 0,
            state: WatcherState::Idle,
        }
    }

    pub fn cached(&self) -> u32 {
        self.cached
    }

    pub fn tray_mut(&mut self) -> &mut T {
        &mut self.tray
    }

    /// Shows the tray icon and starts polling. Must be called exactly once.
    pub fn start(&mut self) -> Result<(), TrayError> {
        debug_assert_eq!(self.state, WatcherState::Idle, "watcher started twice");
        self.tray.set_visible(true)?;
        self.timer.start(self.interval)?;
        self.state = WatcherState::Running;
        info!(interval_ms = self.interval.as_millis() as u64, "watching virtual desktops");
        Ok(())
    }

    /// Polls the desktop once and re-renders the glyph if it changed.
    pub fn on_tick(&mut self) -> TickOutcome {
        let current = match self.desktops.current() {
            Ok(current) => current,
            Err(e) => return TickOutcome::QueryFailed(e),
        };
        if current == self.cached {
            return TickOutcome::Unchanged;
        }

        let label = desktop_label(current);
        let glyph = Glyph::render(&label);
        let outcome = match self.icons.create(&glyph) {
            Ok(icon) => {
                if let Err(e) = self.tray.set_icon(Some(icon)) {
                    return TickOutcome::InstallFailed(e);
                }
                TickOutcome::Rendered {
                    index: current,
                    label,
                }
            }
            Err(error) => {
                if let Err(e) = self.tray.set_icon(None) {
                    return TickOutcome::InstallFailed(e);
                }
                TickOutcome::RenderFailed {
                    index: current,
                    error,
                }
            }
        };

        // Advance even when rendering failed so the same desktop is not retried every tick.
        info!(from = self.cached, to = current, "virtual desktop changed");
        self.cached = current;
        outcome
    }

    /// Stops polling and removes the tray icon.
    pub fn shutdown(mut self) {
        self.timer.stop();
        if let Err(e) = self.tray.set_visible(false) {
            warn!("failed to remove tray icon: {e}");
        }
        debug!("watcher shut down");
    }
}
