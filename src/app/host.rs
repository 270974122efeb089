//! Glue between the message loop, the watcher and the context menu.

use super::autorun::{Autorun, RunKeyStore};
use super::config::FailurePolicy;
use super::desktop::DesktopSource;
use super::error::TrayError;
use super::labels::Labels;
use super::state::{Event, Flow};
use super::tray::{IconFactory, PollTimer, Tray, TrayMenu};
use super::watcher::{TickOutcome, Watcher};
use tracing::{debug, error, info, warn};

pub struct Host<D, F, T, P, S>
where
    F: IconFactory,
    T: Tray<Icon = F::Icon>,
{
    watcher: Watcher<D, F, T, P>,
    autorun: Autorun<S>,
    labels: Labels,
    on_failure: FailurePolicy,
}

impl<D, F, T, P, S> Host<D, F, T, P, S>
where
    D: DesktopSource,
    F: IconFactory,
    T: Tray<Icon = F::Icon>,
    P: PollTimer,
    S: RunKeyStore,
{
    pub fn new(
        watcher: Watcher<D, F, T, P>,
        autorun: Autorun<S>,
        labels: Labels,
        on_failure: FailurePolicy,
    ) -> Self {
        Host {
            watcher,
            autorun,
            labels,
            on_failure,
        }
    }

    /// Installs the context menu, then shows the tray and starts polling.
    pub fn start(&mut self) -> Result<(), TrayError> {
        self.refresh_menu();
        self.watcher.start()
    }

    pub fn tick(&mut self) -> Flow {
        match self.watcher.on_tick() {
            TickOutcome::Unchanged => Flow::Keep,
            TickOutcome::Rendered { index, label } => {
                debug!(index, %label, "glyph installed");
                self.update_tooltip(index);
                Flow::Keep
            }
            TickOutcome::RenderFailed { index, error } => {
                warn!("{error}; tray icon cleared");
                self.update_tooltip(index);
                Flow::Keep
            }
            TickOutcome::QueryFailed(e) => self.fail(&e),
            TickOutcome::InstallFailed(e) => self.fail(&e),
        }
    }

    fn update_tooltip(&mut self, index: u32) {
        let tooltip = self.labels.tooltip_for(Some(index));
        if let Err(e) = self.watcher.tray_mut().set_tooltip(&tooltip) {
            warn!("{e}");
        }
    }

    fn fail(&self, e: &dyn std::error::Error) -> Flow {
        match self.on_failure {
            FailurePolicy::Restart => {
                error!("{e}; restarting");
                Flow::Restart
            }
            FailurePolicy::Continue => {
                error!("{e}; retrying on next tick");
                Flow::Keep
            }
        }
    }

    pub fn handle(&mut self, event: Event) -> Flow {
        match event {
            Event::ShowMenu => {
                if let Err(e) = self.watcher.tray_mut().show_menu() {
                    warn!("{e}");
                }
                Flow::Keep
            }
            Event::ToggleAutorun => {
                if let Err(e) = self.autorun.toggle() {
                    error!("failed to toggle autorun: {e}");
                }
                self.refresh_menu();
                Flow::Keep
            }
            Event::Exit => Flow::Quit,
        }
    }

    /// Rebuilds the menu from the live autorun state.
    fn refresh_menu(&mut self) {
        let enabled = self.autorun.status().unwrap_or_else(|e| {
            error!("failed to read autorun state: {e}");
            false
        });
        let menu = TrayMenu::build(&self.labels, enabled);
        if let Err(e) = self.watcher.tray_mut().set_menu(&menu) {
            warn!("{e}");
        }
    }

    pub fn shutdown(self) {
        info!(last_desktop = self.watcher.cached(), "shutting down");
        self.watcher.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::super::autorun::MemoryRunKey;
    use super::super::error::DesktopError;
    use super::super::watcher::fakes::*;
    use super::*;
    use std::path::Path;

    type TestHost = Host<ScriptedDesktops, CountingIcons, RecordingTray, ManualTimer, MemoryRunKey>;

    fn host(policy: FailurePolicy) -> (TestHost, Rig, MemoryRunKey) {
        let (watcher, rig) = rig();
        let store = MemoryRunKey::default();
        let autorun = Autorun::new("VirtualDesktopIndicator", Path::new("indicator.exe"), store.clone());
        (
            Host::new(watcher, autorun, Labels::default(), policy),
            rig,
            store,
        )
    }

    fn checked(rig: &Rig) -> Option<bool> {
        rig.tray
            .menu
            .borrow()
            .as_ref()
            .and_then(autorun_checked)
    }

    #[test]
    fn start_installs_menu_and_shows_tray() {
        let (mut host, rig, _) = host(FailurePolicy::Restart);
        host.start().unwrap();
        assert_eq!(checked(&rig), Some(false));
        assert!(*rig.tray.visible.borrow());
        assert!(rig.timer.running.borrow().is_some());
    }

    #[test]
    fn tick_updates_tooltip() {
        let (mut host, rig, _) = host(FailurePolicy::Restart);
        host.start().unwrap();
        rig.desktops.set(3);

        assert_eq!(host.tick(), Flow::Keep);
        assert_eq!(
            *rig.tray.tooltip.borrow(),
            "Virtual Desktop Indicator - Desktop 3"
        );
        assert_eq!(host.tick(), Flow::Keep);
        assert_eq!(rig.icons.count(), 1);
    }

    #[test]
    fn render_failure_keeps_running() {
        let (mut host, rig, _) = host(FailurePolicy::Restart);
        *rig.icons.fail.borrow_mut() = true;
        rig.desktops.set(2);
        assert_eq!(host.tick(), Flow::Keep);
        assert_eq!(*rig.tray.icon.borrow(), None);
    }

    #[test]
    fn query_failure_restarts_by_default() {
        let (mut host, rig, _) = host(FailurePolicy::Restart);
        rig.desktops.set(1);
        host.tick();
        rig.desktops.script([Err(DesktopError::Query("boom".to_string()))]);
        assert_eq!(host.tick(), Flow::Restart);
    }

    #[test]
    fn query_failure_can_be_tolerated() {
        let (mut host, rig, _) = host(FailurePolicy::Continue);
        rig.desktops.script([Err(DesktopError::NonPositiveIndex(0)), Ok(4)]);
        assert_eq!(host.tick(), Flow::Keep);
        assert_eq!(host.tick(), Flow::Keep);
        assert_eq!(rig.tray.icon.borrow().as_deref(), Some("04"));
    }

    #[test]
    fn install_failure_follows_policy() {
        let (mut host, rig, _) = host(FailurePolicy::Restart);
        *rig.tray.fail_install.borrow_mut() = true;
        rig.desktops.set(5);
        assert_eq!(host.tick(), Flow::Restart);
    }

    #[test]
    fn toggle_autorun_flips_registry_and_menu() {
        let (mut host, rig, store) = host(FailurePolicy::Restart);
        host.start().unwrap();

        assert_eq!(host.handle(Event::ToggleAutorun), Flow::Keep);
        assert_eq!(store.get("VirtualDesktopIndicator").as_deref(), Some("\"indicator.exe\""));
        assert_eq!(checked(&rig), Some(true));

        assert_eq!(host.handle(Event::ToggleAutorun), Flow::Keep);
        assert_eq!(store.get("VirtualDesktopIndicator"), None);
        assert_eq!(checked(&rig), Some(false));
    }

    #[test]
    fn show_menu_and_exit() {
        let (mut host, rig, _) = host(FailurePolicy::Restart);
        host.start().unwrap();
        assert_eq!(host.handle(Event::ShowMenu), Flow::Keep);
        assert_eq!(*rig.tray.menus_shown.borrow(), 1);
        assert_eq!(host.handle(Event::Exit), Flow::Quit);
    }

    #[test]
    fn shutdown_releases_tray_and_timer() {
        let (mut host, rig, _) = host(FailurePolicy::Restart);
        host.start().unwrap();
        host.shutdown();
        assert!(!*rig.tray.visible.borrow());
        assert!(rig.timer.running.borrow().is_none());
    }
}
