//! Main application module, responsible for initialization and execution.

// Only the portable core and its tests are built off Windows.
#![cfg_attr(not(windows), allow(dead_code))]

mod autorun;
mod config;
mod desktop;
mod error;
mod font;
mod glyph;
mod host;
mod labels;
mod state;
#[cfg(windows)]
mod timer;
mod tray;
mod watcher;
#[cfg(windows)]
mod win_api;

use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Runs the application until the user exits or a restart is requested.
#[cfg(windows)]
pub fn run() {
    use autorun::{Autorun, RegistryRunKey};
    use config::Config;
    use desktop::VirtualDesktops;
    use error::AutorunError;
    use host::Host;
    use state::Flow;
    use timer::ThreadTimer;
    use tracing::{error, info};
    use tray::{ShellIconFactory, ShellTray};
    use watcher::Watcher;

    init_logging();
    let config = Config::from_env();

    // 1. Make sure only one instance is running.
    let Some(instance) = win_api::InstanceGuard::acquire(&config.app_name) else {
        info!("another instance is already running");
        return;
    };

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            error!("{}", AutorunError::ExecutablePath(e));
            return;
        }
    };

    // 2. Wire the watcher to the shell. Menu events come back through the channel.
    let labels = labels::load();
    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let tray = ShellTray::new(event_tx, labels.tooltip_for(None));
    let watcher = Watcher::new(
        VirtualDesktops,
        ShellIconFactory::default(),
        tray,
        ThreadTimer::default(),
        config.poll_interval,
    );
    let autorun = Autorun::new(config.app_name.clone(), &exe, RegistryRunKey);
    let mut host = Host::new(watcher, autorun, labels, config.on_failure);

    if let Err(e) = host.start() {
        error!("failed to start: {e}");
        return;
    }

    // 3. Ticks and tray callbacks are both handled on this thread.
    let mut flow = Flow::Keep;
    win_api::message_loop(|msg| {
        if flow != Flow::Keep {
            return;
        }
        if win_api::is_thread_timer(msg) {
            flow = host.tick();
        }
        while flow == Flow::Keep {
            match event_rx.try_recv() {
                Ok(event) => flow = host.handle(event),
                Err(_) => break,
            }
        }
        if flow != Flow::Keep {
            win_api::quit();
        }
    });

    // 4. Release the tray, the timer and the instance mutex before any successor starts.
    host.shutdown();
    drop(instance);

    if flow == Flow::Restart {
        info!("starting a fresh instance");
        if let Err(e) = win_api::spawn_successor() {
            error!("failed to restart: {e}");
        }
    }
}

#[cfg(not(windows))]
pub fn run() {
    init_logging();
    tracing::error!("virtual desktops and the notification tray are only available on Windows");
}
