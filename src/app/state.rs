//! Small state enums shared by the tray, the watcher and the host loop.

/// Events raised by the tray icon and its context menu.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Event {
    ShowMenu,
    ToggleAutorun,
    Exit,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum WatcherState {
    /// Constructed, timer not running, tray icon hidden.
    Idle,
    /// Timer active and tray icon visible.
    Running,
}

/// What the message loop should do after handling a tick or an event.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Flow {
    Keep,
    Quit,
    /// Shut down and start a fresh copy of the process.
    Restart,
}
