//! Tray icon, context menu and poll timer collaborators.

use super::error::{RenderError, TrayError};
use super::glyph::Glyph;
use super::labels::Labels;
use super::state::Event;
use std::time::Duration;

/// The notification-area icon.
pub trait Tray {
    type Icon;

    /// Installs `icon`, or shows no glyph at all for `None`.
    fn set_icon(&mut self, icon: Option<Self::Icon>) -> Result<(), TrayError>;
    fn set_tooltip(&mut self, text: &str) -> Result<(), TrayError>;
    fn set_visible(&mut self, visible: bool) -> Result<(), TrayError>;
    fn set_menu(&mut self, menu: &TrayMenu) -> Result<(), TrayError>;
    fn show_menu(&mut self) -> Result<(), TrayError>;
}

/// Turns a rendered glyph into something the tray can display.
pub trait IconFactory {
    type Icon;

    fn create(&mut self, glyph: &Glyph) -> Result<Self::Icon, RenderError>;
}

/// Periodic tick source for the watcher.
pub trait PollTimer {
    fn start(&mut self, interval: Duration) -> Result<(), TrayError>;
    fn stop(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Checkable {
        label: String,
        checked: bool,
        event: Event,
    },
    Item {
        label: String,
        event: Event,
    },
    Separator,
}

/// Platform-neutral description of the context menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrayMenu {
    pub entries: Vec<MenuEntry>,
}

impl TrayMenu {
    /// Autorun checkbox, separator, exit.
    pub fn build(labels: &Labels, autorun_enabled: bool) -> Self {
        TrayMenu {
            entries: vec![
                MenuEntry::Checkable {
                    label: labels.autorun.clone(),
                    checked: autorun_enabled,
                    event: Event::ToggleAutorun,
                },
                MenuEntry::Separator,
                MenuEntry::Item {
                    label: labels.exit.clone(),
                    event: Event::Exit,
                },
            ],
        }
    }
}

#[cfg(windows)]
pub use self::shell::{ShellIconFactory, ShellTray};

#[cfg(windows)]
mod shell {
    use super::{Event, Glyph, IconFactory, MenuEntry, RenderError, Tray, TrayError, TrayMenu};
    use crossbeam_channel::Sender;
    use std::collections::HashMap;
    use tracing::debug;
    use trayicon::{Icon, MenuBuilder, TrayIcon, TrayIconBuilder};

    /// A glyph converted to a shell icon. Keeps the encoded bytes so the
    /// icon can be recreated when the tray is rebuilt.
    pub struct ShellIcon {
        bytes: &'static [u8],
        icon: Icon,
    }

    /// Converts glyphs to shell icons. `trayicon` wants `'static` buffers, so
    /// each distinct label is encoded once and kept for the process lifetime;
    /// there are at most 100 labels.
    #[derive(Default)]
    pub struct ShellIconFactory {
        encoded: HashMap<String, &'static [u8]>,
    }

    impl ShellIconFactory {
        fn encode(&mut self, glyph: &Glyph) -> &'static [u8] {
            *self
                .encoded
                .entry(glyph.label().to_string())
                .or_insert_with(|| Box::leak(glyph.to_ico().into_boxed_slice()))
        }
    }

    impl IconFactory for ShellIconFactory {
        type Icon = ShellIcon;

        fn create(&mut self, glyph: &Glyph) -> Result<ShellIcon, RenderError> {
            let bytes = self.encode(glyph);
            let icon = Icon::from_buffer(bytes, None, None).map_err(|e| RenderError::IconHandle {
                label: glyph.label().to_string(),
                reason: e.to_string(),
            })?;
            Ok(ShellIcon { bytes, icon })
        }
    }

    fn to_menu_builder(menu: &TrayMenu) -> MenuBuilder<Event> {
        menu.entries
            .iter()
            .fold(MenuBuilder::new(), |builder, entry| match entry {
                MenuEntry::Checkable {
                    label,
                    checked,
                    event,
                } => builder.checkable(label, *checked, *event),
                MenuEntry::Item { label, event } => builder.item(label, *event),
                MenuEntry::Separator => builder.separator(),
            })
    }

    /// Shell notification icon. Visible while the underlying `TrayIcon`
    /// exists; it is created and destroyed on the message loop thread.
    pub struct ShellTray {
        events: Sender<Event>,
        tooltip: String,
        icon: &'static [u8],
        blank: &'static [u8],
        menu: TrayMenu,
        handle: Option<TrayIcon<Event>>,
    }

    impl ShellTray {
        pub fn new(events: Sender<Event>, tooltip: String) -> Self {
            let blank: &'static [u8] = Box::leak(Glyph::blank().to_ico().into_boxed_slice());
            ShellTray {
                events,
                tooltip,
                icon: blank,
                blank,
                menu: TrayMenu { entries: Vec::new() },
                handle: None,
            }
        }

        fn build(&self) -> Result<TrayIcon<Event>, TrayError> {
            let icon = Icon::from_buffer(self.icon, None, None)
                .map_err(|e| TrayError::Build(e.to_string()))?;
            let events = self.events.clone();
            TrayIconBuilder::new()
                .sender(move |e: &Event| {
                    let _ = events.send(*e);
                })
                .icon(icon)
                .tooltip(&self.tooltip)
                .on_click(Event::ShowMenu)
                .on_right_click(Event::ShowMenu)
                .menu(to_menu_builder(&self.menu))
                .build()
                .map_err(|e| TrayError::Build(e.to_string()))
        }
    }

    impl Tray for ShellTray {
        type Icon = ShellIcon;

        fn set_icon(&mut self, icon: Option<ShellIcon>) -> Result<(), TrayError> {
            let icon = match icon {
                Some(icon) => icon,
                None => ShellIcon {
                    bytes: self.blank,
                    icon: Icon::from_buffer(self.blank, None, None)
                        .map_err(|e| TrayError::Icon(e.to_string()))?,
                },
            };
            if let Some(handle) = self.handle.as_mut() {
                handle
                    .set_icon(&icon.icon)
                    .map_err(|e| TrayError::Icon(e.to_string()))?;
            }
            self.icon = icon.bytes;
            Ok(())
        }

        fn set_tooltip(&mut self, text: &str) -> Result<(), TrayError> {
            if let Some(handle) = self.handle.as_mut() {
                handle
                    .set_tooltip(text)
                    .map_err(|e| TrayError::Icon(e.to_string()))?;
            }
            self.tooltip = text.to_string();
            Ok(())
        }

        fn set_visible(&mut self, visible: bool) -> Result<(), TrayError> {
            match (visible, self.handle.is_some()) {
                (true, false) => {
                    self.handle = Some(self.build()?);
                    debug!("tray icon added");
                }
                (false, true) => {
                    // Dropping the handle removes the icon from the notification area.
                    self.handle = None;
                    debug!("tray icon removed");
                }
                _ => {}
            }
            Ok(())
        }

        fn set_menu(&mut self, menu: &TrayMenu) -> Result<(), TrayError> {
            if let Some(handle) = self.handle.as_mut() {
                handle
                    .set_menu(&to_menu_builder(menu))
                    .map_err(|e| TrayError::Menu(e.to_string()))?;
            }
            self.menu = menu.clone();
            Ok(())
        }

        fn show_menu(&mut self) -> Result<(), TrayError> {
            match self.handle.as_mut() {
                Some(handle) => handle
                    .show_menu()
                    .map_err(|e| TrayError::Menu(e.to_string())),
                None => Ok(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::watcher::fakes::autorun_checked;
    use super::*;

    #[test]
    fn menu_has_autorun_separator_exit() {
        let menu = TrayMenu::build(&Labels::default(), true);
        assert_eq!(
            menu.entries,
            vec![
                MenuEntry::Checkable {
                    label: "Start application at Windows startup".to_string(),
                    checked: true,
                    event: Event::ToggleAutorun,
                },
                MenuEntry::Separator,
                MenuEntry::Item {
                    label: "Exit".to_string(),
                    event: Event::Exit,
                },
            ]
        );
    }

    #[test]
    fn checkbox_reflects_autorun_state() {
        assert_eq!(
            autorun_checked(&TrayMenu::build(&Labels::default(), false)),
            Some(false)
        );
        assert_eq!(
            autorun_checked(&TrayMenu::build(&Labels::default(), true)),
            Some(true)
        );
        assert_eq!(autorun_checked(&TrayMenu { entries: Vec::new() }), None);
    }
}
