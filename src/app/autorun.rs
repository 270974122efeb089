//! Start-at-login support through the per-user `Run` registry key.

use super::error::AutorunError;
use std::path::Path;
use tracing::info;

/// Location of the per-user startup entries, relative to `HKEY_CURRENT_USER`.
pub const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

/// A named-value store holding startup commands.
pub trait RunKeyStore {
    fn contains(&self, name: &str) -> Result<bool, AutorunError>;
    fn set(&mut self, name: &str, command: &str) -> Result<(), AutorunError>;
    /// Removing a value that does not exist succeeds.
    fn remove(&mut self, name: &str) -> Result<(), AutorunError>;
}

/// The startup command for `exe`, quoted so paths with spaces survive.
pub fn quoted_command(exe: &Path) -> String {
    format!("\"{}\"", exe.display())
}

/// Reads and writes this application's startup entry. Nothing is cached:
/// every call goes to the store.
pub struct Autorun<S> {
    name: String,
    command: String,
    store: S,
}

impl<S: RunKeyStore> Autorun<S> {
    pub fn new(name: impl Into<String>, exe: &Path, store: S) -> Self {
        Autorun {
            name: name.into(),
            command: quoted_command(exe),
            store,
        }
    }

    pub fn status(&self) -> Result<bool, AutorunError> {
        self.store.contains(&self.name)
    }

    pub fn enable(&mut self) -> Result<(), AutorunError> {
        self.store.set(&self.name, &self.command)?;
        info!(name = %self.name, command = %self.command, "added to autorun");
        Ok(())
    }

    pub fn disable(&mut self) -> Result<(), AutorunError> {
        self.store.remove(&self.name)?;
        info!(name = %self.name, "removed from autorun");
        Ok(())
    }

    /// Flips the entry based on its live state and returns the new state.
    pub fn toggle(&mut self) -> Result<bool, AutorunError> {
        if self.status()? {
            self.disable()?;
            Ok(false)
        } else {
            self.enable()?;
            Ok(true)
        }
    }
}

#[cfg(windows)]
pub use self::registry::RegistryRunKey;

#[cfg(windows)]
mod registry {
    use super::{AutorunError, RunKeyStore, RUN_KEY};
    use std::io;
    use winreg::enums::{HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE};
    use winreg::RegKey;

    /// `HKCU\...\Run`. The key is opened with the narrowest access each
    /// operation needs and closed again when the call returns.
    #[derive(Default)]
    pub struct RegistryRunKey;

    fn open(access: u32) -> Result<RegKey, AutorunError> {
        RegKey::predef(HKEY_CURRENT_USER)
            .open_subkey_with_flags(RUN_KEY, access)
            .map_err(AutorunError::OpenKey)
    }

    impl RunKeyStore for RegistryRunKey {
        fn contains(&self, name: &str) -> Result<bool, AutorunError> {
            let key = open(KEY_QUERY_VALUE)?;
            match key.get_raw_value(name) {
                Ok(_) => Ok(true),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
                Err(source) => Err(AutorunError::Read {
                    name: name.to_string(),
                    source,
                }),
            }
        }

        fn set(&mut self, name: &str, command: &str) -> Result<(), AutorunError> {
            let key = open(KEY_SET_VALUE)?;
            key.set_value(name, &command.to_string())
                .map_err(|source| AutorunError::Write {
                    name: name.to_string(),
                    source,
                })
        }

        fn remove(&mut self, name: &str) -> Result<(), AutorunError> {
            let key = open(KEY_SET_VALUE)?;
            match key.delete_value(name) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(source) => Err(AutorunError::Delete {
                    name: name.to_string(),
                    source,
                }),
            }
        }
    }
}

#[cfg(test)]
pub use self::memory::MemoryRunKey;


#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn exe() -> PathBuf {
        PathBuf::from(r"C:\Program Files\Indicator\indicator.exe")
    }

    #[test]
    fn command_is_quoted() {
        assert_eq!(
            quoted_command(&exe()),
            "\"C:\\Program Files\\Indicator\\indicator.exe\""
        );
    }

    #[test]
    fn enable_then_status_is_true() {
        let store = MemoryRunKey::default();
        let mut autorun = Autorun::new("VirtualDesktopIndicator", &exe(), store.clone());
        assert!(!autorun.status().unwrap());

        autorun.enable().unwrap();
        assert!(autorun.status().unwrap());
        assert_eq!(
            store.get("VirtualDesktopIndicator").as_deref(),
            Some("\"C:\\Program Files\\Indicator\\indicator.exe\"")
        );
    }

    #[test]
    fn disable_then_status_is_false() {
        let mut autorun = Autorun::new("VirtualDesktopIndicator", &exe(), MemoryRunKey::default());
        autorun.enable().unwrap();
        autorun.disable().unwrap();
        assert!(!autorun.status().unwrap());
    }

    #[test]
    fn disable_without_entry_is_ok() {
        let mut autorun = Autorun::new("VirtualDesktopIndicator", &exe(), MemoryRunKey::default());
        autorun.disable().unwrap();
        assert!(!autorun.status().unwrap());
    }

    #[test]
    fn toggle_follows_live_state() {
        let store = MemoryRunKey::default();
        let mut autorun = Autorun::new("VirtualDesktopIndicator", &exe(), store.clone());

        assert!(autorun.toggle().unwrap());
        assert!(store.get("VirtualDesktopIndicator").is_some());

        // Someone else removes the entry behind our back.
        store.clone().remove("VirtualDesktopIndicator").unwrap();
        assert!(autorun.toggle().unwrap());

        assert!(!autorun.toggle().unwrap());
        assert!(store.get("VirtualDesktopIndicator").is_none());
    }

    #[test]
    fn entries_are_per_name() {
        let store = MemoryRunKey::default();
        let mut a = Autorun::new("A", &exe(), store.clone());
        let b = Autorun::new("B", &exe(), store.clone());
        a.enable().unwrap();
        assert!(a.status().unwrap());
        assert!(!b.status().unwrap());
    }
}
