//! Access to the current virtual desktop number.

use super::error::DesktopError;

/// Anything that can report which virtual desktop is active.
pub trait DesktopSource {
    /// The 1-based number of the active desktop.
    fn current(&mut self) -> Result<u32, DesktopError>;
}

/// Rejects desktop numbers below 1.
pub fn validate(number: i64) -> Result<u32, DesktopError> {
    if number < 1 {
        return Err(DesktopError::NonPositiveIndex(number));
    }
    u32::try_from(number).map_err(|_| DesktopError::Query(format!("desktop number {number} out of range")))
}

#[cfg(windows)]
pub use self::windows::VirtualDesktops;

#[cfg(windows)]
mod windows {
    use super::{validate, DesktopError, DesktopSource};

    /// Queries the shell's virtual desktop service.
    #[derive(Default)]
    pub struct VirtualDesktops;

    impl DesktopSource for VirtualDesktops {
        fn current(&mut self) -> Result<u32, DesktopError> {
            let desktop =
                winvd::get_current_desktop().map_err(|e| DesktopError::Query(format!("{e:?}")))?;
            let index = desktop
                .get_index()
                .map_err(|e| DesktopError::Query(format!("{e:?}")))?;
            validate(i64::from(index) + 1)
        }
    }
}
