//! Encapsulates Windows API calls.

use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use std::process::Command;
use std::{env, io, mem, ptr};
use winapi::shared::winerror;
use winapi::um::winnt::HANDLE;
use winapi::um::{errhandlingapi, handleapi, synchapi, winuser};

pub use winapi::um::winuser::MSG;

fn wide(s: &str) -> Vec<u16> {
    OsStr::new(s).encode_wide().chain(Some(0)).collect()
}

/// Holds a named mutex for as long as this process should be the only instance.
pub struct InstanceGuard(HANDLE);

impl InstanceGuard {
    /// Returns `None` when another instance already owns the mutex.
    pub fn acquire(app_name: &str) -> Option<Self> {
        let name = wide(&format!("{app_name}Mutex"));
        unsafe {
            let handle = synchapi::CreateMutexW(ptr::null_mut(), 0, name.as_ptr());
            if handle.is_null() {
                return None;
            }
            if errhandlingapi::GetLastError() == winerror::ERROR_ALREADY_EXISTS {
                handleapi::CloseHandle(handle);
                return None;
            }
            Some(InstanceGuard(handle))
        }
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        unsafe {
            handleapi::CloseHandle(self.0);
        }
    }
}

/// Whether `msg` is a tick of a window-less thread timer.
pub fn is_thread_timer(msg: &MSG) -> bool {
    msg.message == winuser::WM_TIMER && msg.hwnd.is_null()
}

/// Runs the thread's message loop until `WM_QUIT`, handing every message to
/// `on_message` after it was dispatched.
pub fn message_loop(mut on_message: impl FnMut(&MSG)) {
    let mut msg: MSG = unsafe { mem::zeroed() };
    loop {
        let ret = unsafe { winuser::GetMessageW(&mut msg, ptr::null_mut(), 0, 0) };
        if ret <= 0 {
            break;
        }
        unsafe {
            winuser::TranslateMessage(&msg);
            winuser::DispatchMessageW(&msg);
        }
        on_message(&msg);
    }
}

/// Asks the message loop to end.
pub fn quit() {
    unsafe { winuser::PostQuitMessage(0) };
}

/// Starts a new copy of this executable with the same arguments.
pub fn spawn_successor() -> io::Result<()> {
    let exe = env::current_exe()?;
    Command::new(exe).args(env::args_os().skip(1)).spawn()?;
    Ok(())
}
