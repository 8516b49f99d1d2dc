//! Win32 backend: enumerate visible titled windows, activate by handle.

use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;

use windows_sys::Win32::Foundation::{BOOL, HWND, LPARAM, TRUE};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextLengthW, GetWindowTextW, IsWindowVisible, SetForegroundWindow,
    ShowWindow, SW_RESTORE,
};

use super::WindowInfo;
use crate::error::{Error, Result};

pub(super) fn list_windows() -> Vec<WindowInfo> {
    let mut windows: Vec<WindowInfo> = Vec::new();
    unsafe {
        EnumWindows(Some(enum_proc), &mut windows as *mut _ as LPARAM);
    }
    windows
}

unsafe extern "system" fn enum_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let windows = &mut *(lparam as *mut Vec<WindowInfo>);

    if IsWindowVisible(hwnd) == 0 {
        return TRUE;
    }
    let len = GetWindowTextLengthW(hwnd);
    if len <= 0 {
        return TRUE;
    }

    let mut buf = vec![0u16; len as usize + 1];
    let read = GetWindowTextW(hwnd, buf.as_mut_ptr(), buf.len() as i32);
    if read > 0 {
        let title = OsString::from_wide(&buf[..read as usize])
            .to_string_lossy()
            .into_owned();
        windows.push(WindowInfo {
            handle: hwnd as usize,
            title,
        });
    }
    TRUE
}

pub(super) fn activate(window: &WindowInfo) -> Result<()> {
    let hwnd = window.handle as HWND;
    unsafe {
        // Restore first so a minimized window actually comes forward.
        ShowWindow(hwnd, SW_RESTORE);
        if SetForegroundWindow(hwnd) == 0 {
            return Err(Error::WindowActivation {
                title: window.title.clone(),
                reason: "SetForegroundWindow refused the request".into(),
            });
        }
    }
    Ok(())
}
