//! macOS backend.
//!
//! TODO: enumerate via CGWindowListCopyWindowInfo (core-graphics crate)
//! TODO: activate via NSRunningApplication activate (objc2-app-kit crate)

use super::WindowInfo;
use crate::error::{Error, Result};

pub(super) fn list_windows() -> Vec<WindowInfo> {
    Vec::new()
}

pub(super) fn activate(window: &WindowInfo) -> Result<()> {
    Err(Error::WindowActivation {
        title: window.title.clone(),
        reason: "window activation is not implemented on macOS".into(),
    })
}
