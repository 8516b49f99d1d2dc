//! Window discovery and activation.
//!
//! Windows has a real backend; macOS is stubbed; everything else lists
//! nothing. Headless use goes through the dry-run path, which skips window
//! resolution entirely.

#[cfg(target_os = "macos")]
mod macos;
#[cfg(windows)]
mod win32;

use tracing::warn;

use crate::error::{Error, Result};

/// A top-level window as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: usize,
    pub title: String,
}

/// Platform window access. One real backend per OS plus a scripted fake for
/// tests.
pub trait WindowSource {
    /// Currently visible top-level windows that carry a title.
    fn windows(&self) -> Vec<WindowInfo>;

    /// Bring the window to the foreground.
    fn activate(&self, window: &WindowInfo) -> Result<()>;
}

/// The operating system's own window list.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWindows;

impl WindowSource for SystemWindows {
    fn windows(&self) -> Vec<WindowInfo> {
        #[cfg(windows)]
        {
            win32::list_windows()
        }
        #[cfg(target_os = "macos")]
        {
            macos::list_windows()
        }
        #[cfg(not(any(windows, target_os = "macos")))]
        {
            Vec::new()
        }
    }

    fn activate(&self, window: &WindowInfo) -> Result<()> {
        #[cfg(windows)]
        {
            win32::activate(window)
        }
        #[cfg(target_os = "macos")]
        {
            macos::activate(window)
        }
        #[cfg(not(any(windows, target_os = "macos")))]
        {
            Err(Error::WindowActivation {
                title: window.title.clone(),
                reason: "no window backend on this platform".into(),
            })
        }
    }
}

/// Pick the target window by case-insensitive title substring and configured
/// index. An out-of-range index falls back to the first match with a warning;
/// zero matches is an error. Returns the pick and how many windows matched.
pub fn resolve(
    source: &dyn WindowSource,
    title: &str,
    index: usize,
) -> Result<(WindowInfo, usize)> {
    let needle = title.to_lowercase();
    let matches: Vec<WindowInfo> = source
        .windows()
        .into_iter()
        .filter(|w| w.title.to_lowercase().contains(&needle))
        .collect();

    if matches.is_empty() {
        return Err(Error::WindowNotFound(title.to_string()));
    }

    let matched = matches.len();
    let picked = if index < matched {
        matches[index].clone()
    } else {
        warn!(index, matched, "window index out of range, using first match");
        matches[0].clone()
    };
    Ok((picked, matched))
}

/// Scripted window source for tests: a fixed window list, optional
/// activation failure, and a record of which handles were activated.
#[derive(Debug, Default)]
pub struct FakeWindows {
    pub windows: Vec<WindowInfo>,
    pub fail_activation: bool,
    activated: std::cell::RefCell<Vec<usize>>,
}

impl FakeWindows {
    pub fn with_titles(titles: &[&str]) -> Self {
        Self {
            windows: titles
                .iter()
                .enumerate()
                .map(|(i, t)| WindowInfo {
                    handle: i + 1,
                    title: (*t).to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Handles passed to `activate`, in call order.
    pub fn activated(&self) -> Vec<usize> {
        self.activated.borrow().clone()
    }
}

impl WindowSource for FakeWindows {
    fn windows(&self) -> Vec<WindowInfo> {
        self.windows.clone()
    }

    fn activate(&self, window: &WindowInfo) -> Result<()> {
        if self.fail_activation {
            return Err(Error::WindowActivation {
                title: window.title.clone(),
                reason: "scripted failure".into(),
            });
        }
        self.activated.borrow_mut().push(window.handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn source() -> FakeWindows {
        FakeWindows::with_titles(&[
            "Inbox - Thunderbird",
            "report.md - Editor",
            "notes.md - Editor",
            "Terminal",
        ])
    }

    #[test]
    fn picks_first_match_at_index_zero() {
        let (picked, matched) = resolve(&source(), "Editor", 0).unwrap();
        assert_eq!(picked.title, "report.md - Editor");
        assert_eq!(matched, 2);
    }

    #[test]
    fn index_selects_among_matches() {
        let (picked, _) = resolve(&source(), "Editor", 1).unwrap();
        assert_eq!(picked.title, "notes.md - Editor");
    }

    #[test]
    fn out_of_range_index_falls_back_to_first() {
        let (picked, matched) = resolve(&source(), "Editor", 9).unwrap();
        assert_eq!(picked.title, "report.md - Editor");
        assert_eq!(matched, 2);
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let (picked, _) = resolve(&source(), "terminal", 0).unwrap();
        assert_eq!(picked.title, "Terminal");
        let (picked, _) = resolve(&source(), "THUNDER", 0).unwrap();
        assert_eq!(picked.title, "Inbox - Thunderbird");
    }

    #[test]
    fn zero_matches_is_an_error() {
        let err = resolve(&source(), "Chrome", 0).unwrap_err();
        assert_matches!(err, Error::WindowNotFound(title) => assert_eq!(title, "Chrome"));
    }

    #[test]
    fn fake_records_activations() {
        let fake = source();
        let (picked, _) = resolve(&fake, "Terminal", 0).unwrap();
        fake.activate(&picked).unwrap();
        assert_eq!(fake.activated(), vec![4]);
    }
}
