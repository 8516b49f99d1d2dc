//! Session orchestration: focus the target window once, then execute the
//! per-character typing plans against a keystroke sink.

use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::cadence::{self, Step};
use crate::config::Config;
use crate::error::Result;
use crate::injector::{ControlKey, KeySink};
use crate::stats::{SessionStats, Summary};
use crate::ui;
use crate::window::{self, WindowInfo, WindowSource};

/// One typing run. The resolved window is held for the whole session and
/// never re-resolved, even if focus is lost midway.
pub struct Session {
    config: Config,
    window: Option<WindowInfo>,
    quiet: bool,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config: config.normalized(),
            window: None,
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Type `text` into the target window. `windows` is the platform window
    /// source, or `None` for a dry run that skips resolution and focus.
    pub fn run(
        &mut self,
        text: &str,
        windows: Option<&dyn WindowSource>,
        sink: &mut dyn KeySink,
    ) -> Result<Summary> {
        self.run_with_rng(text, windows, sink, &mut rand::thread_rng())
    }

    /// [`Session::run`] with a caller-supplied generator so sessions can be
    /// replayed under a fixed seed.
    pub fn run_with_rng<R: Rng>(
        &mut self,
        text: &str,
        windows: Option<&dyn WindowSource>,
        sink: &mut dyn KeySink,
        rng: &mut R,
    ) -> Result<Summary> {
        if let Some(source) = windows {
            self.focus_target(source)?;
        }

        let chars: Vec<char> = text.chars().collect();
        let show_progress = !self.quiet && windows.is_some();
        if !self.quiet {
            ui::info(&format!("typing {} characters", chars.len()));
        }

        let mut stats = SessionStats::start();
        let mut previous = None;
        for (done, &ch) in chars.iter().enumerate() {
            let plan = cadence::plan_char(
                ch,
                previous,
                &self.config.typing_speed,
                &self.config.human_behavior,
                rng,
            );
            for step in plan {
                execute_step(step, sink, &mut stats)?;
            }
            if show_progress {
                ui::progress(done + 1, chars.len());
            }
            previous = Some(ch);
        }
        if show_progress && !chars.is_empty() {
            ui::progress_done();
        }

        Ok(stats.finish())
    }

    /// Resolve the target window once per session and give it focus. Aborts
    /// before any keystroke when nothing matches or activation fails.
    fn focus_target(&mut self, source: &dyn WindowSource) -> Result<()> {
        if self.window.is_some() {
            return Ok(());
        }
        let target = &self.config.target;
        let (picked, matched) =
            window::resolve(source, &target.window_title, target.window_index)?;
        debug!(title = %picked.title, matched, "target resolved");
        if target.window_index >= matched {
            ui::warn(&format!(
                "window index {} out of range, using the first match",
                target.window_index
            ));
        }
        if !self.quiet {
            ui::info(&format!(
                "{matched} window(s) match \"{}\"",
                target.window_title
            ));
            ui::action(&format!("focusing \"{}\"", picked.title));
        }
        source.activate(&picked)?;
        sleep_secs(target.focus_delay);
        self.window = Some(picked);
        Ok(())
    }
}

fn execute_step(step: Step, sink: &mut dyn KeySink, stats: &mut SessionStats) -> Result<()> {
    match step {
        Step::Pause(d) => {
            thread::sleep(d);
            stats.record_pause();
        }
        Step::ParagraphPause(d) => thread::sleep(d),
        Step::Typo { slip, hold } => {
            sink.send_char(slip)?;
            thread::sleep(hold);
            sink.press(ControlKey::Backspace)?;
            stats.record_typo();
        }
        Step::Key(ch) => {
            sink.send_char(ch)?;
            stats.record_char();
        }
        Step::Rest(d) => thread::sleep(d),
    }
    Ok(())
}

fn sleep_secs(secs: f64) {
    if secs > 0.0 {
        thread::sleep(Duration::from_secs_f64(secs));
    }
}
