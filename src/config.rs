use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::error::{Error, Result};

/// Inter-keystroke timing and typo behavior. All durations are seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingSpeed {
    pub min_delay: f64,
    pub max_delay: f64,
    pub mistake_probability: f64,
    pub correction_delay: f64,
}

impl Default for TypingSpeed {
    fn default() -> Self {
        Self {
            min_delay: 0.05,
            max_delay: 0.15,
            mistake_probability: 0.03,
            correction_delay: 0.5,
        }
    }
}

/// Distraction pauses and the breather between paragraphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanBehavior {
    pub pause_probability: f64,
    pub min_pause_duration: f64,
    pub max_pause_duration: f64,
    pub paragraph_pause: f64,
}

impl Default for HumanBehavior {
    fn default() -> Self {
        Self {
            pause_probability: 0.1,
            min_pause_duration: 0.5,
            max_pause_duration: 2.0,
            paragraph_pause: 1.0,
        }
    }
}

/// Which window receives the keystrokes. Serialized under the `browser`
/// group key, the format this tool has always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetWindow {
    pub window_title: String,
    pub focus_delay: f64,
    pub window_index: usize,
}

impl Default for TargetWindow {
    fn default() -> Self {
        Self {
            window_title: "Chrome".to_string(),
            focus_delay: 1.0,
            window_index: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    pub typing_speed: TypingSpeed,
    pub human_behavior: HumanBehavior,
    #[serde(rename = "browser")]
    pub target: TargetWindow,
}

/// Partial override parsed from a config file. Groups and fields the file
/// leaves out stay untouched; unknown top-level keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigPatch {
    pub typing_speed: Option<TypingSpeedPatch>,
    pub human_behavior: Option<HumanBehaviorPatch>,
    #[serde(rename = "browser")]
    pub target: Option<TargetWindowPatch>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TypingSpeedPatch {
    pub min_delay: Option<f64>,
    pub max_delay: Option<f64>,
    pub mistake_probability: Option<f64>,
    pub correction_delay: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HumanBehaviorPatch {
    pub pause_probability: Option<f64>,
    pub min_pause_duration: Option<f64>,
    pub max_pause_duration: Option<f64>,
    pub paragraph_pause: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TargetWindowPatch {
    pub window_title: Option<String>,
    pub focus_delay: Option<f64>,
    pub window_index: Option<usize>,
}

impl TypingSpeed {
    fn apply(&mut self, patch: TypingSpeedPatch) {
        if let Some(v) = patch.min_delay {
            self.min_delay = v;
        }
        if let Some(v) = patch.max_delay {
            self.max_delay = v;
        }
        if let Some(v) = patch.mistake_probability {
            self.mistake_probability = v;
        }
        if let Some(v) = patch.correction_delay {
            self.correction_delay = v;
        }
    }
}

impl HumanBehavior {
    fn apply(&mut self, patch: HumanBehaviorPatch) {
        if let Some(v) = patch.pause_probability {
            self.pause_probability = v;
        }
        if let Some(v) = patch.min_pause_duration {
            self.min_pause_duration = v;
        }
        if let Some(v) = patch.max_pause_duration {
            self.max_pause_duration = v;
        }
        if let Some(v) = patch.paragraph_pause {
            self.paragraph_pause = v;
        }
    }
}

impl TargetWindow {
    fn apply(&mut self, patch: TargetWindowPatch) {
        if let Some(v) = patch.window_title {
            self.window_title = v;
        }
        if let Some(v) = patch.focus_delay {
            self.focus_delay = v;
        }
        if let Some(v) = patch.window_index {
            self.window_index = v;
        }
    }
}

impl Config {
    /// Group-wise shallow merge: only fields present in the patch overwrite.
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(p) = patch.typing_speed {
            self.typing_speed.apply(p);
        }
        if let Some(p) = patch.human_behavior {
            self.human_behavior.apply(p);
        }
        if let Some(p) = patch.target {
            self.target.apply(p);
        }
    }

    /// Clamp probabilities into [0, 1], floor durations at zero, and swap
    /// reversed min/max ranges. The cadence planner assumes these hold; any
    /// adjustment is logged.
    pub fn normalized(mut self) -> Self {
        let speed = &mut self.typing_speed;
        speed.mistake_probability = norm_probability("mistake_probability", speed.mistake_probability);
        speed.correction_delay = norm_seconds("correction_delay", speed.correction_delay);
        (speed.min_delay, speed.max_delay) =
            norm_range("min_delay", speed.min_delay, "max_delay", speed.max_delay);

        let behavior = &mut self.human_behavior;
        behavior.pause_probability = norm_probability("pause_probability", behavior.pause_probability);
        behavior.paragraph_pause = norm_seconds("paragraph_pause", behavior.paragraph_pause);
        (behavior.min_pause_duration, behavior.max_pause_duration) = norm_range(
            "min_pause_duration",
            behavior.min_pause_duration,
            "max_pause_duration",
            behavior.max_pause_duration,
        );

        self.target.focus_delay = norm_seconds("focus_delay", self.target.focus_delay);
        self
    }
}

fn norm_probability(field: &str, value: f64) -> f64 {
    let fixed = if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if fixed != value {
        warn!(field, from = value, to = fixed, "clamped probability");
    }
    fixed
}

fn norm_seconds(field: &str, value: f64) -> f64 {
    let fixed = if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    };
    if fixed != value {
        warn!(field, from = value, to = fixed, "clamped duration");
    }
    fixed
}

fn norm_range(min_field: &str, min: f64, max_field: &str, max: f64) -> (f64, f64) {
    let min = norm_seconds(min_field, min);
    let max = norm_seconds(max_field, max);
    if min > max {
        warn!(%min_field, %max_field, "swapped reversed range");
        (max, min)
    } else {
        (min, max)
    }
}

/// What `ConfigFile::load` found on disk.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadStatus {
    /// File read and merged over the defaults.
    File,
    /// Nothing at the path.
    Missing,
    /// File present but unreadable or not valid JSON.
    Invalid(String),
}

/// On-disk config store. Loading is lenient so a broken config file never
/// blocks a typing session.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Defaults overlaid with whatever valid groups the file provides.
    pub fn load(&self) -> (Config, LoadStatus) {
        let mut config = Config::default();
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return (config, LoadStatus::Missing);
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "config unreadable, using defaults");
                return (config, LoadStatus::Invalid(err.to_string()));
            }
        };
        match serde_json::from_str::<ConfigPatch>(&strip_comment_lines(&raw)) {
            Ok(patch) => {
                config.apply(patch);
                (config, LoadStatus::File)
            }
            Err(err) => {
                warn!(path = %self.path.display(), %err, "config malformed, using defaults");
                (Config::default(), LoadStatus::Invalid(err.to_string()))
            }
        }
    }

    /// Persist the effective config as pretty JSON.
    pub fn save(&self, config: &Config) -> Result<()> {
        serde_json::to_vec_pretty(config)
            .map_err(io::Error::from)
            .and_then(|data| self.write_bytes(&data))
            .map_err(|source| Error::ConfigWrite {
                path: self.path.clone(),
                source,
            })
    }

    /// Write a fresh default config with a commented header. `load` skips
    /// the `//` lines, so created files round-trip.
    pub fn create_default(&self) -> Result<()> {
        serde_json::to_string_pretty(&Config::default())
            .map_err(io::Error::from)
            .and_then(|body| {
                let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M");
                let text = format!(
                    "// ghosttype configuration, created {stamp}\n\
                     // delays and pauses are seconds, probabilities run 0.0..1.0\n\
                     // \"browser\" picks the window that receives the keystrokes\n\
                     {body}\n"
                );
                self.write_bytes(text.as_bytes())
            })
            .map_err(|source| Error::ConfigWrite {
                path: self.path.clone(),
                source,
            })
    }

    fn write_bytes(&self, data: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, data)
    }
}

/// JSON proper has no comments; drop any line that opens with `//` before
/// handing the text to the parser.
fn strip_comment_lines(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.typing_speed.min_delay, 0.05);
        assert_eq!(cfg.typing_speed.max_delay, 0.15);
        assert_eq!(cfg.typing_speed.mistake_probability, 0.03);
        assert_eq!(cfg.typing_speed.correction_delay, 0.5);
        assert_eq!(cfg.human_behavior.pause_probability, 0.1);
        assert_eq!(cfg.human_behavior.min_pause_duration, 0.5);
        assert_eq!(cfg.human_behavior.max_pause_duration, 2.0);
        assert_eq!(cfg.human_behavior.paragraph_pause, 1.0);
        assert_eq!(cfg.target.window_title, "Chrome");
        assert_eq!(cfg.target.focus_delay, 1.0);
        assert_eq!(cfg.target.window_index, 0);
    }

    #[test]
    fn partial_patch_touches_only_named_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"typing_speed": {"min_delay": 0.01}}"#).unwrap();

        let (cfg, status) = ConfigFile::with_path(&path).load();
        assert_eq!(status, LoadStatus::File);
        assert_eq!(cfg.typing_speed.min_delay, 0.01);

        let defaults = Config::default();
        assert_eq!(cfg.typing_speed.max_delay, defaults.typing_speed.max_delay);
        assert_eq!(
            cfg.typing_speed.mistake_probability,
            defaults.typing_speed.mistake_probability
        );
        assert_eq!(cfg.human_behavior, defaults.human_behavior);
        assert_eq!(cfg.target, defaults.target);
    }

    #[test]
    fn unknown_top_level_keys_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"mouse": {"speed": 9}, "browser": {"window_title": "Firefox"}}"#,
        )
        .unwrap();

        let (cfg, status) = ConfigFile::with_path(&path).load();
        assert_eq!(status, LoadStatus::File);
        assert_eq!(cfg.target.window_title, "Firefox");
        assert_eq!(cfg.typing_speed, TypingSpeed::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let (cfg, status) = ConfigFile::with_path(&path).load();
        assert!(matches!(status, LoadStatus::Invalid(_)));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempdir().unwrap();
        let (cfg, status) = ConfigFile::with_path(dir.path().join("nope.json")).load();
        assert_eq!(status, LoadStatus::Missing);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store = ConfigFile::with_path(dir.path().join("config.json"));
        let mut cfg = Config::default();
        cfg.typing_speed.min_delay = 0.02;
        cfg.target.window_title = "Editor".into();
        cfg.target.window_index = 2;

        store.save(&cfg).unwrap();
        let (loaded, status) = store.load();
        assert_eq!(status, LoadStatus::File);
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn created_default_file_loads_despite_header() {
        let dir = tempdir().unwrap();
        let store = ConfigFile::with_path(dir.path().join("config.json"));
        store.create_default().unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("//"));

        let (loaded, status) = store.load();
        assert_eq!(status, LoadStatus::File);
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn normalized_repairs_out_of_range_values() {
        let mut cfg = Config::default();
        cfg.typing_speed.mistake_probability = 1.7;
        cfg.typing_speed.min_delay = 0.9;
        cfg.typing_speed.max_delay = 0.1;
        cfg.human_behavior.pause_probability = -0.3;
        cfg.target.focus_delay = -2.0;

        let cfg = cfg.normalized();
        assert_eq!(cfg.typing_speed.mistake_probability, 1.0);
        assert_eq!(cfg.typing_speed.min_delay, 0.1);
        assert_eq!(cfg.typing_speed.max_delay, 0.9);
        assert_eq!(cfg.human_behavior.pause_probability, 0.0);
        assert_eq!(cfg.target.focus_delay, 0.0);
    }
}
