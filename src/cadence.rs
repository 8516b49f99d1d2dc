//! Per-character typing plans.
//!
//! Planning is pure: randomness comes in through the caller's generator and
//! waiting is described rather than performed, so a seeded generator
//! reproduces a plan exactly. Execution of a plan lives in [`crate::session`].

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{HumanBehavior, TypingSpeed};
use crate::layout;

/// One planned input action. Suspensions block the executor for their
/// duration; keystroke steps go to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Distraction pause before the key is touched. Counted in the session
    /// statistics.
    Pause(Duration),
    /// Fixed breather when two consecutive newlines close a paragraph.
    ParagraphPause(Duration),
    /// A neighboring key pressed by mistake, held for the correction delay,
    /// then removed with a single backspace.
    Typo { slip: char, hold: Duration },
    /// The character itself.
    Key(char),
    /// Inter-keystroke jitter after the key.
    Rest(Duration),
}

/// Plan the actions for typing `current`, given the character typed before it
/// (`None` at the start of the buffer).
///
/// The config must be normalized (see [`crate::config::Config::normalized`]):
/// probabilities in [0, 1], durations finite and non-negative, ranges
/// ordered. Draws happen in a fixed order (pause gate, pause length, typo
/// gate, neighbor pick, jitter length) so plans are reproducible under a
/// seeded generator.
pub fn plan_char(
    current: char,
    previous: Option<char>,
    speed: &TypingSpeed,
    behavior: &HumanBehavior,
    rng: &mut impl Rng,
) -> Vec<Step> {
    let mut steps = Vec::with_capacity(3);

    if rng.gen_bool(behavior.pause_probability) {
        let secs = rng.gen_range(behavior.min_pause_duration..=behavior.max_pause_duration);
        steps.push(Step::Pause(Duration::from_secs_f64(secs)));
    }

    if previous == Some('\n') && current == '\n' {
        steps.push(Step::ParagraphPause(Duration::from_secs_f64(
            behavior.paragraph_pause,
        )));
    }

    if rng.gen_bool(speed.mistake_probability) {
        // Unmapped characters have no plausible neighbor; skip the typo
        // rather than invent one.
        if let Some(&slip) = layout::nearby_keys(current).choose(rng) {
            steps.push(Step::Typo {
                slip,
                hold: Duration::from_secs_f64(speed.correction_delay),
            });
        }
    }

    steps.push(Step::Key(current));

    let jitter = rng.gen_range(speed.min_delay..=speed.max_delay);
    if jitter > 0.0 {
        steps.push(Step::Rest(Duration::from_secs_f64(jitter)));
    }

    steps
}
