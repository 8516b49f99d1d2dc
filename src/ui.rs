//! Colored console output: status lines, banner, countdown, window table,
//! progress, and the closing summary.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;
use crossterm::{cursor, execute, terminal};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::stats::Summary;
use crate::window::WindowInfo;

const TITLE_COLUMN_WIDTH: usize = 70;

/// Resolve console capabilities once, before any output. Safe to call
/// repeatedly; only the first call does anything.
pub fn init() {
    colors_enabled();
}

fn colors_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        let tty = io::stdout().is_tty();
        #[cfg(windows)]
        {
            // Probing also switches the console to VT processing.
            tty && crossterm::ansi_support::supports_ansi()
        }
        #[cfg(not(windows))]
        {
            tty
        }
    })
}

fn tagged(symbol: &str, color: Color, msg: &str) {
    if colors_enabled() {
        println!("{} {msg}", symbol.with(color));
    } else {
        println!("{symbol} {msg}");
    }
}

pub fn ok(msg: &str) {
    tagged("✓", Color::Green, msg);
}

pub fn info(msg: &str) {
    tagged("ℹ", Color::Cyan, msg);
}

pub fn warn(msg: &str) {
    tagged("⚠", Color::Yellow, msg);
}

pub fn action(msg: &str) {
    tagged("►", Color::Blue, msg);
}

pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {msg}", "✗".red());
    } else {
        eprintln!("✗ {msg}");
    }
}

pub fn banner(version: &str) {
    let title = format!("ghosttype {version}");
    let tagline = "types like a human does";
    let inner = title.width().max(tagline.width()) + 4;
    let top = format!("╭{}╮", "─".repeat(inner));
    let mid1 = format!("│  {:<w$}  │", title, w = inner - 4);
    let mid2 = format!("│  {:<w$}  │", tagline, w = inner - 4);
    let bottom = format!("╰{}╯", "─".repeat(inner));
    if colors_enabled() {
        println!("{}\n{}\n{}\n{}", top.cyan(), mid1.cyan(), mid2.cyan(), bottom.cyan());
    } else {
        println!("{top}\n{mid1}\n{mid2}\n{bottom}");
    }
}

/// In-place countdown giving the user time to reach the target window.
pub fn countdown(secs: u64) {
    if secs == 0 {
        return;
    }
    let mut out = io::stdout();
    for remaining in (1..=secs).rev() {
        let _ = execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(terminal::ClearType::CurrentLine)
        );
        let _ = write!(out, "► starting in {remaining}s");
        let _ = out.flush();
        thread::sleep(Duration::from_secs(1));
    }
    let _ = execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine)
    );
}

/// In-place character counter while a session runs.
pub fn progress(done: usize, total: usize) {
    let mut out = io::stdout();
    let _ = write!(out, "\r► {done}/{total} characters");
    let _ = out.flush();
}

/// Terminate the progress line once the loop is done.
pub fn progress_done() {
    println!();
}

/// Numbered table of visible windows, titles truncated to the column width.
pub fn window_table(windows: &[WindowInfo]) {
    if windows.is_empty() {
        warn("no visible windows found");
        return;
    }
    println!("{:>5}  {}", "index", "title");
    for (i, window) in windows.iter().enumerate() {
        println!("{i:>5}  {}", truncated(&window.title, TITLE_COLUMN_WIDTH));
    }
}

fn truncated(title: &str, max: usize) -> String {
    if title.width() <= max {
        return title.to_string();
    }
    let mut width = 0;
    let mut out = String::new();
    for ch in title.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Closing statistics block.
pub fn summary(s: &Summary) {
    ok("typing complete");
    println!("  characters  {}", s.chars_typed);
    println!("  typos       {}", s.typos);
    println!("  pauses      {}", s.pauses);
    println!("  elapsed     {:.1}s", s.elapsed.as_secs_f64());
    println!("  avg speed   {:.1} chars/s", s.chars_per_sec());
}
