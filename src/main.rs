use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghosttype::config::{Config, ConfigFile, LoadStatus};
use ghosttype::error::{Error, Result};
use ghosttype::injector::{ConsoleSink, EnigoSink};
use ghosttype::session::Session;
use ghosttype::ui;
use ghosttype::window::{SystemWindows, WindowSource};

const DEFAULT_INPUT_FILE: &str = "text.txt";

/// types text into a target window with humanlike rhythm
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Types text into a target window with humanlike rhythm: random inter-keystroke jitter, occasional distraction pauses, paragraph breathers, and self-corrected nearby-key typos."
)]
pub struct Cli {
    /// text to type
    #[clap(short = 't', long)]
    text: Option<String>,

    /// file to read the text from (default: text.txt)
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// config file to load
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// save the effective config to a file (exits if no input is given)
    #[clap(short = 's', long, value_name = "PATH")]
    save_config: Option<PathBuf>,

    /// write a fresh default config with comments and exit
    #[clap(long, value_name = "PATH")]
    create_config: Option<PathBuf>,

    /// title of the window to type into
    #[clap(short = 'w', long)]
    window: Option<String>,

    /// which match to pick when several windows share the title
    #[clap(short = 'i', long)]
    window_index: Option<usize>,

    /// list visible windows and exit
    #[clap(long)]
    list_windows: bool,

    /// minimum inter-keystroke delay in seconds
    #[clap(long, value_name = "SECS")]
    min_delay: Option<f64>,

    /// maximum inter-keystroke delay in seconds
    #[clap(long, value_name = "SECS")]
    max_delay: Option<f64>,

    /// probability of a self-corrected typo per character (0.0..1.0)
    #[clap(long, value_name = "PROB")]
    mistake_rate: Option<f64>,

    /// seconds to wait before typing starts
    #[clap(short = 'd', long, default_value_t = 3)]
    delay: u64,

    /// suppress status output
    #[clap(short = 'q', long)]
    quiet: bool,

    /// render keystrokes on the console instead of a window
    #[clap(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "ghosttype=warn".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();

    ui::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if !cli.quiet {
        ui::banner(env!("CARGO_PKG_VERSION"));
    }

    if cli.list_windows {
        ui::window_table(&SystemWindows.windows());
        return Ok(());
    }

    if let Some(path) = &cli.create_config {
        let store = ConfigFile::with_path(path);
        store.create_default()?;
        ui::ok(&format!(
            "default config written to {}",
            store.path().display()
        ));
        return Ok(());
    }

    let config = load_config(&cli);

    if let Some(path) = &cli.save_config {
        let store = ConfigFile::with_path(path);
        store.save(&config)?;
        if !cli.quiet {
            ui::ok(&format!("config saved to {}", store.path().display()));
        }
        // Saving without any input is a complete run on its own.
        if cli.text.is_none() && cli.file.is_none() {
            return Ok(());
        }
    }

    let text = read_input(&cli)?;

    let mut session = Session::new(config).quiet(cli.quiet);
    let summary = if cli.dry_run {
        startup_delay(&cli);
        let mut sink = ConsoleSink::new();
        session.run(&text, None, &mut sink)?
    } else {
        // Bring the backend up before the countdown so a missing input
        // stack fails fast instead of after the wait.
        let mut sink = EnigoSink::new()?;
        startup_delay(&cli);
        session.run(&text, Some(&SystemWindows), &mut sink)?
    };

    if !cli.quiet {
        if cli.dry_run {
            println!();
        }
        ui::summary(&summary);
    }
    Ok(())
}

/// Defaults, overlaid by the config file, overlaid by CLI flags.
fn load_config(cli: &Cli) -> Config {
    let store = match &cli.config {
        Some(path) => Some(ConfigFile::with_path(path)),
        // Without -c, only read the default location if something is there.
        None => {
            let store = ConfigFile::new();
            store.exists().then_some(store)
        }
    };

    let mut config = match &store {
        Some(store) => {
            let (config, status) = store.load();
            match status {
                LoadStatus::File => {
                    if !cli.quiet {
                        ui::info(&format!("config loaded from {}", store.path().display()));
                    }
                }
                LoadStatus::Missing => {
                    ui::warn(&format!(
                        "config file {} not found, using defaults",
                        store.path().display()
                    ));
                }
                LoadStatus::Invalid(reason) => {
                    ui::warn(&format!(
                        "could not read config {}: {reason}",
                        store.path().display()
                    ));
                    ui::warn("using default configuration");
                }
            }
            config
        }
        None => Config::default(),
    };

    if let Some(v) = cli.min_delay {
        config.typing_speed.min_delay = v;
    }
    if let Some(v) = cli.max_delay {
        config.typing_speed.max_delay = v;
    }
    if let Some(v) = cli.mistake_rate {
        config.typing_speed.mistake_probability = v;
    }
    if let Some(v) = &cli.window {
        config.target.window_title = v.clone();
    }
    if let Some(v) = cli.window_index {
        config.target.window_index = v;
    }

    config
}

fn read_input(cli: &Cli) -> Result<String> {
    if let Some(text) = &cli.text {
        return Ok(text.clone());
    }
    let path = cli
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_FILE));
    fs::read_to_string(&path).map_err(|source| Error::InputFile { path, source })
}

/// Give the user time to reach the target window before the first key.
fn startup_delay(cli: &Cli) {
    if cli.delay == 0 {
        return;
    }
    if cli.quiet {
        thread::sleep(Duration::from_secs(cli.delay));
    } else {
        ui::countdown(cli.delay);
    }
}
