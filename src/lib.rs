// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod cadence;
pub mod config;
pub mod error;
pub mod injector;
pub mod layout;
pub mod session;
pub mod stats;
pub mod ui;
pub mod window;

pub use config::{Config, ConfigFile, LoadStatus};
pub use error::{Error, Result};
pub use session::Session;
pub use stats::Summary;
