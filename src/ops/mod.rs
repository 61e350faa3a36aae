//! User-facing operations behind the CLI subcommands.
//!
//! Each module orchestrates one operation: it reads or mutates the state
//! container, prints what the user asked for, and leaves all domain rules
//! to the core modules.

pub mod clear;
pub mod confirm;
pub mod history;
pub mod log;
pub mod settings;
pub mod stats;
pub mod status;
pub mod watch;
pub mod weather;

pub use clear::clear_logs;
pub use confirm::quick_confirm;
pub use history::show_history;
pub use log::record_log;
pub use settings::configure;
pub use stats::show_stats;
pub use status::show_status;
pub use watch::watch;
pub use weather::show_weather;
