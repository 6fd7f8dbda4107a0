//! Dashboard pipeline, saved filters and the `eventsieve` command line.

pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod session;

pub use cli::Cli;
pub use dashboard::{Dashboard, DashboardView, SavedFilters};
pub use error::{ClientError, ClientResult};
pub use session::Session;
