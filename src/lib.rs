pub mod card;
pub mod config;
pub mod error;
pub mod feeds;
pub mod logging;
pub mod pipeline;
pub mod time_ago;

pub use config::{CardLayout, Config};
pub use error::NekoError;
pub use pipeline::{run, run_with_config, Outcome};
