pub mod core;
pub mod logging;
pub mod utils;

pub use workflow_overlay_types::{form, identity};

/// Current crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Result<T> = std::result::Result<T, anyhow::Error>;
