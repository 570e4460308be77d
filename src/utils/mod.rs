//! Utility helpers: link joining.
pub mod links;

pub use links::join_links;
