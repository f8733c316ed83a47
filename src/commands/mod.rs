//! Command implementations behind the `railpkg` binary.

mod classify;
mod clean;
pub mod config;
mod install;
mod list;
mod remove;

pub use classify::classify;
pub use clean::clean;
pub use install::{add, check};
pub use list::list;
pub use remove::{impact, remove};
