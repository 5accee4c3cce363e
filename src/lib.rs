pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod forge;
pub mod labeler;
pub mod release;
pub mod result;

pub use cli::{Args, Command};
pub use error::{ButlerError, Result};

#[cfg(test)]
pub mod test_helpers;
