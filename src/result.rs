//! Result type used by the binary entry point.
//!
//! Library code returns [`crate::error::Result`] with typed errors; the binary
//! wraps everything in `color-eyre` for colorized reports and context.
//!
//! ```rust,ignore
//! use color_eyre::eyre::Context;
//! use release_butler::result::Result;
//!
//! fn run() -> Result<()> {
//!     let config = config::loader::load(None)
//!         .wrap_err("failed to load configuration")?;
//!     Ok(())
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used by the command line entry point.
pub type Result<T> = EyreResult<T>;
