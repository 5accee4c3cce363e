//! Release classification and versioning.
//!
//! Both halves are pure: they work on pull requests and configuration that
//! the forge layer already fetched.

/// Release notes classification and rendering.
pub mod notes;

/// Version parsing, formatting and increment rules.
pub mod version;

pub use notes::{NoteBucket, NoteFormat, classify, generate, render};
pub use version::{
    Increment, VersionIncrementer, format_version, parse_version,
};
