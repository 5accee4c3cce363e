//! Interface to the GitHub repository the butler manages.
//!
//! Provides token-based authentication, label, pull request, branch and
//! release operations through a common trait, and a manager adding dry-run
//! support and the composite queries the commands need.

/// Connection configuration and authentication.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Forge wrapper adding dry-run and composite operations.
pub mod manager;

/// Request and response types shared by forge implementations.
pub mod request;

/// Common trait for forge abstraction.
pub mod traits;
