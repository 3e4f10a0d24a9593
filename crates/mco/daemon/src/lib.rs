//! MCO mock API daemon library
//!
//! This module provides the core components of the daemon:
//! - REST API router and handlers for the eight MCO endpoints
//! - Query-parameter declarations (the filter bag clients send)
//! - Configuration and server lifecycle management

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::DaemonConfig;
pub use error::{ApiError, DaemonError};
pub use server::Server;
