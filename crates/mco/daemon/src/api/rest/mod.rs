//! REST API: router, shared state, query parameters and handlers

pub mod handlers;
pub mod params;
pub mod router;
pub mod state;
