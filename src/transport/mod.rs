//! The `transport` module serves the query interface over HTTP.
//!
//! It exposes per-target status lookups, a JSON overview of every target,
//! and a websocket live feed that streams the overview followed by each
//! transition the hub fans out.

pub mod http;
pub mod message;
pub mod websocket;

pub use http::{AppState, bind, create_router, serve};
pub use message::{Overview, ServerMessage, StatusResponse};

#[cfg(test)]
mod tests;
