//! # Deoxys Server
//!
//! Axum front end for the Deoxys backend:
//!
//! - `POST /chat`: fallback chat orchestration
//! - `POST /image`: image proxy returning a data URL
//! - `GET /health`: liveness check

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::ServerError;
pub use routes::{router, AppState};
