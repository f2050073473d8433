//! HTTP service for text analysis and stock reports
//!
//! Routes:
//! - `GET /health`
//! - `POST /analyze-text` with `{"text": "..."}`
//! - `GET /analyze-stock/:ticker`

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{AppState, build_router, validate_ticker};
