//! HTTP surface and process wiring for pairwatch.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`server`] | axum router: `POST /analyze`, `GET /health` |
//! | [`logging`] | `tracing-subscriber` initialisation |

pub mod logging;
pub mod server;

pub use server::{router, AppState, ErrorBody};
