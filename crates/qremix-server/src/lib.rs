//! QRemix completion server
//!
//! Thin HTTP front end for [`qremix_completion`]: request parsing, CORS, request logging and
//! configuration loading. All completion logic lives in the engine crate.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod state;

pub use crate::config::{CliArgs, ConfigManager, ServerConfig};
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use server::ApiServer;
pub use state::AppState;
