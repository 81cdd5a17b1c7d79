#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "Domain models, session authentication, task and AI services, the store"]
#![doc = "backends, routing and error handling for the Taskboard server. The binary"]
#![doc = "(`main.rs`) only loads configuration and starts the HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
