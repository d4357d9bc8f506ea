#![doc = "The `todo_service` library crate."]
#![doc = ""]
#![doc = "Domain models, token and password handling, the persistence seam, routing and"]
#![doc = "error handling for the todo service. The binary (`main.rs`) wires these together"]
#![doc = "from a `Config`; the integration tests build the same app around a `MemoryStore`."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::AppError;
pub use crate::store::{MemoryStore, PgStore, Store};
