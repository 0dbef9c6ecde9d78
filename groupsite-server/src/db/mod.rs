//! Database layer - gateway trait, its implementations, and repositories
//!
//! # Design Principles
//!
//! - Handlers never see SQL; they go through a repository
//! - Repositories only talk to `dyn QueryGateway`, injected via `AppState`
//! - Every statement is parameterized; identifiers come from [`Table`]

pub mod gateway;
pub mod memory;
pub mod postgres;
pub mod repos;

pub use gateway::{DbError, QueryGateway, Table};
pub use memory::MemoryGateway;
pub use postgres::{PgGateway, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
