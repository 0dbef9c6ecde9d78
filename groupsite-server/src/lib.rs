//! groupsite-server: data-access API for the group site
//!
//! Exposes the `contacts`, `group_description` and `reviews` tables over
//! HTTP using react-admin's list conventions. Storage sits behind the
//! [`db::QueryGateway`] trait, injected when the router is built.

pub mod db;
pub mod http;
pub mod models;

pub use db::{MemoryGateway, PgGateway, QueryGateway, Table};
pub use http::{build_router, run_server, ServerConfig};
