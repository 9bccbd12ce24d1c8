//! Catalog ingestion and read-only queries.

pub mod ingest;
pub mod query_handlers;
