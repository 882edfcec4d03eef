//! HTTP handlers for Casefile API

pub mod accused;
pub mod cases;
pub mod challan;
pub mod lookups;
pub mod memos;
pub mod pdf;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}
