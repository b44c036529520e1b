//! Shared types for the storefront
//!
//! Data models shared between the catalog engine and the presentation
//! layer (controllers/views live outside this workspace and consume
//! these types through the engine's API).

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
