// Middleware for cross-origin access

pub mod cors;

pub use cors::*;
