//! Content

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::ContentServiceError;
pub use service::*;
