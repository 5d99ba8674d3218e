//! Authentication

mod errors;
mod models;
pub mod passwords;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub(crate) use repository::PgSessionsRepository;
pub use service::*;
pub(crate) use service::issue_session;
pub use token::*;
