//! Persistence, services and operator tooling for the Bazaar storefront.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod notices;
pub mod uuids;

#[cfg(test)]
mod test;
