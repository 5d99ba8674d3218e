//! Discount Handlers

pub(crate) mod apply;
pub(crate) mod remove;
