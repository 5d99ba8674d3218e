//! Content Handlers

pub(crate) mod about;
pub(crate) mod contact;
pub(crate) mod menu;
pub(crate) mod messages;
