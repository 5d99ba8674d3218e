//! Cart Repositories

mod items;
mod products;

pub(crate) use items::PgCartItemsRepository;
pub(crate) use products::PgCartProductsRepository;
