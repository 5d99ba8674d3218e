//! Catalog Handlers

pub(crate) mod brands;
pub(crate) mod categories;
pub(crate) mod get;
pub(crate) mod home;
pub(crate) mod index;
pub(crate) mod reviews;
pub(crate) mod user_reviews;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use bazaar_app::domain::catalog::models::{
        Category, CategoryUuid, Product, ProductSummary, ProductUuid,
    };

    pub(crate) fn make_summary(slug: &str, price: u64) -> ProductSummary {
        ProductSummary {
            uuid: ProductUuid::new(),
            name: slug.to_string(),
            slug: slug.to_string(),
            category_name: "پیراهن".to_string(),
            category_slug: "shirts".to_string(),
            brand_name: None,
            price,
            old_price: None,
            stock: 5,
            is_available: true,
            label: None,
            views_count: 0,
            main_image: None,
            average_rating: None,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    pub(crate) fn make_product(slug: &str, price: u64) -> Product {
        Product {
            uuid: ProductUuid::new(),
            name: slug.to_string(),
            slug: slug.to_string(),
            category: CategoryUuid::new(),
            category_name: "پیراهن".to_string(),
            category_slug: "shirts".to_string(),
            brand: None,
            brand_name: None,
            description: String::new(),
            full_description: String::new(),
            price,
            old_price: None,
            stock: 5,
            is_available: true,
            is_active: true,
            label: None,
            views_count: 0,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    pub(crate) fn make_category(slug: &str) -> Category {
        Category {
            uuid: CategoryUuid::new(),
            name: slug.to_string(),
            slug: slug.to_string(),
            parent: None,
            description: String::new(),
            is_active: true,
            product_count: 0,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }
}
