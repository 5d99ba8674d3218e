//! Catalog service.

use async_trait::async_trait;
use bazaar::catalog::{Page, Rating};
use mockall::automock;
use tracing::{debug, instrument};

use crate::{
    database::Db,
    domain::{
        accounts::{models::UserUuid, repository::PgAccountsRepository},
        catalog::{
            errors::CatalogServiceError,
            models::{
                Brand, Category, HOME_CATEGORY_COUNT, HOME_RAIL_SIZE, HomeFeed, NewBrand,
                NewCategory, NewProduct, NewReview, Product, ProductDetail, ProductFilter,
                ProductListing, RELATED_PRODUCT_COUNT, Review, ReviewUuid,
            },
            repository::{Adjacent, PgCatalogRepository, ReviewInsert},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
    accounts: PgAccountsRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
            accounts: PgAccountsRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    #[instrument(skip(self))]
    async fn home_feed(&self) -> Result<HomeFeed, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let newest = self
            .repository
            .newest_products(&mut tx, HOME_RAIL_SIZE)
            .await?;

        let most_viewed = self
            .repository
            .most_viewed_products(&mut tx, HOME_RAIL_SIZE)
            .await?;

        let categories = self
            .repository
            .list_categories(&mut tx, true, Some(HOME_CATEGORY_COUNT))
            .await?;

        tx.commit().await?;

        Ok(HomeFeed {
            newest,
            most_viewed,
            categories,
        })
    }

    #[instrument(skip(self), fields(sort = filter.sort.as_str()))]
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<ProductListing, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.count_products(&mut tx, &filter).await?;
        let page = Page::resolve(filter.page, total);

        let products = self
            .repository
            .list_products(&mut tx, &filter, page.limit(), page.offset())
            .await?;

        let price_range = self.repository.price_range(&mut tx).await?;

        tx.commit().await?;

        debug!(total, page = page.number, "listed products");

        Ok(ProductListing {
            products,
            page,
            price_range,
        })
    }

    #[instrument(skip(self))]
    async fn product_detail(&self, slug: &str) -> Result<ProductDetail, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let mut product = self.repository.get_product_by_slug(&mut tx, slug).await?;

        product.views_count = self
            .repository
            .increment_views(&mut tx, product.uuid)
            .await?;

        let images = self.repository.list_images(&mut tx, product.uuid).await?;
        let colors = self.repository.list_colors(&mut tx, product.uuid).await?;
        let sizes = self.repository.list_sizes(&mut tx, product.uuid).await?;

        let reviews = self
            .repository
            .list_approved_reviews(&mut tx, product.uuid)
            .await?;

        let related = self
            .repository
            .related_products(&mut tx, &product, RELATED_PRODUCT_COUNT)
            .await?;

        let previous = self
            .repository
            .adjacent_product(&mut tx, &product, Adjacent::Previous)
            .await?;

        let next = self
            .repository
            .adjacent_product(&mut tx, &product, Adjacent::Next)
            .await?;

        tx.commit().await?;

        let average_rating = average_rating(&reviews);

        Ok(ProductDetail {
            product,
            images,
            colors,
            sizes,
            reviews,
            average_rating,
            related,
            previous,
            next,
        })
    }

    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx, false, None).await?;

        tx.commit().await?;

        Ok(categories)
    }

    #[instrument(skip(self))]
    async fn list_brands(&self) -> Result<Vec<Brand>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let brands = self.repository.list_brands(&mut tx).await?;

        tx.commit().await?;

        Ok(brands)
    }

    #[instrument(skip(self), fields(slug = %category.slug))]
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, &category).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(skip(self), fields(slug = %brand.slug))]
    async fn create_brand(&self, brand: NewBrand) -> Result<Brand, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_brand(&mut tx, &brand).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(skip(self), fields(slug = %product.slug))]
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(skip(self, review), fields(rating = review.rating))]
    async fn submit_review(
        &self,
        user: UserUuid,
        slug: &str,
        review: NewReview,
    ) -> Result<Review, CatalogServiceError> {
        let rating = Rating::try_from(review.rating).map_err(CatalogServiceError::InvalidRating)?;

        let comment = review.comment.trim();

        if comment.is_empty() {
            return Err(CatalogServiceError::EmptyReview);
        }

        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product_by_slug(&mut tx, slug).await?;
        let profile = self.accounts.get_profile(&mut tx, user).await?;

        let created = self
            .repository
            .create_review(
                &mut tx,
                ReviewInsert {
                    uuid: ReviewUuid::new(),
                    product: product.uuid,
                    user,
                    name: profile.display_name(),
                    email: &profile.email,
                    rating,
                    title: review.title.trim(),
                    comment,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn list_user_reviews(&self, user: UserUuid) -> Result<Vec<Review>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_user_reviews(&mut tx, user).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    #[instrument(skip(self))]
    async fn approve_review(&self, review: ReviewUuid) -> Result<Review, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let approved = self.repository.approve_review(&mut tx, review).await?;

        tx.commit().await?;

        Ok(approved)
    }
}

fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }

    let sum: u32 = reviews
        .iter()
        .map(|review| u32::from(review.rating.get()))
        .sum();

    Some(f64::from(sum) / f64::from(u32::try_from(reviews.len()).ok()?))
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Newest and most viewed rails plus top-level categories.
    async fn home_feed(&self) -> Result<HomeFeed, CatalogServiceError>;

    /// One page of active products matching `filter`.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<ProductListing, CatalogServiceError>;

    /// Everything the product page shows. Counts as a view.
    async fn product_detail(&self, slug: &str) -> Result<ProductDetail, CatalogServiceError>;

    async fn list_categories(&self) -> Result<Vec<Category>, CatalogServiceError>;

    async fn list_brands(&self) -> Result<Vec<Brand>, CatalogServiceError>;

    async fn create_category(&self, category: NewCategory)
    -> Result<Category, CatalogServiceError>;

    async fn create_brand(&self, brand: NewBrand) -> Result<Brand, CatalogServiceError>;

    /// Create a product with its images, colours and sizes.
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError>;

    /// Store a review from `user`. Reviews stay hidden until approved.
    async fn submit_review(
        &self,
        user: UserUuid,
        slug: &str,
        review: NewReview,
    ) -> Result<Review, CatalogServiceError>;

    /// Reviews written by `user`, newest first.
    async fn list_user_reviews(&self, user: UserUuid) -> Result<Vec<Review>, CatalogServiceError>;

    async fn approve_review(&self, review: ReviewUuid) -> Result<Review, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use bazaar::catalog::{ProductSort, SizeOption};
    use testresult::TestResult;

    use crate::{
        domain::catalog::models::{CategoryUuid, NewProductColor},
        test::{
            TestContext,
            helpers::{create_category, create_product, new_product, register_user},
        },
    };

    use super::*;

    fn review(rating: i64) -> NewReview {
        NewReview {
            rating,
            title: "عالی".to_string(),
            comment: "کیفیت خوبی داشت".to_string(),
        }
    }

    #[tokio::test]
    async fn listing_excludes_inactive_products() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "shirts").await?;

        create_product(&ctx, category.uuid, "visible", 100_000, 5).await?;

        ctx.catalog
            .create_product(NewProduct {
                is_active: false,
                ..new_product(category.uuid, "hidden", 100_000, 5)
            })
            .await?;

        let listing = ctx.catalog.list_products(ProductFilter::default()).await?;

        let slugs: Vec<_> = listing.products.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, vec!["visible"]);
        assert_eq!(listing.page.total_items, 1);

        Ok(())
    }

    #[tokio::test]
    async fn listing_sorts_by_price() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "shoes").await?;

        create_product(&ctx, category.uuid, "mid", 200_000, 5).await?;
        create_product(&ctx, category.uuid, "cheap", 100_000, 5).await?;
        create_product(&ctx, category.uuid, "dear", 300_000, 5).await?;

        let listing = ctx
            .catalog
            .list_products(ProductFilter {
                sort: ProductSort::PriceHigh,
                ..ProductFilter::default()
            })
            .await?;

        let slugs: Vec<_> = listing.products.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, vec!["dear", "mid", "cheap"]);
        assert_eq!(listing.price_range.min, 100_000);
        assert_eq!(listing.price_range.max, 300_000);

        Ok(())
    }

    #[tokio::test]
    async fn category_filter_includes_children() -> TestResult {
        let ctx = TestContext::new().await;
        let parent = create_category(&ctx, "clothing").await?;

        let child = ctx
            .catalog
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: "Hats".to_string(),
                slug: "hats".to_string(),
                parent: Some(parent.uuid),
                description: String::new(),
                is_active: true,
            })
            .await?;

        let other = create_category(&ctx, "books").await?;

        create_product(&ctx, parent.uuid, "coat", 100_000, 5).await?;
        create_product(&ctx, child.uuid, "cap", 50_000, 5).await?;
        create_product(&ctx, other.uuid, "novel", 80_000, 5).await?;

        let listing = ctx
            .catalog
            .list_products(ProductFilter {
                category: Some("clothing".to_string()),
                sort: ProductSort::PriceLow,
                ..ProductFilter::default()
            })
            .await?;

        let slugs: Vec<_> = listing.products.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, vec!["cap", "coat"]);

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_name_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "bags").await?;

        ctx.catalog
            .create_product(NewProduct {
                name: "Leather Backpack".to_string(),
                ..new_product(category.uuid, "backpack", 100_000, 5)
            })
            .await?;

        create_product(&ctx, category.uuid, "wallet", 40_000, 5).await?;

        let listing = ctx
            .catalog
            .list_products(ProductFilter {
                query: Some("backPACK".to_string()),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(listing.products.len(), 1);
        assert_eq!(listing.products[0].slug, "backpack");

        Ok(())
    }

    #[tokio::test]
    async fn size_color_and_availability_filters() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "tees").await?;

        ctx.catalog
            .create_product(NewProduct {
                sizes: vec![SizeOption::M, SizeOption::L],
                colors: vec![NewProductColor {
                    name: "Red".to_string(),
                    hex_code: "#ff0000".to_string(),
                }],
                ..new_product(category.uuid, "red-tee", 100_000, 5)
            })
            .await?;

        ctx.catalog
            .create_product(NewProduct {
                sizes: vec![SizeOption::M],
                ..new_product(category.uuid, "sold-out-tee", 100_000, 0)
            })
            .await?;

        let by_size = ctx
            .catalog
            .list_products(ProductFilter {
                sizes: vec![SizeOption::M],
                available_only: true,
                ..ProductFilter::default()
            })
            .await?;

        let by_color = ctx
            .catalog
            .list_products(ProductFilter {
                colors: vec!["red".to_string()],
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(by_size.products.len(), 1);
        assert_eq!(by_size.products[0].slug, "red-tee");
        assert_eq!(by_color.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_page_clamps_to_last() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "socks").await?;

        for n in 0..13 {
            create_product(&ctx, category.uuid, &format!("sock-{n}"), 10_000, 5).await?;
        }

        let listing = ctx
            .catalog
            .list_products(ProductFilter {
                page: Some(9),
                ..ProductFilter::default()
            })
            .await?;

        assert_eq!(listing.page.number, 2);
        assert_eq!(listing.page.total_pages, 2);
        assert_eq!(listing.products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn product_detail_counts_views_and_links_neighbours() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "watches").await?;

        create_product(&ctx, category.uuid, "first", 100_000, 5).await?;
        create_product(&ctx, category.uuid, "second", 100_000, 5).await?;
        create_product(&ctx, category.uuid, "third", 100_000, 5).await?;

        ctx.catalog.product_detail("second").await?;
        let detail = ctx.catalog.product_detail("second").await?;

        assert_eq!(detail.product.views_count, 2);
        assert_eq!(detail.previous.map(|link| link.slug).as_deref(), Some("first"));
        assert_eq!(detail.next.map(|link| link.slug).as_deref(), Some("third"));
        assert_eq!(detail.related.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn product_detail_unknown_slug_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.product_detail("missing").await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn reviews_stay_hidden_until_approved() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "mina@example.com").await?;
        let category = create_category(&ctx, "lamps").await?;

        create_product(&ctx, category.uuid, "lamp", 100_000, 5).await?;

        let submitted = ctx.catalog.submit_review(user, "lamp", review(4)).await?;

        assert!(!submitted.is_approved);
        assert_eq!(submitted.email, "mina@example.com");
        assert!(ctx.catalog.product_detail("lamp").await?.reviews.is_empty());

        ctx.catalog.approve_review(submitted.uuid).await?;

        let detail = ctx.catalog.product_detail("lamp").await?;

        assert_eq!(detail.review_count(), 1);
        assert_eq!(detail.average_rating, Some(4.0));
        assert_eq!(ctx.catalog.list_user_reviews(user).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn review_rating_outside_range_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = register_user(&ctx, "omid@example.com").await?;
        let category = create_category(&ctx, "mugs").await?;

        create_product(&ctx, category.uuid, "mug", 30_000, 5).await?;

        let result = ctx.catalog.submit_review(user, "mug", review(6)).await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidRating(_))),
            "expected InvalidRating, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_category_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        create_category(&ctx, "toys").await?;

        let result = create_category(&ctx, "toys").await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn home_feed_lists_available_products() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "kitchen").await?;

        create_product(&ctx, category.uuid, "pan", 90_000, 3).await?;

        ctx.catalog
            .create_product(NewProduct {
                is_available: false,
                ..new_product(category.uuid, "pot", 90_000, 3)
            })
            .await?;

        let feed = ctx.catalog.home_feed().await?;

        assert_eq!(feed.newest.len(), 1);
        assert_eq!(feed.most_viewed.len(), 1);
        assert_eq!(feed.categories.len(), 1);
        assert_eq!(feed.categories[0].product_count, 1);

        Ok(())
    }
}
