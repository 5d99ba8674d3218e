//! Catalog Repository

use bazaar::catalog::{ProductLabel, Rating, SizeOption};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    accounts::models::UserUuid,
    catalog::models::{
        Brand, BrandUuid, Category, CategoryUuid, NewBrand, NewCategory, NewProduct, PriceRange,
        Product, ProductColor, ProductFilter, ProductImage, ProductLink, ProductSize,
        ProductSummary, ProductUuid, Review, ReviewUuid,
    },
    columns::{amount_param, count_param, try_get_amount, try_get_count, try_get_optional_amount},
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const LIST_BRANDS_SQL: &str = include_str!("sql/list_brands.sql");
const CREATE_BRAND_SQL: &str = include_str!("sql/create_brand.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const CREATE_PRODUCT_IMAGE_SQL: &str = include_str!("sql/create_product_image.sql");
const CREATE_PRODUCT_COLOR_SQL: &str = include_str!("sql/create_product_color.sql");
const CREATE_PRODUCT_SIZE_SQL: &str = include_str!("sql/create_product_size.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/get_product_by_slug.sql");
const INCREMENT_VIEWS_SQL: &str = include_str!("sql/increment_views.sql");
const LIST_PRODUCT_IMAGES_SQL: &str = include_str!("sql/list_product_images.sql");
const LIST_PRODUCT_COLORS_SQL: &str = include_str!("sql/list_product_colors.sql");
const LIST_PRODUCT_SIZES_SQL: &str = include_str!("sql/list_product_sizes.sql");
const ADJACENT_PRODUCT_SQL: &str = include_str!("sql/adjacent_product.sql");
const NEWEST_PRODUCTS_SQL: &str = include_str!("sql/newest_products.sql");
const MOST_VIEWED_PRODUCTS_SQL: &str = include_str!("sql/most_viewed_products.sql");
const RELATED_PRODUCTS_SQL: &str = include_str!("sql/related_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const PRICE_RANGE_SQL: &str = include_str!("sql/price_range.sql");
const LIST_APPROVED_REVIEWS_SQL: &str = include_str!("sql/list_approved_reviews.sql");
const LIST_USER_REVIEWS_SQL: &str = include_str!("sql/list_user_reviews.sql");
const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const APPROVE_REVIEW_SQL: &str = include_str!("sql/approve_review.sql");

/// Which neighbour of a product to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Adjacent {
    Previous,
    Next,
}

/// Review values ready for insertion.
#[derive(Debug, Clone)]
pub(crate) struct ReviewInsert<'a> {
    pub uuid: ReviewUuid,
    pub product: ProductUuid,
    pub user: UserUuid,
    pub name: &'a str,
    pub email: &'a str,
    pub rating: Rating,
    pub title: &'a str,
    pub comment: &'a str,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        top_level_only: bool,
        limit: Option<i64>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        query_as::<Postgres, Category>(LIST_CATEGORIES_SQL)
            .bind(top_level_only)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &NewCategory,
    ) -> Result<Category, sqlx::Error> {
        query_as::<Postgres, Category>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(&category.name)
            .bind(&category.slug)
            .bind(category.parent.map(CategoryUuid::into_uuid))
            .bind(&category.description)
            .bind(category.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Brand>, sqlx::Error> {
        query_as::<Postgres, Brand>(LIST_BRANDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: &NewBrand,
    ) -> Result<Brand, sqlx::Error> {
        query_as::<Postgres, Brand>(CREATE_BRAND_SQL)
            .bind(brand.uuid.into_uuid())
            .bind(&brand.name)
            .bind(&brand.slug)
            .bind(brand.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<Product, sqlx::Error> {
        let created = query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.slug)
            .bind(product.category.into_uuid())
            .bind(product.brand.map(BrandUuid::into_uuid))
            .bind(&product.description)
            .bind(&product.full_description)
            .bind(amount_param(product.price, "price")?)
            .bind(
                product
                    .old_price
                    .map(|old_price| amount_param(old_price, "old_price"))
                    .transpose()?,
            )
            .bind(count_param(product.stock, "stock")?)
            .bind(product.is_available)
            .bind(product.is_active)
            .bind(product.label.map(ProductLabel::as_str))
            .fetch_one(&mut **tx)
            .await?;

        for image in &product.images {
            query(CREATE_PRODUCT_IMAGE_SQL)
                .bind(Uuid::now_v7())
                .bind(product.uuid.into_uuid())
                .bind(&image.url)
                .bind(&image.alt_text)
                .bind(image.is_main)
                .bind(image.order)
                .execute(&mut **tx)
                .await?;
        }

        for color in &product.colors {
            query(CREATE_PRODUCT_COLOR_SQL)
                .bind(Uuid::now_v7())
                .bind(product.uuid.into_uuid())
                .bind(&color.name)
                .bind(&color.hex_code)
                .execute(&mut **tx)
                .await?;
        }

        for size in &product.sizes {
            query(CREATE_PRODUCT_SIZE_SQL)
                .bind(Uuid::now_v7())
                .bind(product.uuid.into_uuid())
                .bind(size.as_str())
                .execute(&mut **tx)
                .await?;
        }

        Ok(created)
    }

    pub(crate) async fn get_product_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    /// Bump the view counter, returning the new count.
    pub(crate) async fn increment_views(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let views: i64 = query_scalar(INCREMENT_VIEWS_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(views).map_err(|e| decode_error("views_count", e))
    }

    pub(crate) async fn list_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        query_as::<Postgres, ProductImage>(LIST_PRODUCT_IMAGES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_colors(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductColor>, sqlx::Error> {
        query_as::<Postgres, ProductColor>(LIST_PRODUCT_COLORS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_sizes(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<ProductSize>, sqlx::Error> {
        query_as::<Postgres, ProductSize>(LIST_PRODUCT_SIZES_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn adjacent_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &Product,
        direction: Adjacent,
    ) -> Result<Option<ProductLink>, sqlx::Error> {
        query_as::<Postgres, ProductLink>(ADJACENT_PRODUCT_SQL)
            .bind(product.category.into_uuid())
            .bind(product.uuid.into_uuid())
            .bind(SqlxTimestamp::from(product.created_at))
            .bind(direction == Adjacent::Next)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn newest_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        query_as::<Postgres, ProductSummary>(NEWEST_PRODUCTS_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn most_viewed_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        query_as::<Postgres, ProductSummary>(MOST_VIEWED_PRODUCTS_SQL)
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn related_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &Product,
        limit: i64,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        query_as::<Postgres, ProductSummary>(RELATED_PRODUCTS_SQL)
            .bind(product.category.into_uuid())
            .bind(product.uuid.into_uuid())
            .bind(limit)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
    ) -> Result<u64, sqlx::Error> {
        let params = FilterParams::from_filter(filter)?;

        let total: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(params.category)
            .bind(params.brands)
            .bind(params.sizes)
            .bind(params.colors)
            .bind(params.min_price)
            .bind(params.max_price)
            .bind(params.available_only)
            .bind(params.query)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(total).map_err(|e| decode_error("total", e))
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        let params = FilterParams::from_filter(filter)?;

        query_as::<Postgres, ProductSummary>(LIST_PRODUCTS_SQL)
            .bind(params.category)
            .bind(params.brands)
            .bind(params.sizes)
            .bind(params.colors)
            .bind(params.min_price)
            .bind(params.max_price)
            .bind(params.available_only)
            .bind(params.query)
            .bind(filter.sort.as_str())
            .bind(i64::from(limit))
            .bind(amount_param(offset, "offset")?)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn price_range(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<PriceRange, sqlx::Error> {
        let row = query(PRICE_RANGE_SQL).fetch_one(&mut **tx).await?;

        Ok(PriceRange {
            min: try_get_amount(&row, "min_price")?,
            max: try_get_amount(&row, "max_price")?,
        })
    }

    pub(crate) async fn list_approved_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Postgres, Review>(LIST_APPROVED_REVIEWS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Postgres, Review>(LIST_USER_REVIEWS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewInsert<'_>,
    ) -> Result<Review, sqlx::Error> {
        query_as::<Postgres, Review>(CREATE_REVIEW_SQL)
            .bind(review.uuid.into_uuid())
            .bind(review.product.into_uuid())
            .bind(review.user.into_uuid())
            .bind(review.name)
            .bind(review.email)
            .bind(i16::from(review.rating.get()))
            .bind(review.title)
            .bind(review.comment)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn approve_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
    ) -> Result<Review, sqlx::Error> {
        query_as::<Postgres, Review>(APPROVE_REVIEW_SQL)
            .bind(review.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

/// Listing filters in bindable form.
struct FilterParams {
    category: Option<String>,
    brands: Vec<String>,
    sizes: Vec<String>,
    colors: Vec<String>,
    min_price: Option<i64>,
    max_price: Option<i64>,
    available_only: bool,
    query: Option<String>,
}

impl FilterParams {
    fn from_filter(filter: &ProductFilter) -> sqlx::Result<Self> {
        Ok(Self {
            category: non_blank(filter.category.as_deref()),
            brands: filter.brands.clone(),
            sizes: filter
                .sizes
                .iter()
                .map(|size| size.as_str().to_string())
                .collect(),
            colors: filter
                .colors
                .iter()
                .map(|color| color.trim().to_lowercase())
                .collect(),
            min_price: filter
                .min_price
                .map(|price| amount_param(price, "min_price"))
                .transpose()?,
            max_price: filter
                .max_price
                .map(|price| amount_param(price, "max_price"))
                .transpose()?,
            available_only: filter.available_only,
            query: non_blank(filter.query.as_deref()),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn decode_error(
    column: &str,
    error: impl std::error::Error + Send + Sync + 'static,
) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(error),
    }
}

fn try_get_label(row: &PgRow) -> sqlx::Result<Option<ProductLabel>> {
    row.try_get::<Option<String>, _>("label")?
        .map(|label| label.parse().map_err(|e| decode_error("label", e)))
        .transpose()
}

impl<'r> FromRow<'r, PgRow> for Category {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            parent: row
                .try_get::<Option<Uuid>, _>("parent_uuid")?
                .map(CategoryUuid::from_uuid),
            description: row.try_get("description")?,
            is_active: row.try_get("is_active")?,
            product_count: try_get_amount(row, "product_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Brand {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: BrandUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            category: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            category_name: row.try_get("category_name")?,
            category_slug: row.try_get("category_slug")?,
            brand: row
                .try_get::<Option<Uuid>, _>("brand_uuid")?
                .map(BrandUuid::from_uuid),
            brand_name: row.try_get("brand_name")?,
            description: row.try_get("description")?,
            full_description: row.try_get("full_description")?,
            price: try_get_amount(row, "price")?,
            old_price: try_get_optional_amount(row, "old_price")?,
            stock: try_get_count(row, "stock")?,
            is_available: row.try_get("is_available")?,
            is_active: row.try_get("is_active")?,
            label: try_get_label(row)?,
            views_count: try_get_amount(row, "views_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            category_name: row.try_get("category_name")?,
            category_slug: row.try_get("category_slug")?,
            brand_name: row.try_get("brand_name")?,
            price: try_get_amount(row, "price")?,
            old_price: try_get_optional_amount(row, "old_price")?,
            stock: try_get_count(row, "stock")?,
            is_available: row.try_get("is_available")?,
            label: try_get_label(row)?,
            views_count: try_get_amount(row, "views_count")?,
            main_image: row.try_get("main_image")?,
            average_rating: row.try_get("average_rating")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductImage {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            url: row.try_get("url")?,
            alt_text: row.try_get("alt_text")?,
            is_main: row.try_get("is_main")?,
            order: row.try_get("sort_order")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductColor {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            name: row.try_get("name")?,
            hex_code: row.try_get("hex_code")?,
            is_available: row.try_get("is_available")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSize {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let size: String = row.try_get("size")?;

        Ok(Self {
            size: size
                .parse::<SizeOption>()
                .map_err(|e| decode_error("size", e))?,
            is_available: row.try_get("is_available")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductLink {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Review {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rating: i16 = row.try_get("rating")?;

        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            product_slug: row.try_get("product_slug")?,
            user: row
                .try_get::<Option<Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            rating: Rating::try_from(i64::from(rating)).map_err(|e| decode_error("rating", e))?,
            title: row.try_get("title")?,
            comment: row.try_get("comment")?,
            is_approved: row.try_get("is_approved")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
