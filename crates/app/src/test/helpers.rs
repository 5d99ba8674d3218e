//! Test Helpers

use bazaar::carts::SessionCart;

use crate::{
    auth::SessionIdentity,
    domain::{
        accounts::{
            AccountsService, AccountsServiceError,
            models::{Profile, ProfileUpdate, Registration, UserUuid},
        },
        catalog::{
            CatalogService, CatalogServiceError,
            models::{Category, CategoryUuid, NewCategory, NewProduct, Product, ProductUuid},
        },
    },
    test::TestContext,
};

pub(crate) const TEST_PASSWORD: &str = "correct-horse-battery";

pub(crate) async fn register_user(
    ctx: &TestContext,
    email: &str,
) -> Result<UserUuid, AccountsServiceError> {
    let user = ctx
        .accounts
        .register(Registration {
            email: email.to_string(),
            password: TEST_PASSWORD.to_string(),
            password_confirmation: TEST_PASSWORD.to_string(),
        })
        .await?;

    Ok(user.uuid)
}

/// Register `email` and open a session for it with an empty cart.
pub(crate) async fn sign_in(
    ctx: &TestContext,
    email: &str,
) -> Result<SessionIdentity, AccountsServiceError> {
    register_user(ctx, email).await?;

    let issued = ctx
        .accounts
        .login(email, TEST_PASSWORD, SessionCart::new())
        .await?;

    Ok(issued.session.identity())
}

/// Fill in the delivery fields checkout requires.
pub(crate) async fn complete_profile(
    ctx: &TestContext,
    user: UserUuid,
) -> Result<Profile, AccountsServiceError> {
    ctx.accounts
        .update_profile(
            user,
            ProfileUpdate {
                full_name: "Sara Ahmadi".to_string(),
                phone: "09120000000".to_string(),
                address: "Valiasr St. 12".to_string(),
                postal_code: "1234567890".to_string(),
                city: "Tehran".to_string(),
            },
        )
        .await
}

pub(crate) async fn create_category(
    ctx: &TestContext,
    slug: &str,
) -> Result<Category, CatalogServiceError> {
    ctx.catalog
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: slug.to_string(),
            slug: slug.to_string(),
            parent: None,
            description: String::new(),
            is_active: true,
        })
        .await
}

/// An active, available product named after its slug.
pub(crate) fn new_product(
    category: CategoryUuid,
    slug: &str,
    price: u64,
    stock: u32,
) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: slug.to_string(),
        slug: slug.to_string(),
        category,
        brand: None,
        description: String::new(),
        full_description: String::new(),
        price,
        old_price: None,
        stock,
        is_available: true,
        is_active: true,
        label: None,
        images: Vec::new(),
        colors: Vec::new(),
        sizes: Vec::new(),
    }
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    category: CategoryUuid,
    slug: &str,
    price: u64,
    stock: u32,
) -> Result<Product, CatalogServiceError> {
    ctx.catalog
        .create_product(new_product(category, slug, price, stock))
        .await
}
