//! Carts service.

use async_trait::async_trait;
use bazaar::{
    carts::{SessionCart, StockError, clamp_update, plan_addition},
    discounts::CartTotals,
};
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{debug, instrument};

use crate::{
    auth::{PgSessionsRepository, Session, SessionIdentity},
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartLineDetails, CartQuantity, CartView, bare_lines, price_lines},
            repositories::{PgCartItemsRepository, PgCartProductsRepository},
        },
        catalog::models::ProductUuid,
        discounts::{
            redemption::{CodeLock, DiscountCheck, check_code},
            repository::PgDiscountCodesRepository,
        },
    },
    notices::Notice,
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    sessions: PgSessionsRepository,
    items: PgCartItemsRepository,
    products: PgCartProductsRepository,
    discounts: PgDiscountCodesRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            sessions: PgSessionsRepository::new(),
            items: PgCartItemsRepository::new(),
            products: PgCartProductsRepository::new(),
            discounts: PgDiscountCodesRepository::new(),
        }
    }

    /// Persist `cart` on the session and mirror it into the stored cart rows.
    async fn write_back(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: &Session,
        cart: &SessionCart,
    ) -> Result<(), sqlx::Error> {
        self.sessions
            .save_session_state(tx, session.uuid, cart, session.discount_code.as_deref())
            .await?;

        self.items.replace_items(tx, session.user, cart).await
    }

    /// Price `cart` and evaluate the session's code against it.
    async fn build_view(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: &Session,
        cart: &SessionCart,
        mut notices: Vec<Notice>,
    ) -> Result<CartView, sqlx::Error> {
        let details = load_lines(&self.products, tx, cart).await?;
        let lines = bare_lines(&details);

        let accepted = match &session.discount_code {
            Some(code) => {
                let check = check_code(
                    &self.discounts,
                    tx,
                    code,
                    &lines,
                    session.user,
                    Timestamp::now(),
                    CodeLock::None,
                )
                .await?;

                match check {
                    DiscountCheck::Accepted(accepted) => Some(accepted),
                    DiscountCheck::Rejected(rejection) => {
                        notices.push(Notice::warning(rejection.to_string()));
                        None
                    }
                }
            }
            None => None,
        };

        let totals = CartTotals::compute(&lines, accepted.as_ref().map(|code| &code.rule));

        Ok(CartView {
            lines: details,
            totals,
            discount_code: session.discount_code.clone(),
            notices,
        })
    }
}

/// Price the session cart against live catalog data.
pub(crate) async fn load_lines(
    products: &PgCartProductsRepository,
    tx: &mut Transaction<'_, Postgres>,
    cart: &SessionCart,
) -> Result<Vec<CartLineDetails>, sqlx::Error> {
    if cart.is_empty() {
        return Ok(Vec::new());
    }

    let found = products.find_products(tx, &cart.products()).await?;

    Ok(price_lines(cart, &found))
}

#[async_trait]
impl CartsService for PgCartsService {
    #[instrument(skip(self), fields(session = %identity.session))]
    async fn get_cart(&self, identity: SessionIdentity) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let session = self.sessions.lock_session(&mut tx, identity.session).await?;

        let view = self
            .build_view(&mut tx, &session, &session.cart, Vec::new())
            .await?;

        tx.commit().await?;

        Ok(view)
    }

    #[instrument(skip(self), fields(session = %identity.session))]
    async fn add_item(
        &self,
        identity: SessionIdentity,
        product: ProductUuid,
        quantity: Option<u32>,
    ) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let session = self.sessions.lock_session(&mut tx, identity.session).await?;

        let product = self
            .products
            .find_product(&mut tx, product)
            .await?
            .filter(|product| product.is_active)
            .ok_or(CartsServiceError::NotFound)?;

        if !product.is_available {
            return Err(CartsServiceError::OutOfStock);
        }

        let current = session.cart.quantity(product.uuid.into_uuid());

        let addition = plan_addition(quantity.unwrap_or(1), current, product.stock).map_err(
            |error| match error {
                StockError::OutOfStock => CartsServiceError::OutOfStock,
                StockError::Exhausted => CartsServiceError::InsufficientStock {
                    name: product.name.clone(),
                },
            },
        )?;

        let mut cart = session.cart.clone();
        cart.set(product.uuid.into_uuid(), addition.quantity);

        self.write_back(&mut tx, &session, &cart).await?;

        let mut notices = Vec::new();

        if addition.limited {
            notices.push(Notice::warning(format!(
                "حداکثر {} عدد از «{}» قابل افزودن به سبد است.",
                addition.added, product.name
            )));
        }

        notices.push(Notice::success(format!(
            "«{}» به سبد خرید اضافه شد.",
            product.name
        )));

        let view = self.build_view(&mut tx, &session, &cart, notices).await?;

        tx.commit().await?;

        debug!(quantity = addition.quantity, "added to cart");

        Ok(view)
    }

    #[instrument(skip(self), fields(session = %identity.session))]
    async fn remove_item(
        &self,
        identity: SessionIdentity,
        product: ProductUuid,
    ) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let session = self.sessions.lock_session(&mut tx, identity.session).await?;

        let mut cart = session.cart.clone();
        let mut notices = Vec::new();

        if cart.remove(product.into_uuid()) {
            self.write_back(&mut tx, &session, &cart).await?;

            notices.push(Notice::success("محصول از سبد خرید حذف شد."));
        }

        let view = self.build_view(&mut tx, &session, &cart, notices).await?;

        tx.commit().await?;

        Ok(view)
    }

    #[instrument(
        skip(self, quantities),
        fields(session = %identity.session, count = quantities.len())
    )]
    async fn update_items(
        &self,
        identity: SessionIdentity,
        quantities: Vec<CartQuantity>,
    ) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let session = self.sessions.lock_session(&mut tx, identity.session).await?;

        let requested: Vec<_> = quantities
            .iter()
            .map(|change| change.product.into_uuid())
            .collect();

        let products = self.products.find_products(&mut tx, &requested).await?;

        let mut cart = session.cart.clone();

        for change in &quantities {
            let product = change.product.into_uuid();

            if change.quantity < 1 {
                cart.remove(product);
                continue;
            }

            let Some(found) = products
                .iter()
                .find(|found| found.uuid == change.product && found.is_purchasable())
            else {
                continue;
            };

            let requested = u32::try_from(change.quantity).unwrap_or(u32::MAX);

            cart.set(product, clamp_update(requested, found.stock));
        }

        self.write_back(&mut tx, &session, &cart).await?;

        let notices = vec![Notice::success("سبد خرید به‌روزرسانی شد.")];

        let view = self.build_view(&mut tx, &session, &cart, notices).await?;

        tx.commit().await?;

        Ok(view)
    }

    #[instrument(skip(self), fields(session = %identity.session))]
    async fn sync_cart(&self, identity: SessionIdentity) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let session = self.sessions.lock_session(&mut tx, identity.session).await?;

        self.items
            .replace_items(&mut tx, session.user, &session.cart)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The session cart, priced, with the applied code evaluated.
    async fn get_cart(&self, identity: SessionIdentity) -> Result<CartView, CartsServiceError>;

    /// Add `quantity` (default one) units of `product`, limited by stock.
    async fn add_item(
        &self,
        identity: SessionIdentity,
        product: ProductUuid,
        quantity: Option<u32>,
    ) -> Result<CartView, CartsServiceError>;

    async fn remove_item(
        &self,
        identity: SessionIdentity,
        product: ProductUuid,
    ) -> Result<CartView, CartsServiceError>;

    /// Apply several quantity edits at once. Unknown products are ignored.
    async fn update_items(
        &self,
        identity: SessionIdentity,
        quantities: Vec<CartQuantity>,
    ) -> Result<CartView, CartsServiceError>;

    /// Write the session cart back to the stored cart rows.
    async fn sync_cart(&self, identity: SessionIdentity) -> Result<(), CartsServiceError>;
}
