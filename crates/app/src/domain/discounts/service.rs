//! Discounts service.

use async_trait::async_trait;
use bazaar::discounts::{DiscountRejection, DiscountScope, discount_for_cart, normalize_code};
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, instrument};

use crate::{
    auth::{PgSessionsRepository, SessionIdentity},
    database::Db,
    domain::{
        carts::{models::bare_lines, repositories::PgCartProductsRepository, service::load_lines},
        discounts::{
            errors::DiscountsServiceError,
            models::{AppliedDiscount, DiscountCode, NewDiscountCode},
            redemption::{CodeLock, DiscountCheck, check_code},
            repository::PgDiscountCodesRepository,
        },
    },
    notices::Notice,
};

#[derive(Debug, Clone)]
pub struct PgDiscountsService {
    db: Db,
    repository: PgDiscountCodesRepository,
    sessions: PgSessionsRepository,
    products: PgCartProductsRepository,
}

impl PgDiscountsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgDiscountCodesRepository::new(),
            sessions: PgSessionsRepository::new(),
            products: PgCartProductsRepository::new(),
        }
    }
}

#[async_trait]
impl DiscountsService for PgDiscountsService {
    #[instrument(skip(self), fields(session = %identity.session))]
    async fn apply_code(
        &self,
        identity: SessionIdentity,
        code: &str,
    ) -> Result<AppliedDiscount, DiscountsServiceError> {
        let code = normalize_code(code);

        if code.is_empty() {
            return Err(DiscountRejection::Missing.into());
        }

        let mut tx = self.db.begin().await?;

        let session = self.sessions.lock_session(&mut tx, identity.session).await?;
        let lines = bare_lines(&load_lines(&self.products, &mut tx, &session.cart).await?);

        if lines.is_empty() {
            return Err(DiscountsServiceError::EmptyCart);
        }

        let check = check_code(
            &self.repository,
            &mut tx,
            &code,
            &lines,
            identity.user,
            Timestamp::now(),
            CodeLock::None,
        )
        .await?;

        let accepted = match check {
            DiscountCheck::Accepted(accepted) => accepted,
            DiscountCheck::Rejected(rejection) => {
                info!(%code, reason = %rejection, "discount code rejected");

                return Err(rejection.into());
            }
        };

        let application = discount_for_cart(&accepted.rule, &lines);

        self.sessions
            .save_session_state(&mut tx, session.uuid, &session.cart, Some(accepted.code()))
            .await?;

        tx.commit().await?;

        let product_name = match &accepted.rule.scope {
            DiscountScope::Cart => None,
            DiscountScope::Product { name, .. } => Some(name.clone()),
        };

        Ok(AppliedDiscount {
            code: accepted.rule.code,
            amount: application.amount,
            product_name,
        })
    }

    #[instrument(skip(self), fields(session = %identity.session))]
    async fn remove_code(
        &self,
        identity: SessionIdentity,
    ) -> Result<Notice, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let session = self.sessions.lock_session(&mut tx, identity.session).await?;

        self.sessions
            .save_session_state(&mut tx, session.uuid, &session.cart, None)
            .await?;

        tx.commit().await?;

        Ok(Notice::success("کد تخفیف حذف شد."))
    }

    #[instrument(skip(self), fields(code = %code.code))]
    async fn create_code(
        &self,
        code: NewDiscountCode,
    ) -> Result<DiscountCode, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let product_name = match code.scope.product() {
            Some(product) => Some(self.repository.get_product_name(&mut tx, product).await?),
            None => None,
        };

        let rule = code.to_rule(product_name)?;

        let created = self.repository.create_code(&mut tx, code.uuid, &rule).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[instrument(skip(self))]
    async fn list_codes(&self) -> Result<Vec<DiscountCode>, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let codes = self.repository.list_codes(&mut tx).await?;

        tx.commit().await?;

        Ok(codes)
    }

    #[instrument(skip(self))]
    async fn deactivate_code(&self, code: &str) -> Result<DiscountCode, DiscountsServiceError> {
        let mut tx = self.db.begin().await?;

        let deactivated = self
            .repository
            .deactivate_code(&mut tx, &normalize_code(code))
            .await?;

        tx.commit().await?;

        Ok(deactivated)
    }
}

#[automock]
#[async_trait]
pub trait DiscountsService: Send + Sync {
    /// Validate `code` against the session cart and remember it on the session.
    async fn apply_code(
        &self,
        identity: SessionIdentity,
        code: &str,
    ) -> Result<AppliedDiscount, DiscountsServiceError>;

    /// Forget the session's code.
    async fn remove_code(&self, identity: SessionIdentity) -> Result<Notice, DiscountsServiceError>;

    async fn create_code(&self, code: NewDiscountCode)
    -> Result<DiscountCode, DiscountsServiceError>;

    /// Every code, newest first.
    async fn list_codes(&self) -> Result<Vec<DiscountCode>, DiscountsServiceError>;

    async fn deactivate_code(&self, code: &str) -> Result<DiscountCode, DiscountsServiceError>;
}

#[cfg(test)]
mod tests {
    use bazaar::discounts::{DefinitionError, DiscountKind};
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::CartsService,
            discounts::models::{DiscountCodeUuid, NewDiscountScope},
        },
        test::{
            TestContext,
            helpers::{create_category, create_product, sign_in},
        },
    };

    use super::*;

    fn percent_code(code: &str, value: u64) -> NewDiscountCode {
        NewDiscountCode {
            uuid: DiscountCodeUuid::new(),
            code: code.to_string(),
            kind: DiscountKind::Percent,
            scope: NewDiscountScope::Cart,
            value,
            max_discount_amount: None,
            min_order_amount: 0,
            starts_at: None,
            ends_at: None,
            usage_limit_total: None,
            usage_limit_per_user: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn apply_code_reports_amount_and_stores_code() -> TestResult {
        let ctx = TestContext::new().await;
        let identity = sign_in(&ctx, "apply@example.com").await?;
        let category = create_category(&ctx, "coats").await?;
        let coat = create_product(&ctx, category.uuid, "coat", 100_000, 5).await?;

        ctx.discounts.create_code(percent_code("save10", 10)).await?;
        ctx.carts.add_item(identity, coat.uuid, Some(1)).await?;

        let applied = ctx.discounts.apply_code(identity, " Save10 ").await?;

        assert_eq!(applied.code, "SAVE10");
        assert_eq!(applied.amount, 10_000);

        let view = ctx.carts.get_cart(identity).await?;

        assert_eq!(view.discount_code.as_deref(), Some("SAVE10"));
        assert_eq!(view.totals.discount_amount, 10_000);
        assert_eq!(view.totals.total_payable, 90_000);

        Ok(())
    }

    #[tokio::test]
    async fn apply_code_on_empty_cart_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let identity = sign_in(&ctx, "empty-cart@example.com").await?;

        ctx.discounts.create_code(percent_code("SAVE10", 10)).await?;

        let result = ctx.discounts.apply_code(identity, "SAVE10").await;

        assert!(
            matches!(result, Err(DiscountsServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn blank_code_is_missing() -> TestResult {
        let ctx = TestContext::new().await;
        let identity = sign_in(&ctx, "blank@example.com").await?;

        let result = ctx.discounts.apply_code(identity, "   ").await;

        assert!(
            matches!(
                result,
                Err(DiscountsServiceError::Rejected(DiscountRejection::Missing))
            ),
            "expected Missing, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_code_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let identity = sign_in(&ctx, "unknown@example.com").await?;
        let category = create_category(&ctx, "belts").await?;
        let belt = create_product(&ctx, category.uuid, "belt", 50_000, 5).await?;

        ctx.carts.add_item(identity, belt.uuid, None).await?;

        let result = ctx.discounts.apply_code(identity, "NOPE").await;

        assert!(
            matches!(
                result,
                Err(DiscountsServiceError::Rejected(DiscountRejection::NotFound))
            ),
            "expected NotFound rejection, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn product_scope_applies_to_its_line_only() -> TestResult {
        let ctx = TestContext::new().await;
        let identity = sign_in(&ctx, "scope@example.com").await?;
        let category = create_category(&ctx, "sneakers").await?;
        let runner = create_product(&ctx, category.uuid, "runner", 200_000, 5).await?;
        let lace = create_product(&ctx, category.uuid, "lace", 10_000, 5).await?;

        ctx.discounts
            .create_code(NewDiscountCode {
                scope: NewDiscountScope::Product(runner.uuid),
                ..percent_code("RUN20", 20)
            })
            .await?;

        ctx.carts.add_item(identity, lace.uuid, None).await?;

        let rejected = ctx.discounts.apply_code(identity, "RUN20").await;

        assert!(
            matches!(
                rejected,
                Err(DiscountsServiceError::Rejected(
                    DiscountRejection::ProductNotInCart { .. }
                ))
            ),
            "expected ProductNotInCart, got {rejected:?}"
        );

        ctx.carts.add_item(identity, runner.uuid, None).await?;

        let applied = ctx.discounts.apply_code(identity, "RUN20").await?;

        assert_eq!(applied.amount, 40_000);
        assert_eq!(applied.product_name.as_deref(), Some(runner.name.as_str()));

        Ok(())
    }

    #[tokio::test]
    async fn remove_code_clears_session_code() -> TestResult {
        let ctx = TestContext::new().await;
        let identity = sign_in(&ctx, "remove@example.com").await?;
        let category = create_category(&ctx, "gloves").await?;
        let glove = create_product(&ctx, category.uuid, "glove", 100_000, 5).await?;

        ctx.discounts.create_code(percent_code("SAVE10", 10)).await?;
        ctx.carts.add_item(identity, glove.uuid, None).await?;
        ctx.discounts.apply_code(identity, "SAVE10").await?;

        let notice = ctx.discounts.remove_code(identity).await?;

        assert_eq!(notice.message, "کد تخفیف حذف شد.");
        assert!(ctx.carts.get_cart(identity).await?.discount_code.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn invalid_definition_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.discounts.create_code(percent_code("HUGE", 101)).await;

        assert!(
            matches!(
                result,
                Err(DiscountsServiceError::Definition(
                    DefinitionError::PercentOverHundred
                ))
            ),
            "expected PercentOverHundred, got {result:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_code_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.discounts.create_code(percent_code("TWICE", 10)).await?;

        let result = ctx.discounts.create_code(percent_code("twice", 5)).await;

        assert!(
            matches!(result, Err(DiscountsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deactivated_code_is_rejected_as_inactive() -> TestResult {
        let ctx = TestContext::new().await;
        let identity = sign_in(&ctx, "inactive@example.com").await?;
        let category = create_category(&ctx, "scarves").await?;
        let scarf = create_product(&ctx, category.uuid, "scarf", 100_000, 5).await?;

        ctx.discounts.create_code(percent_code("WINTER", 10)).await?;
        ctx.carts.add_item(identity, scarf.uuid, None).await?;

        let deactivated = ctx.discounts.deactivate_code("winter").await?;

        assert!(!deactivated.rule.is_active);

        let result = ctx.discounts.apply_code(identity, "WINTER").await;

        assert!(
            matches!(
                result,
                Err(DiscountsServiceError::Rejected(DiscountRejection::Inactive))
            ),
            "expected Inactive, got {result:?}"
        );

        Ok(())
    }
}
