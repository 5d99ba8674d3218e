//! Test helpers.

use std::sync::Arc;

use bazaar_app::{
    auth::{MockAuthService, SessionIdentity, SessionUuid},
    context::AppContext,
    domain::{
        accounts::{MockAccountsService, models::UserUuid},
        carts::MockCartsService,
        catalog::MockCatalogService,
        content::MockContentService,
        discounts::MockDiscountsService,
        orders::MockOrdersService,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));

pub(crate) const TEST_IDENTITY: SessionIdentity = SessionIdentity {
    session: SessionUuid::from_uuid(Uuid::nil()),
    user: TEST_USER_UUID,
};

/// One mock per service. Any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) accounts: MockAccountsService,
    pub(crate) catalog: MockCatalogService,
    pub(crate) carts: MockCartsService,
    pub(crate) discounts: MockDiscountsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) content: MockContentService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            accounts: Arc::new(self.accounts),
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            discounts: Arc::new(self.discounts),
            orders: Arc::new(self.orders),
            content: Arc::new(self.content),
        })
    }
}

#[salvo::handler]
pub(crate) async fn inject_identity(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(TEST_IDENTITY);
    ctrl.call_next(req, depot, res).await;
}

/// A service for routes anyone may call.
pub(crate) fn public_service(mocks: Mocks, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(mocks.into_state())).push(route))
}

/// A service whose requests arrive already authenticated as [`TEST_IDENTITY`].
pub(crate) fn signed_in_service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(inject_identity)
            .push(route),
    )
}
