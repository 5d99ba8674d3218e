//! App Router

use salvo::Router;

use crate::{accounts, auth, carts, catalog, content, discounts, orders};

/// Storefront routes. Browsing, sign-up and sign-in are public; everything tied to a shopper
/// needs a bearer session.
pub fn app_router() -> Router {
    Router::new().push(public_router()).push(
        Router::new()
            .hoop(auth::middleware::handler)
            .push(session_router()),
    )
}

fn public_router() -> Router {
    Router::new()
        .push(Router::with_path("home").get(catalog::home::handler))
        .push(
            Router::with_path("products")
                .get(catalog::index::handler)
                .push(Router::with_path("{slug}").get(catalog::get::handler)),
        )
        .push(Router::with_path("categories").get(catalog::categories::handler))
        .push(Router::with_path("brands").get(catalog::brands::handler))
        .push(Router::with_path("about").get(content::about::handler))
        .push(
            Router::with_path("contact")
                .get(content::contact::handler)
                .push(Router::with_path("messages").post(content::messages::handler)),
        )
        .push(Router::with_path("menu").get(content::menu::handler))
        .push(
            Router::with_path("accounts")
                .push(Router::with_path("register").post(accounts::register::handler))
                .push(Router::with_path("login").post(accounts::login::handler)),
        )
}

fn session_router() -> Router {
    Router::new()
        .push(
            Router::with_path("products/{slug}/reviews").post(catalog::reviews::handler),
        )
        .push(
            Router::with_path("accounts")
                .push(Router::with_path("logout").post(accounts::logout::handler))
                .push(
                    Router::with_path("profile")
                        .get(accounts::profile::handler)
                        .put(accounts::update_profile::handler),
                )
                .push(Router::with_path("reviews").get(catalog::user_reviews::handler))
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(orders::get::handler)
                                .push(Router::with_path("cancel").post(orders::cancel::handler)),
                        ),
                ),
        )
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::add::handler)
                        .put(carts::update::handler)
                        .push(Router::with_path("{product}").delete(carts::remove::handler)),
                )
                .push(Router::with_path("sync").post(carts::sync::handler))
                .push(
                    Router::with_path("discount")
                        .post(discounts::apply::handler)
                        .delete(discounts::remove::handler),
                ),
        )
        .push(Router::with_path("checkout").post(orders::checkout::handler))
        .push(
            Router::with_path("orders/{order}")
                .push(Router::with_path("payment").post(orders::payment::handler))
                .push(Router::with_path("invoice").get(orders::invoice::handler)),
        )
}
