//! Menu Handler

use std::sync::Arc;

use salvo::prelude::*;

use bazaar::menu::MenuType;

use crate::{
    content::{errors::into_status_error, models::MenuNodeResponse},
    extensions::*,
    state::State,
};

/// Menu Handler
///
/// The active tree for `?type=main` (default) or `?type=footer`.
#[endpoint(
    tags("content"),
    summary = "Menu",
    responses(
        (status_code = StatusCode::OK, description = "Menu tree"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown menu type"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<MenuNodeResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let menu_type = match req.query::<String>("type") {
        Some(value) => value
            .parse::<MenuType>()
            .map_err(|error| StatusError::bad_request().brief(error.to_string()))?,
        None => MenuType::default(),
    };

    let nodes = state
        .app
        .content
        .menu(menu_type)
        .await
        .map_err(into_status_error)?;

    Ok(Json(nodes.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use bazaar::menu::MenuNode;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, public_service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        public_service(mocks, Router::with_path("menu").get(handler))
    }

    #[tokio::test]
    async fn test_footer_menu_is_nested() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .content
            .expect_menu()
            .once()
            .withf(|menu_type| *menu_type == MenuType::Footer)
            .return_once(|_| {
                Ok(vec![MenuNode {
                    title: "فروشگاه".to_string(),
                    url: "/shop/".to_string(),
                    children: vec![MenuNode {
                        title: "پیراهن".to_string(),
                        url: "/shop/?category=shirts".to_string(),
                        children: Vec::new(),
                    }],
                }])
            });

        let body: Vec<MenuNodeResponse> = TestClient::get("http://example.com/menu?type=footer")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body[0].url, "/shop/");
        assert_eq!(body[0].children.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_type_defaults_to_main() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .content
            .expect_menu()
            .once()
            .withf(|menu_type| *menu_type == MenuType::Main)
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/menu")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_type_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.content.expect_menu().never();

        let res = TestClient::get("http://example.com/menu?type=sidebar")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
