//! Brand Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::catalog::models::Brand;

use crate::{catalog::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Brand> for BrandResponse {
    fn from(brand: Brand) -> Self {
        Self {
            uuid: brand.uuid.into(),
            name: brand.name,
            slug: brand.slug,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandsResponse {
    /// Active brands
    pub brands: Vec<BrandResponse>,
}

/// Brand Index Handler
#[endpoint(tags("catalog"), summary = "List Brands")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BrandsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let brands = state
        .app
        .catalog
        .list_brands()
        .await
        .map_err(into_status_error)?;

    Ok(Json(BrandsResponse {
        brands: brands.into_iter().map(Into::into).collect(),
    }))
}
