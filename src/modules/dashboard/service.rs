use anyhow::Context;
use axum::response::{IntoResponse, Response};
use sitekit_core::{AppError, PaginationMeta, PaginationParams};
use sitekit_db::{Entity, Fields, OrderBy, PgPool, Repository};

use crate::utils::flash::Flash;
use crate::utils::redirect::found;

pub struct DashboardService;

impl DashboardService {
    /// One page of `E` for a list view.
    ///
    /// `order_by` from the query replaces `default_order`; unknown columns are a 400.
    pub async fn paginate<E: Entity>(
        db: &PgPool,
        params: &PaginationParams,
        default_limit: i64,
        default_order: &[OrderBy],
    ) -> Result<(Vec<E>, PaginationMeta), AppError> {
        let mut order = OrderBy::parse_list::<E>(&params.order_by()).map_err(AppError::bad_request)?;
        if order.is_empty() {
            order = default_order.to_vec();
        }

        let limit = params.limit(default_limit);
        let offset = params.offset(default_limit);

        let total = Repository::<E>::count(db, &Fields::new())
            .await
            .with_context(|| format!("Failed to count {}", E::TABLE))
            .map_err(AppError::database)?;
        let rows = Repository::<E>::get_all(db, &Fields::new(), &order, Some(limit), offset)
            .await
            .with_context(|| format!("Failed to list {}", E::TABLE))
            .map_err(AppError::database)?;

        Ok((rows, params.meta(total, default_limit)))
    }

    /// Warning flash plus a redirect, used whenever a URL names a row that is gone.
    pub fn missing(flash: Flash, message: &str, list_url: &str) -> Response {
        (flash.warning(message), found(list_url)).into_response()
    }
}
