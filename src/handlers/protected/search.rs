use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::database::{SearchParams, UserRecord};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Case-sensitive substring of `name`; empty matches every record.
    #[serde(default)]
    pub name: String,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// One page of matches. No total count is returned.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchPage {
    pub page: i64,
    pub page_size: i64,
    pub users: Vec<UserRecord>,
}

/// GET /api/users/search?name=&page=&page_size=
pub async fn search_get(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchPage>> {
    let (page, page_size) = resolve_paging(&query, state.max_page_size)?;
    let params = SearchParams::for_page(query.name, page, page_size)
        .ok_or_else(|| ApiError::bad_request("page is out of range"))?;

    let users = state.users.search(params).await?;

    Ok(Json(SearchPage {
        page,
        page_size,
        users,
    }))
}

fn resolve_paging(query: &SearchQuery, max_page_size: i64) -> ApiResult<(i64, i64)> {
    let page = query.page.unwrap_or(1);
    if page < 1 {
        return Err(ApiError::bad_request("page must be at least 1"));
    }

    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size < 1 {
        return Err(ApiError::bad_request("page_size must be at least 1"));
    }

    Ok((page, page_size.min(max_page_size)))
}
