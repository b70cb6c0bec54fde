//! Result shaping: the uniform `{result, status}` envelope, the paginated
//! `{data, pagination}` payload, and the raw query-mode escape hatch.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use utoipa::ToSchema;

use crate::pagination::PageResult;
use crate::registry::ResourceTransform;

/// The uniform wrapper applied to API-format responses: `status` is `true`
/// with the payload in `result`, or `false` with an empty `result` when
/// nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    pub result: JsonValue,
    pub status: bool,
}

impl Envelope {
    #[must_use]
    pub fn success(result: JsonValue) -> Self {
        Self {
            result,
            status: true,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            result: JsonValue::Array(Vec::new()),
            status: false,
        }
    }
}

/// Counters attached to a paginated payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Full matching-row count ignoring limit/offset.
    pub total: u64,
    /// Rows on this page.
    pub count: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub last_page: u64,
}

/// Executed results handed to the shaper.
#[derive(Debug, Clone)]
pub enum SearchResults {
    Flat(Vec<JsonValue>),
    Paginated(PageResult),
}

impl SearchResults {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(items) => items.is_empty(),
            Self::Paginated(page) => page.items.is_empty(),
        }
    }

    fn into_raw(self) -> Vec<JsonValue> {
        match self {
            Self::Flat(items) => items,
            Self::Paginated(page) => page.items,
        }
    }
}

/// Shaped outcome of one search. Query mode is the one path that returns a
/// non-envelope value.
#[derive(Debug, Clone)]
pub enum ShapedResponse {
    /// Raw result rows, untransformed (query mode).
    Raw(Vec<JsonValue>),
    /// Payload without the envelope (API format disabled).
    Plain(JsonValue),
    /// `{result, status}` envelope with its HTTP status.
    Enveloped {
        status: StatusCode,
        envelope: Envelope,
    },
}

/// Wrap executed results for the caller.
///
/// Query mode bypasses shaping entirely. Otherwise an empty result set is
/// the `{result: [], status: false}` envelope with HTTP 404 no matter which
/// flags are set; non-empty results pass through the resource transform and
/// are wrapped according to `api_format`.
#[must_use]
pub fn shape(
    results: SearchResults,
    query_mode: bool,
    api_format: bool,
    transform: &dyn ResourceTransform,
) -> ShapedResponse {
    if query_mode {
        return ShapedResponse::Raw(results.into_raw());
    }
    if results.is_empty() {
        return ShapedResponse::Enveloped {
            status: StatusCode::NOT_FOUND,
            envelope: Envelope::empty(),
        };
    }

    let payload = match results {
        SearchResults::Flat(items) => JsonValue::Array(apply(transform, &items)),
        SearchResults::Paginated(page) => {
            let meta = PaginationMeta {
                total: page.total,
                count: page.items.len() as u64,
                per_page: page.per_page,
                current_page: page.current_page,
                last_page: page.last_page,
            };
            json!({
                "data": apply(transform, &page.items),
                "pagination": meta,
            })
        }
    };

    if api_format {
        ShapedResponse::Enveloped {
            status: StatusCode::OK,
            envelope: Envelope::success(payload),
        }
    } else {
        ShapedResponse::Plain(payload)
    }
}

fn apply(transform: &dyn ResourceTransform, items: &[JsonValue]) -> Vec<JsonValue> {
    items.iter().map(|item| transform.transform(item)).collect()
}

impl IntoResponse for ShapedResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Raw(items) => Json(items).into_response(),
            Self::Plain(body) => Json(body).into_response(),
            Self::Enveloped { status, envelope } => (status, Json(envelope)).into_response(),
        }
    }
}
