//! Per-invocation orchestration: interpret the request, build the query,
//! execute it, shape the results.

use sea_orm::DatabaseConnection;
use serde_json::Value as JsonValue;

use crate::errors::SearchError;
use crate::models::{QuerySpec, SearchRequest};
use crate::registry::SearchRegistry;
use crate::response::{SearchResults, ShapedResponse};
use crate::{filter, pagination, response, sort};

/// Caller-side configuration for dynamic searches: static pre-conditions and
/// the pagination/query-mode/API-format knobs. The request never controls
/// these; they belong to the endpoint that runs the search.
///
/// ```rust,ignore
/// let search = DynamicSearch::new()
///     .static_condition("comp_id", user.company_id)
///     .with_pagination(true);
/// let outcome = search.execute(&db, &registry, &request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DynamicSearch {
    static_conditions: Vec<(String, JsonValue)>,
    with_pagination: bool,
    query_mode: bool,
    api_format: bool,
}

impl Default for DynamicSearch {
    fn default() -> Self {
        Self {
            static_conditions: Vec::new(),
            with_pagination: false,
            query_mode: false,
            api_format: true,
        }
    }
}

impl DynamicSearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality pre-condition AND-ed in front of the dynamic search
    /// group, e.g. tenant scoping.
    #[must_use]
    pub fn static_condition(mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.static_conditions.push((field.into(), value.into()));
        self
    }

    /// Page the results using the request's `page`/`limit` (defaults 1/10).
    #[must_use]
    pub fn with_pagination(mut self, enabled: bool) -> Self {
        self.with_pagination = enabled;
        self
    }

    /// Return raw result rows instead of serialized, enveloped output.
    #[must_use]
    pub fn query_mode(mut self, enabled: bool) -> Self {
        self.query_mode = enabled;
        self
    }

    /// Wrap the payload in the `{result, status}` envelope (on by default).
    #[must_use]
    pub fn api_format(mut self, enabled: bool) -> Self {
        self.api_format = enabled;
        self
    }

    /// Run one search end-to-end.
    ///
    /// # Errors
    /// [`SearchError::Validation`] for field-level violations,
    /// [`SearchError::UnknownTarget`] for unregistered model/resource names,
    /// [`SearchError::UnknownRelation`] for a bad relationship path, and
    /// [`SearchError::Database`] when execution fails.
    pub async fn execute(
        &self,
        db: &DatabaseConnection,
        registry: &SearchRegistry,
        request: &SearchRequest,
    ) -> Result<ShapedResponse, SearchError> {
        request.validate()?;
        let (source, transform) = registry.resolve(&request.model, &request.resource)?;
        let definition = source.definition();

        let spec = QuerySpec {
            condition: filter::build(
                definition,
                &self.static_conditions,
                &request.columns,
                request.value.as_deref(),
            )?,
            order: sort::order_clause(definition, request.order_by.as_ref()),
            pagination: self
                .with_pagination
                .then(|| pagination::page_request(request.page, request.limit)),
        };

        let results = match spec.pagination {
            Some(page) => SearchResults::Paginated(
                source
                    .fetch_page(db, &spec, page)
                    .await
                    .map_err(SearchError::database)?,
            ),
            None => SearchResults::Flat(
                source
                    .fetch(db, &spec)
                    .await
                    .map_err(SearchError::database)?,
            ),
        };

        Ok(response::shape(
            results,
            self.query_mode,
            self.api_format,
            transform,
        ))
    }
}
