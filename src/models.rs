use sea_orm::{Order, sea_query::SimpleExpr};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::SearchError;
use crate::pagination::PageRequest;

/// Request body for a dynamic search.
///
/// # Columns
/// Each entry in `column` is either a plain column name on the target model,
/// or a dot-delimited relationship path ending in a column on the related
/// model, for example:
/// ```json
/// {
///     "model": "Customer",
///     "resource": "CustomerResource",
///     "column": ["name", "phone", "email", "orders.product.category.name"],
///     "value": "Electronics"
/// }
/// ```
/// A dotted entry matches a row when at least one related row reached through
/// the path contains the search value, no matter how many related rows match.
///
/// # Ordering
/// The optional `orderBy` object carries a column name and a direction
/// (`asc` or `desc`):
/// ```json
/// {"orderBy": {"column": "name", "direction": "desc"}}
/// ```
///
/// # Pagination
/// `page` (1-based, default 1) and `limit` (default 10) only take effect when
/// the executing [`DynamicSearch`](crate::DynamicSearch) has pagination
/// enabled; without it, every matching row is returned.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Name of the registered model to search.
    pub model: String,
    /// Name of the registered resource serializer to apply.
    pub resource: String,
    /// Columns to search; plain names or dotted relationship paths.
    #[serde(rename = "column")]
    pub columns: Vec<String>,
    /// Value searched for as a substring; absent or empty matches every row.
    #[serde(default)]
    pub value: Option<String>,
    /// Optional single-key sort.
    #[serde(default, rename = "orderBy")]
    pub order_by: Option<OrderBy>,
    /// Items per page when pagination is enabled.
    #[serde(default)]
    pub limit: Option<u64>,
    /// 1-based page number when pagination is enabled.
    #[serde(default)]
    pub page: Option<u64>,
}

/// Sort clause of a [`SearchRequest`].
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

impl SearchRequest {
    /// Check the value constraints the deserializer cannot express.
    ///
    /// Missing fields and type mismatches are already rejected by the JSON
    /// extraction layer; this pass collects every remaining violation so the
    /// caller sees all of them at once.
    ///
    /// # Errors
    /// Returns [`SearchError::Validation`] listing each violated constraint.
    pub fn validate(&self) -> Result<(), SearchError> {
        let mut errors = Vec::new();
        if self.model.trim().is_empty() {
            errors.push("model must be a non-empty string".to_string());
        }
        if self.resource.trim().is_empty() {
            errors.push("resource must be a non-empty string".to_string());
        }
        if self.columns.is_empty() {
            errors.push("column must be a non-empty array".to_string());
        }
        if self.columns.iter().any(|column| column.trim().is_empty()) {
            errors.push("column entries must be non-empty strings".to_string());
        }
        if let Some(order_by) = &self.order_by
            && order_by.column.trim().is_empty()
        {
            errors.push("orderBy.column must be a non-empty string".to_string());
        }
        if self.page == Some(0) {
            errors.push("page must be a positive integer".to_string());
        }
        if self.limit == Some(0) {
            errors.push("limit must be a positive integer".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SearchError::validation(errors))
        }
    }
}

/// Composed query for one search invocation: the predicate tree, an optional
/// order clause, and an optional page clause. Built fresh per request and
/// handed to a [`SearchSource`](crate::SearchSource) for execution.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub condition: sea_orm::Condition,
    pub order: Option<(SimpleExpr, Order)>,
    pub pagination: Option<PageRequest>,
}
