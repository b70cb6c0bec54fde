//! # searchcrate
//!
//! Dynamic model search endpoints for Axum and Sea-ORM.
//!
//! A single request body names a registered model, a resource serializer, a
//! list of columns to search (plain column names, or dotted paths reaching
//! through relationships such as `orders.product.category.name`), a search
//! value, and optional ordering and pagination. The crate compiles that into
//! a Sea-ORM query, executes it, and wraps the results in a uniform
//! `{result, status}` envelope.
//!
//! ```rust,ignore
//! use searchcrate::{DynamicSearch, EntityDef, EntityRelation, SearchRegistry, SearchState};
//! use std::sync::Arc;
//!
//! static CATEGORY: EntityDef = EntityDef { table: "categories", relations: &[] };
//! static PRODUCT: EntityDef = EntityDef {
//!     table: "products",
//!     relations: &[EntityRelation {
//!         name: "category",
//!         owner_column: "category_id",
//!         target_column: "id",
//!         target: &CATEGORY,
//!     }],
//! };
//!
//! let registry = SearchRegistry::new()
//!     .model::<product::Entity>("Product", &PRODUCT)
//!     .resource("ProductResource", |item: &serde_json::Value| item.clone());
//!
//! let state = SearchState {
//!     db,
//!     registry: Arc::new(registry),
//!     search: DynamicSearch::new().with_pagination(true),
//! };
//! let app = searchcrate::routes::router(state);
//! ```
//!
//! Callers that need per-request scoping (tenant columns and the like) skip
//! the bundled router and call [`DynamicSearch::execute`] from their own
//! handlers.

pub mod errors;
pub mod filter;
pub mod models;
pub mod pagination;
pub mod registry;
pub mod response;
pub mod routes;
pub mod search;
pub mod sort;
pub mod traits;

pub use errors::SearchError;
pub use models::{OrderBy, QuerySpec, SearchRequest, SortDirection};
pub use registry::{EntityDef, EntityRelation, ResourceTransform, SearchRegistry};
pub use response::{Envelope, PaginationMeta, SearchResults, ShapedResponse};
pub use routes::SearchState;
pub use search::DynamicSearch;
pub use traits::{EntitySource, SearchSource};
