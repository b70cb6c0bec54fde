//! Startup-populated lookup of searchable models and resource serializers.
//!
//! Model and resource names arrive in the request body as plain strings.
//! Instead of probing for types at runtime, applications register every
//! searchable entity and serializer once at startup; unknown names are
//! rejected with a single generic error.

use sea_orm::EntityTrait;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::errors::SearchError;
use crate::traits::{EntitySource, SearchSource};

/// Static description of a searchable entity: its table and the relationships
/// dotted column paths may traverse.
///
/// Definitions are plain `static` data and chain to any depth:
///
/// ```rust,ignore
/// static CATEGORY: EntityDef = EntityDef { table: "categories", relations: &[] };
/// static PRODUCT: EntityDef = EntityDef {
///     table: "products",
///     relations: &[EntityRelation {
///         name: "category",
///         owner_column: "category_id",
///         target_column: "id",
///         target: &CATEGORY,
///     }],
/// };
/// ```
#[derive(Debug)]
pub struct EntityDef {
    pub table: &'static str,
    pub relations: &'static [EntityRelation],
}

/// One relationship hop: rows of `target` are reachable from the owning
/// entity where `owner_column` equals `target_column` on the target table.
#[derive(Debug)]
pub struct EntityRelation {
    /// Name used in dotted column paths (e.g. "orders").
    pub name: &'static str,
    /// Join column on the owning table.
    pub owner_column: &'static str,
    /// Join column on the target table.
    pub target_column: &'static str,
    /// Definition of the related entity.
    pub target: &'static EntityDef,
}

impl EntityDef {
    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&'static EntityRelation> {
        self.relations.iter().find(|rel| rel.name == name)
    }
}

/// Per-item serializer applied to each result row, the counterpart of a
/// resource/view class. Receives the raw entity row as JSON and returns the
/// API representation.
pub trait ResourceTransform: Send + Sync {
    fn transform(&self, item: &JsonValue) -> JsonValue;
}

impl<F> ResourceTransform for F
where
    F: Fn(&JsonValue) -> JsonValue + Send + Sync,
{
    fn transform(&self, item: &JsonValue) -> JsonValue {
        self(item)
    }
}

/// Registry mapping request-supplied names to searchable models and resource
/// serializers. Built once at startup, shared immutably across requests.
#[derive(Default)]
pub struct SearchRegistry {
    models: HashMap<String, Box<dyn SearchSource>>,
    resources: HashMap<String, Box<dyn ResourceTransform>>,
}

impl SearchRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a Sea-ORM entity as a searchable model.
    #[must_use]
    pub fn model<E>(mut self, name: impl Into<String>, definition: &'static EntityDef) -> Self
    where
        E: EntityTrait,
        E::Model: Serialize + Send + Sync,
    {
        self.models
            .insert(name.into(), Box::new(EntitySource::<E>::new(definition)));
        self
    }

    /// Register a resource serializer under the given name.
    #[must_use]
    pub fn resource(
        mut self,
        name: impl Into<String>,
        transform: impl ResourceTransform + 'static,
    ) -> Self {
        self.resources.insert(name.into(), Box::new(transform));
        self
    }

    /// Resolve a model/resource name pair.
    ///
    /// # Errors
    /// Returns [`SearchError::UnknownTarget`] when either name is missing,
    /// without revealing which one.
    pub fn resolve(
        &self,
        model: &str,
        resource: &str,
    ) -> Result<(&dyn SearchSource, &dyn ResourceTransform), SearchError> {
        match (self.models.get(model), self.resources.get(resource)) {
            (Some(source), Some(transform)) => Ok((source.as_ref(), transform.as_ref())),
            _ => Err(SearchError::unknown_target()),
        }
    }
}
