use async_trait::async_trait;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::marker::PhantomData;

use crate::models::QuerySpec;
use crate::pagination::{PageRequest, PageResult};
use crate::registry::EntityDef;

/// Query execution engine seam. Object-safe because the model name arrives
/// as a string at runtime, so dispatch over registered entities must be
/// dynamic. Rows come back as raw JSON values; the response layer decides
/// whether a resource transform applies.
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Table and relationship metadata the query builder compiles against.
    fn definition(&self) -> &'static EntityDef;

    /// Fetch every matching row, ordered by the [`QuerySpec`] order clause.
    async fn fetch(
        &self,
        db: &DatabaseConnection,
        spec: &QuerySpec,
    ) -> Result<Vec<JsonValue>, DbErr>;

    /// Fetch one page plus the paginator counters.
    async fn fetch_page(
        &self,
        db: &DatabaseConnection,
        spec: &QuerySpec,
        page: PageRequest,
    ) -> Result<PageResult, DbErr>;
}

/// The provided Sea-ORM-backed [`SearchSource`].
pub struct EntitySource<E: EntityTrait> {
    definition: &'static EntityDef,
    entity: PhantomData<fn() -> E>,
}

impl<E: EntityTrait> EntitySource<E> {
    #[must_use]
    pub fn new(definition: &'static EntityDef) -> Self {
        Self {
            definition,
            entity: PhantomData,
        }
    }

    fn select(&self, spec: &QuerySpec) -> Select<E> {
        let mut query = E::find().filter(spec.condition.clone());
        if let Some((column, direction)) = &spec.order {
            query = query.order_by(column.clone(), direction.clone());
        }
        query
    }
}

#[async_trait]
impl<E> SearchSource for EntitySource<E>
where
    E: EntityTrait,
    E::Model: Serialize + Send + Sync,
{
    fn definition(&self) -> &'static EntityDef {
        self.definition
    }

    async fn fetch(
        &self,
        db: &DatabaseConnection,
        spec: &QuerySpec,
    ) -> Result<Vec<JsonValue>, DbErr> {
        let models = self.select(spec).all(db).await?;
        to_json(models)
    }

    async fn fetch_page(
        &self,
        db: &DatabaseConnection,
        spec: &QuerySpec,
        page: PageRequest,
    ) -> Result<PageResult, DbErr> {
        let paginator = self.select(spec).paginate(db, page.per_page);
        let counts = paginator.num_items_and_pages().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;
        Ok(PageResult {
            items: to_json(models)?,
            total: counts.number_of_items,
            per_page: page.per_page,
            current_page: page.page,
            last_page: counts.number_of_pages,
        })
    }
}

fn to_json<M: Serialize>(models: Vec<M>) -> Result<Vec<JsonValue>, DbErr> {
    models
        .into_iter()
        .map(|model| serde_json::to_value(&model).map_err(|err| DbErr::Json(err.to_string())))
        .collect()
}
