use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, Set};
use sea_orm_migration::prelude::*;
use searchcrate::{DynamicSearch, EntityDef, EntityRelation, SearchRegistry, SearchState};
use serde_json::{Value as JsonValue, json};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub mod entities;
use entities::{category, customer, order, product};

// Relationship metadata for the test schema:
// customers -> orders -> products -> categories.
pub static CATEGORY_DEF: EntityDef = EntityDef {
    table: "categories",
    relations: &[],
};
pub static PRODUCT_DEF: EntityDef = EntityDef {
    table: "products",
    relations: &[EntityRelation {
        name: "category",
        owner_column: "category_id",
        target_column: "id",
        target: &CATEGORY_DEF,
    }],
};
pub static ORDER_DEF: EntityDef = EntityDef {
    table: "orders",
    relations: &[EntityRelation {
        name: "product",
        owner_column: "product_id",
        target_column: "id",
        target: &PRODUCT_DEF,
    }],
};
pub static CUSTOMER_DEF: EntityDef = EntityDef {
    table: "customers",
    relations: &[EntityRelation {
        name: "orders",
        owner_column: "id",
        target_column: "customer_id",
        target: &ORDER_DEF,
    }],
};

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

fn customer_resource(item: &JsonValue) -> JsonValue {
    json!({
        "id": item["id"],
        "name": item["name"],
        "contact": format!(
            "{} <{}>",
            item["name"].as_str().unwrap_or_default(),
            item["email"].as_str().unwrap_or_default()
        ),
    })
}

fn category_resource(item: &JsonValue) -> JsonValue {
    item.clone()
}

pub fn search_registry() -> SearchRegistry {
    SearchRegistry::new()
        .model::<customer::Entity>("Customer", &CUSTOMER_DEF)
        .model::<category::Entity>("Category", &CATEGORY_DEF)
        .resource("CustomerResource", customer_resource)
        .resource("CategoryResource", category_resource)
}

pub fn setup_search_app(db: DatabaseConnection, search: DynamicSearch) -> Router {
    let state = SearchState {
        db,
        registry: Arc::new(search_registry()),
        search,
    };
    searchcrate::routes::router(state)
}

pub async fn post_search(app: &Router, body: &JsonValue) -> (StatusCode, JsonValue) {
    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

pub async fn insert_customer(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    phone: &str,
    comp_id: i32,
) -> Uuid {
    let id = Uuid::new_v4();
    customer::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        phone: Set(phone.to_string()),
        comp_id: Set(comp_id),
    }
    .insert(db)
    .await
    .expect("Failed to insert customer");
    id
}

pub async fn insert_category(db: &DatabaseConnection, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    category::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
    }
    .insert(db)
    .await
    .expect("Failed to insert category");
    id
}

pub async fn insert_product(db: &DatabaseConnection, name: &str, category_id: Uuid) -> Uuid {
    let id = Uuid::new_v4();
    product::ActiveModel {
        id: Set(id),
        category_id: Set(category_id),
        name: Set(name.to_string()),
    }
    .insert(db)
    .await
    .expect("Failed to insert product");
    id
}

pub async fn insert_order(db: &DatabaseConnection, customer_id: Uuid, product_id: Uuid) -> Uuid {
    let id = Uuid::new_v4();
    order::ActiveModel {
        id: Set(id),
        customer_id: Set(customer_id),
        product_id: Set(product_id),
    }
    .insert(db)
    .await
    .expect("Failed to insert order");
    id
}

/// The worked example from the crate docs: two customers bought from the
/// Electronics category (one of them twice), one bought furniture, one
/// never ordered.
pub async fn seed_demo_data(db: &DatabaseConnection) {
    let electronics = insert_category(db, "Electronics").await;
    let furniture = insert_category(db, "Office Furniture").await;
    let laptop = insert_product(db, "Laptop", electronics).await;
    let desk = insert_product(db, "Standing Desk", furniture).await;

    let alice = insert_customer(db, "Alice", "alice@example.com", "555-0101", 1).await;
    let bob = insert_customer(db, "Bob", "bob@example.com", "555-0102", 1).await;
    let carol = insert_customer(db, "Carol", "carol@example.com", "555-0103", 2).await;
    insert_customer(db, "Dave", "dave@example.com", "555-0104", 2).await;

    insert_order(db, alice, laptop).await;
    insert_order(db, alice, laptop).await;
    insert_order(db, bob, laptop).await;
    insert_order(db, carol, desk).await;
}

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateSearchTables)]
    }
}

pub struct CreateSearchTables;

#[async_trait::async_trait]
impl MigrationName for CreateSearchTables {
    fn name(&self) -> &'static str {
        "m20240101_000001_create_search_tables"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateSearchTables {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CategoryTable)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CategoryColumn::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CategoryColumn::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductTable)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductColumn::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductColumn::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(ProductColumn::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CustomerTable)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CustomerColumn::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CustomerColumn::Name).string().not_null())
                    .col(ColumnDef::new(CustomerColumn::Email).string().not_null())
                    .col(ColumnDef::new(CustomerColumn::Phone).string().not_null())
                    .col(ColumnDef::new(CustomerColumn::CompId).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderTable)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrderColumn::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrderColumn::CustomerId).uuid().not_null())
                    .col(ColumnDef::new(OrderColumn::ProductId).uuid().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderTable).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CustomerTable).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProductTable).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CategoryTable).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Debug)]
pub struct CustomerTable;

impl Iden for CustomerTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "customers").unwrap();
    }
}

#[derive(Debug)]
pub enum CustomerColumn {
    Id,
    Name,
    Email,
    Phone,
    CompId,
}

impl Iden for CustomerColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
                Self::Email => "email",
                Self::Phone => "phone",
                Self::CompId => "comp_id",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct OrderTable;

impl Iden for OrderTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "orders").unwrap();
    }
}

#[derive(Debug)]
pub enum OrderColumn {
    Id,
    CustomerId,
    ProductId,
}

impl Iden for OrderColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::CustomerId => "customer_id",
                Self::ProductId => "product_id",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct ProductTable;

impl Iden for ProductTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "products").unwrap();
    }
}

#[derive(Debug)]
pub enum ProductColumn {
    Id,
    CategoryId,
    Name,
}

impl Iden for ProductColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::CategoryId => "category_id",
                Self::Name => "name",
            }
        )
        .unwrap();
    }
}

#[derive(Debug)]
pub struct CategoryTable;

impl Iden for CategoryTable {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(s, "categories").unwrap();
    }
}

#[derive(Debug)]
pub enum CategoryColumn {
    Id,
    Name,
}

impl Iden for CategoryColumn {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        write!(
            s,
            "{}",
            match self {
                Self::Id => "id",
                Self::Name => "name",
            }
        )
        .unwrap();
    }
}
