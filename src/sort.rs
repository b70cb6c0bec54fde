use sea_orm::{Order, sea_query::{Alias, IntoColumnRef, SimpleExpr}};

use crate::models::OrderBy;
use crate::registry::EntityDef;

/// Map the request's optional `orderBy` onto a single-key sort clause.
/// Absent means no ORDER BY at all (store default order).
#[must_use]
pub fn order_clause(
    definition: &EntityDef,
    order_by: Option<&OrderBy>,
) -> Option<(SimpleExpr, Order)> {
    order_by.map(|order| {
        let column = SimpleExpr::Column(
            (
                Alias::new(definition.table),
                Alias::new(order.column.as_str()),
            )
                .into_column_ref(),
        );
        (column, order.direction.into())
    })
}
