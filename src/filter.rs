//! Predicate construction for one search invocation.
//!
//! Two groups make up the filter: a conjunctive group of caller-supplied
//! static conditions (tenant scoping and the like), AND-ed with a disjunctive
//! group holding one `LIKE '%value%'` predicate per requested column. A
//! dotted column path compiles to a chain of `IN (SELECT ...)` semi-joins, so
//! a row matches when at least one related row matches and is never
//! duplicated by multiple related matches.

use sea_orm::Condition;
use sea_orm::sea_query::{Alias, Expr, Query, SimpleExpr};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::errors::SearchError;
use crate::registry::EntityDef;

/// Build the complete filter condition.
///
/// An absent or empty `value` produces `LIKE '%%'` predicates that match
/// every row with a non-NULL column; the request still runs.
///
/// # Errors
/// Returns [`SearchError::UnknownRelation`] when a dotted path names a
/// relationship the entity definition does not carry.
pub fn build(
    definition: &'static EntityDef,
    static_conditions: &[(String, JsonValue)],
    columns: &[String],
    value: Option<&str>,
) -> Result<Condition, SearchError> {
    let mut condition = scope_condition(definition, static_conditions);
    condition = condition.add(column_condition(definition, columns, value)?);
    Ok(condition)
}

/// Conjunctive equality group from the caller's static conditions.
fn scope_condition(definition: &EntityDef, fields: &[(String, JsonValue)]) -> Condition {
    let mut condition = Condition::all();
    for (field, value) in fields {
        condition = condition.add(equality(definition, field, value));
    }
    condition
}

fn equality(definition: &EntityDef, field: &str, value: &JsonValue) -> SimpleExpr {
    match value {
        JsonValue::String(text) => {
            // String values that parse as UUIDs compare as UUIDs.
            if let Ok(uuid) = Uuid::parse_str(text.trim()) {
                Expr::col(col(definition, field)).eq(uuid)
            } else {
                Expr::col(col(definition, field)).eq(text.clone())
            }
        }
        JsonValue::Number(number) if number.is_i64() => {
            Expr::col(col(definition, field)).eq(number.as_i64().unwrap_or_default())
        }
        JsonValue::Number(number) => {
            Expr::col(col(definition, field)).eq(number.as_f64().unwrap_or_default())
        }
        JsonValue::Bool(flag) => Expr::col(col(definition, field)).eq(*flag),
        JsonValue::Null => Expr::col(col(definition, field)).is_null(),
        other => Expr::col(col(definition, field)).eq(other.to_string()),
    }
}

/// Disjunctive group: one predicate per requested column.
fn column_condition(
    definition: &'static EntityDef,
    columns: &[String],
    value: Option<&str>,
) -> Result<Condition, SearchError> {
    let pattern = format!("%{}%", value.unwrap_or_default());
    let mut group = Condition::any();
    for column in columns {
        group = group.add(column_predicate(definition, column, &pattern)?);
    }
    Ok(group)
}

fn column_predicate(
    definition: &'static EntityDef,
    column: &str,
    pattern: &str,
) -> Result<SimpleExpr, SearchError> {
    let mut segments: Vec<&str> = column.split('.').collect();
    let target_column = segments.pop().unwrap_or(column);
    relation_predicate(definition, &segments, target_column, pattern)
}

/// Compile a relationship chain into nested `IN (SELECT ...)` predicates,
/// innermost first. With an empty chain this is a plain LIKE on the current
/// entity's table.
fn relation_predicate(
    definition: &'static EntityDef,
    path: &[&str],
    column: &str,
    pattern: &str,
) -> Result<SimpleExpr, SearchError> {
    let Some((name, rest)) = path.split_first() else {
        return Ok(Expr::col(col(definition, column)).like(pattern));
    };
    let relation = definition
        .relation(name)
        .ok_or_else(|| SearchError::unknown_relation(*name))?;
    let inner = relation_predicate(relation.target, rest, column, pattern)?;
    let subquery = Query::select()
        .column(col(relation.target, relation.target_column))
        .from(Alias::new(relation.target.table))
        .and_where(inner)
        .take();
    Ok(Expr::col(col(definition, relation.owner_column)).in_subquery(subquery))
}

fn col(definition: &EntityDef, column: &str) -> (Alias, Alias) {
    (Alias::new(definition.table), Alias::new(column))
}
