//! Dynamic filter/sort builder applied by every list operation.
//!
//! Turns parallel lists of (column, operator, value) strings into sea-orm
//! predicates against an arbitrary entity. Construction is best-effort by
//! contract: an unknown column, an unparseable value or an operator the
//! column's type does not support drops that one filter and leaves the rest
//! of the query intact. A list view must never fail because of a stale or
//! hand-edited filter URL. Every dropped filter is reported at debug level.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use sea_orm::sea_query::{ColumnType, Expr, Func};
use common::pagination::Pagination;
use sea_orm::{
    ColumnTrait, EntityTrait, IdenStatic, IntoSimpleExpr, Iterable, Order, QueryFilter,
    QueryOrder, QuerySelect, Select, Value,
};
use serde::Deserialize;
use tracing::debug;

/// Filter operator vocabulary. `In` deliberately behaves like `Eq`: the
/// original system never implemented set membership and callers depend on
/// the equality behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    In,
}

impl FromStr for FilterOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "neq" => Ok(Self::Neq),
            "gt" => Ok(Self::Gt),
            "gte" => Ok(Self::Gte),
            "lt" => Ok(Self::Lt),
            "lte" => Ok(Self::Lte),
            "like" => Ok(Self::Like),
            "in" => Ok(Self::In),
            _ => Err(()),
        }
    }
}

/// List-endpoint parameters: the list-style filters, the sort pair, and the
/// legacy single-filter convention (`filter_by`/`filter_value`) older
/// callers still send.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListParams {
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[serde(default)]
    pub filter_cols: Vec<String>,
    #[serde(default)]
    pub filter_ops: Vec<String>,
    #[serde(default)]
    pub filter_vals: Vec<String>,
    pub filter_by: Option<String>,
    pub filter_value: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListParams {
    pub fn sorted(sort_by: &str, sort_order: &str) -> Self {
        Self {
            sort_by: Some(sort_by.to_string()),
            sort_order: Some(sort_order.to_string()),
            ..Default::default()
        }
    }

    pub fn filtered(cols: &[&str], ops: &[&str], vals: &[&str]) -> Self {
        Self {
            filter_cols: cols.iter().map(|s| s.to_string()).collect(),
            filter_ops: ops.iter().map(|s| s.to_string()).collect(),
            filter_vals: vals.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }
}

/// Resolve a column by its snake_case name on the target entity.
fn resolve_column<E: EntityTrait>(name: &str) -> Option<E::Column> {
    E::Column::iter().find(|c| c.as_str() == name)
}

fn is_text(ty: &ColumnType) -> bool {
    matches!(ty, ColumnType::Char(_) | ColumnType::String(_) | ColumnType::Text | ColumnType::Custom(_))
}

/// Coerce a raw string to the column's declared type. `None` means the
/// value does not parse and the filter must be dropped.
fn coerce_value(ty: &ColumnType, raw: &str) -> Option<Value> {
    match ty {
        ColumnType::TinyInteger
        | ColumnType::SmallInteger
        | ColumnType::Integer
        | ColumnType::BigInteger
        | ColumnType::TinyUnsigned
        | ColumnType::SmallUnsigned
        | ColumnType::Unsigned
        | ColumnType::BigUnsigned => raw.trim().parse::<i64>().ok().map(Value::from),
        ColumnType::Float | ColumnType::Double | ColumnType::Decimal(_) => {
            raw.trim().parse::<f64>().ok().map(Value::from)
        }
        ColumnType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().map(Value::from),
        ColumnType::Time => NaiveTime::parse_from_str(raw, "%H:%M:%S").ok().map(Value::from),
        ColumnType::Boolean => {
            Some(Value::from(matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes" | "on")))
        }
        ty if is_text(ty) => Some(Value::from(raw)),
        _ => None,
    }
}

/// Apply the list-style filters. Mismatched or empty lists are a no-op.
pub fn apply_filters<E: EntityTrait>(
    mut query: Select<E>,
    cols: &[String],
    ops: &[String],
    vals: &[String],
) -> Select<E> {
    if cols.is_empty() || ops.is_empty() || vals.is_empty() {
        return query;
    }
    if cols.len() != ops.len() || ops.len() != vals.len() {
        return query;
    }

    for ((col_name, op_name), raw) in cols.iter().zip(ops).zip(vals) {
        let Some(col) = resolve_column::<E>(col_name) else {
            debug!(column = %col_name, "dropping filter: unknown column");
            continue;
        };
        let Ok(op) = FilterOp::from_str(op_name) else {
            debug!(column = %col_name, op = %op_name, "dropping filter: unknown operator");
            continue;
        };
        let def = col.def();
        let ty = def.get_column_type();
        let Some(val) = coerce_value(ty, raw) else {
            debug!(column = %col_name, value = %raw, "dropping filter: value does not parse");
            continue;
        };

        query = match op {
            FilterOp::Eq => query.filter(col.eq(val)),
            FilterOp::Neq => query.filter(col.ne(val)),
            FilterOp::Gt => query.filter(col.gt(val)),
            FilterOp::Gte => query.filter(col.gte(val)),
            FilterOp::Lt => query.filter(col.lt(val)),
            FilterOp::Lte => query.filter(col.lte(val)),
            FilterOp::Like if is_text(ty) => {
                // Case-insensitive substring match, portable across backends.
                let pattern = format!("%{}%", raw.to_lowercase());
                query.filter(Expr::expr(Func::lower(col.into_simple_expr())).like(pattern))
            }
            // `in` carries equality semantics on text columns, as shipped.
            FilterOp::In if is_text(ty) => query.filter(col.eq(val)),
            FilterOp::Like | FilterOp::In => {
                debug!(column = %col_name, op = %op_name, "dropping filter: operator unsupported for column type");
                query
            }
        };
    }
    query
}

/// Apply sorting. An unresolved sort key yields no ordering; any order
/// other than `desc` means ascending.
pub fn apply_sorting<E: EntityTrait>(
    query: Select<E>,
    sort_by: Option<&str>,
    sort_order: Option<&str>,
) -> Select<E> {
    let Some(name) = sort_by else { return query };
    let Some(col) = resolve_column::<E>(name) else {
        debug!(column = %name, "ignoring sort: unknown column");
        return query;
    };
    let order = match sort_order {
        Some("desc") => Order::Desc,
        _ => Order::Asc,
    };
    query.order_by(col, order)
}

/// Compose filters and sorting onto a select. The legacy single-filter
/// convention is translated into the list form first: `like` for text
/// columns, `eq` for everything else (the original's behavior).
pub fn apply<E: EntityTrait>(query: Select<E>, params: &ListParams) -> Select<E> {
    let mut cols = params.filter_cols.clone();
    let mut ops = params.filter_ops.clone();
    let mut vals = params.filter_vals.clone();

    if cols.is_empty() {
        if let (Some(by), Some(value)) = (&params.filter_by, &params.filter_value) {
            let op = match resolve_column::<E>(by) {
                Some(col) if is_text(col.def().get_column_type()) => "like",
                _ => "eq",
            };
            cols = vec![by.clone()];
            ops = vec![op.to_string()];
            vals = vec![value.clone()];
        }
    }

    let query = apply_filters(query, &cols, &ops, &vals);
    let query = apply_sorting(query, params.sort_by.as_deref(), params.sort_order.as_deref());
    apply_pagination(query, params.page, params.per_page)
}

/// Page the result set. Absent parameters mean the full, unpaged list.
pub fn apply_pagination<E: EntityTrait>(
    query: Select<E>,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Select<E> {
    if page.is_none() && per_page.is_none() {
        return query;
    }
    let pagination = Pagination {
        page: page.unwrap_or_else(|| Pagination::default().page),
        per_page: per_page.unwrap_or_else(|| Pagination::default().per_page),
    };
    let (page_idx, per_page) = pagination.normalize();
    query.offset(page_idx * per_page).limit(per_page)
}
