//! Query fragments shared by the SeaORM repositories.
use sea_orm::{
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
    ColumnTrait, EntityTrait, Order, QueryOrder, Select,
};

use crate::errors::ServiceError;
use crate::pagination::{SortDirection, SortKey};

impl From<SortDirection> for Order {
    fn from(d: SortDirection) -> Self {
        match d {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Apply client sort keys in order, then `tie_breaker` ascending so pages are stable.
pub(crate) fn sorted<E: EntityTrait>(
    mut select: Select<E>,
    keys: &[SortKey],
    resolve: fn(&str) -> Option<E::Column>,
    tie_breaker: E::Column,
) -> Result<Select<E>, ServiceError> {
    for key in keys {
        let column = resolve(&key.property)
            .ok_or_else(|| ServiceError::Validation(format!("cannot sort by '{}'", key.property)))?;
        select = select.order_by(column, key.direction.into());
    }
    Ok(select.order_by_asc(tie_breaker))
}

/// Case-insensitive "contains" match on a text column; wildcard characters in
/// `fragment` match literally.
pub(crate) fn name_contains<C: ColumnTrait + 'static>(column: C, fragment: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&fragment.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
