//! Translation of query predicates into SQL conditions on the posts table.

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition as SqlCondition, Value};

use quill_core::error::RepoError;
use quill_core::query::{CmpOp, Condition, FieldValue, Predicate};

use super::entity::post::Column;

/// Build the `WHERE` clause for a predicate. The empty predicate yields an
/// empty condition, which matches every row.
pub(crate) fn post_condition(predicate: &Predicate) -> Result<SqlCondition, RepoError> {
    predicate
        .conditions()
        .iter()
        .try_fold(SqlCondition::all(), |all, condition| {
            Ok(all.add(translate(condition)?))
        })
}

fn translate(condition: &Condition) -> Result<SqlCondition, RepoError> {
    let field = condition.field();

    // Tags are a JSONB array: equality is containment, search runs over the
    // array's text form.
    if field == "tags" {
        return match condition {
            Condition::Contains { needle, .. } => {
                let search = Expr::cust_with_values(
                    r#"LOWER(CAST("tags" AS TEXT)) LIKE ?"#,
                    [like_pattern(needle)],
                );
                Ok(SqlCondition::all().add(search))
            }
            Condition::Compare {
                op: CmpOp::Eq,
                value,
                ..
            } => Ok(SqlCondition::all().add(tag_contains(value)?)),
            Condition::AnyOf { values, .. } => values
                .iter()
                .try_fold(SqlCondition::any(), |any, v| Ok(any.add(tag_contains(v)?))),
            Condition::Compare { .. } => Err(RepoError::Query(
                "Range comparison is not supported on tags".to_string(),
            )),
        };
    }

    let column = column_for(field)?;
    let expr = match condition {
        Condition::Contains { needle, .. } => Expr::expr(Func::lower(Expr::col(column)))
            .like(LikeExpr::new(like_pattern(needle)).escape('\\')),
        Condition::Compare { op, value, .. } => compare(column, *op, sql_value(value)),
        Condition::AnyOf { values, .. } => column.is_in(values.iter().map(sql_value)),
    };
    Ok(SqlCondition::all().add(expr))
}

fn column_for(field: &str) -> Result<Column, RepoError> {
    match field {
        "title" => Ok(Column::Title),
        "metaDescription" => Ok(Column::MetaDescription),
        "author" => Ok(Column::AuthorId),
        "category" => Ok(Column::CategoryId),
        "subCategory" => Ok(Column::SubCategoryId),
        "createdAt" => Ok(Column::CreatedAt),
        "updatedAt" => Ok(Column::UpdatedAt),
        other => Err(RepoError::Query(format!("Unknown post field '{other}'"))),
    }
}

fn compare(column: Column, op: CmpOp, value: Value) -> SimpleExpr {
    match op {
        CmpOp::Eq => column.eq(value),
        CmpOp::Gt => column.gt(value),
        CmpOp::Gte => column.gte(value),
        CmpOp::Lt => column.lt(value),
        CmpOp::Lte => column.lte(value),
    }
}

fn tag_contains(value: &FieldValue) -> Result<SimpleExpr, RepoError> {
    let FieldValue::Text(tag) = value else {
        return Err(RepoError::Query("Tags only hold text".to_string()));
    };
    let element = serde_json::json!([tag]).to_string();
    Ok(Expr::cust_with_values(r#""tags" @> CAST(? AS JSONB)"#, [element]))
}

fn sql_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(s) => s.clone().into(),
        FieldValue::Uuid(id) => (*id).into(),
        FieldValue::Timestamp(ts) => (*ts).into(),
        FieldValue::Number(n) => (*n).into(),
    }
}

/// `%needle%`, lowercased, with LIKE wildcards escaped.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
