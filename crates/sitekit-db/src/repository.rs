//! Generic CRUD over one table.
//!
//! Every operation is a single auto-committing statement. SQL is assembled
//! with [`QueryBuilder`]: identifiers come from [`Entity::COLUMNS`] only and
//! every value is a bound parameter.

use std::marker::PhantomData;

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, instrument};

use crate::{
    entity::Entity,
    error::RepoError,
    order::OrderBy,
    value::{Fields, Value},
};

pub struct Repository<E>(PhantomData<E>);

impl<E: Entity> Repository<E> {
    /// Number of rows matching every equality in `filter`.
    #[instrument(skip_all, fields(db.table = E::TABLE, db.operation = "count"))]
    pub async fn count(db: &PgPool, filter: &Fields) -> Result<i64, RepoError> {
        let mut qb = count_query::<E>(filter)?;
        let total = qb.build_query_scalar::<i64>().fetch_one(db).await?;

        debug!(total, "Counted rows");
        Ok(total)
    }

    /// First row (lowest id) matching every equality in `filter`.
    #[instrument(skip_all, fields(db.table = E::TABLE, db.operation = "select"))]
    pub async fn get_by_params(db: &PgPool, filter: &Fields) -> Result<Option<E>, RepoError> {
        let mut qb = select_query::<E>(filter, &[], Some(1), 0)?;
        let row = qb.build_query_as::<E>().fetch_optional(db).await?;
        Ok(row)
    }

    pub async fn get_by_id(db: &PgPool, id: i64) -> Result<Option<E>, RepoError> {
        Self::get_by_params(db, &Fields::new().set("id", id)).await
    }

    /// One page of rows. `limit: None` returns every matching row.
    #[instrument(skip_all, fields(db.table = E::TABLE, db.operation = "select", limit = ?limit, offset = offset))]
    pub async fn get_all(
        db: &PgPool,
        filter: &Fields,
        order_by: &[OrderBy],
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Vec<E>, RepoError> {
        let mut qb = select_query::<E>(filter, order_by, limit, offset)?;
        let rows = qb.build_query_as::<E>().fetch_all(db).await?;

        debug!(rows = rows.len(), "Fetched rows");
        Ok(rows)
    }

    /// Inserts a row from `fields`; columns left out take their database default.
    #[instrument(skip_all, fields(db.table = E::TABLE, db.operation = "insert"))]
    pub async fn create(db: &PgPool, fields: &Fields) -> Result<E, RepoError> {
        let mut qb = insert_query::<E>(fields)?;
        let row = qb.build_query_as::<E>().fetch_one(db).await?;

        debug!(id = row.id(), "Inserted row");
        Ok(row)
    }

    /// Writes the known columns present in `fields` onto `existing`.
    ///
    /// Keys that are not columns of `E`, and `id`, are ignored. When nothing
    /// is left to write the current row is returned unchanged.
    #[instrument(skip_all, fields(db.table = E::TABLE, db.operation = "update", id = existing.id()))]
    pub async fn update(db: &PgPool, existing: &E, fields: &Fields) -> Result<E, RepoError> {
        let row = match update_query::<E>(existing.id(), fields) {
            Some(mut qb) => qb.build_query_as::<E>().fetch_optional(db).await?,
            None => Self::get_by_id(db, existing.id()).await?,
        };

        row.ok_or(RepoError::NotFound { table: E::TABLE })
    }

    /// Removes `existing` and hands back the row as it was deleted.
    #[instrument(skip_all, fields(db.table = E::TABLE, db.operation = "delete", id = existing.id()))]
    pub async fn delete(db: &PgPool, existing: E) -> Result<E, RepoError> {
        let mut qb = delete_query::<E>(existing.id());
        let row = qb.build_query_as::<E>().fetch_optional(db).await?;

        debug!(deleted = row.is_some(), "Deleted row");
        row.ok_or(RepoError::NotFound { table: E::TABLE })
    }

    /// Whether any row other than `exclude_id` matches `filter`.
    #[instrument(skip_all, fields(db.table = E::TABLE, db.operation = "select"))]
    pub async fn exists(
        db: &PgPool,
        filter: &Fields,
        exclude_id: Option<i64>,
    ) -> Result<bool, RepoError> {
        let mut qb = exists_query::<E>(filter, exclude_id)?;
        let found = qb.build_query_scalar::<bool>().fetch_one(db).await?;
        Ok(found)
    }
}

fn quote(ident: &str) -> String {
    format!("\"{ident}\"")
}

fn check_column<E: Entity>(column: &str) -> Result<(), RepoError> {
    if E::has_column(column) {
        Ok(())
    } else {
        Err(RepoError::UnknownColumn {
            table: E::TABLE,
            column: column.to_string(),
        })
    }
}

fn push_value(qb: &mut QueryBuilder<'static, Postgres>, value: &Value) {
    match value.clone() {
        Value::Int(v) => qb.push_bind(v),
        Value::Bool(v) => qb.push_bind(v),
        Value::Text(v) => qb.push_bind(v),
        Value::Timestamp(v) => qb.push_bind(v),
    };
}

/// Appends `WHERE a = $1 AND b IS NULL ...`; returns how many conditions were written.
fn push_conditions<E: Entity>(
    qb: &mut QueryBuilder<'static, Postgres>,
    filter: &Fields,
) -> Result<usize, RepoError> {
    let mut written = 0;
    for (column, value) in filter.iter() {
        check_column::<E>(column)?;
        qb.push(if written == 0 { " WHERE " } else { " AND " });
        qb.push(quote(column));
        if value.is_null() {
            qb.push(" IS NULL");
        } else {
            qb.push(" = ");
            push_value(qb, value);
        }
        written += 1;
    }
    Ok(written)
}

fn count_query<E: Entity>(filter: &Fields) -> Result<QueryBuilder<'static, Postgres>, RepoError> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", quote(E::TABLE)));
    push_conditions::<E>(&mut qb, filter)?;
    Ok(qb)
}

fn select_query<E: Entity>(
    filter: &Fields,
    order_by: &[OrderBy],
    limit: Option<i64>,
    offset: i64,
) -> Result<QueryBuilder<'static, Postgres>, RepoError> {
    let mut qb = QueryBuilder::new(format!("SELECT * FROM {}", quote(E::TABLE)));
    push_conditions::<E>(&mut qb, filter)?;

    let mut clauses = Vec::with_capacity(order_by.len() + 1);
    for order in order_by {
        check_column::<E>(&order.column)?;
        let direction = if order.descending { "DESC" } else { "ASC" };
        clauses.push(format!("{} {direction}", quote(&order.column)));
    }
    // id breaks ties so pages never overlap
    if !order_by.iter().any(|order| order.column == "id") {
        clauses.push(format!("{} ASC", quote("id")));
    }
    qb.push(" ORDER BY ");
    qb.push(clauses.join(", "));

    if let Some(limit) = limit {
        qb.push(" LIMIT ");
        qb.push_bind(limit.max(0));
    }
    if offset > 0 {
        qb.push(" OFFSET ");
        qb.push_bind(offset);
    }
    Ok(qb)
}

fn insert_query<E: Entity>(fields: &Fields) -> Result<QueryBuilder<'static, Postgres>, RepoError> {
    if fields.is_empty() {
        return Ok(QueryBuilder::new(format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING *",
            quote(E::TABLE)
        )));
    }

    let mut columns = Vec::with_capacity(fields.len());
    for (column, _) in fields.iter() {
        check_column::<E>(column)?;
        columns.push(quote(column));
    }

    let mut qb = QueryBuilder::new(format!(
        "INSERT INTO {} ({}) VALUES (",
        quote(E::TABLE),
        columns.join(", ")
    ));
    for (i, (_, value)) in fields.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        push_value(&mut qb, value);
    }
    qb.push(") RETURNING *");
    Ok(qb)
}

fn update_query<E: Entity>(id: i64, fields: &Fields) -> Option<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", quote(E::TABLE)));
    let mut assignments = 0;
    for (column, value) in fields.iter() {
        if column == "id" || !E::has_column(column) {
            continue;
        }
        if assignments > 0 {
            qb.push(", ");
        }
        qb.push(quote(column));
        qb.push(" = ");
        push_value(&mut qb, value);
        assignments += 1;
    }

    if assignments == 0 {
        return None;
    }

    if let Some(touch) = E::TOUCH_ON_UPDATE {
        if !fields.contains(touch) {
            qb.push(format!(", {} = NOW()", quote(touch)));
        }
    }
    qb.push(" WHERE \"id\" = ");
    qb.push_bind(id);
    qb.push(" RETURNING *");
    Some(qb)
}

fn delete_query<E: Entity>(id: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("DELETE FROM {} WHERE \"id\" = ", quote(E::TABLE)));
    qb.push_bind(id);
    qb.push(" RETURNING *");
    qb
}

fn exists_query<E: Entity>(
    filter: &Fields,
    exclude_id: Option<i64>,
) -> Result<QueryBuilder<'static, Postgres>, RepoError> {
    let mut qb = QueryBuilder::new(format!("SELECT EXISTS (SELECT 1 FROM {}", quote(E::TABLE)));
    let written = push_conditions::<E>(&mut qb, filter)?;
    if let Some(id) = exclude_id {
        qb.push(if written == 0 { " WHERE " } else { " AND " });
        qb.push("\"id\" <> ");
        qb.push_bind(id);
    }
    qb.push(")");
    Ok(qb)
}
