//! Generic CRUD helpers addressed by table name.
//!
//! # Invariants
//! - `table` and constraint column names must be internal constants. They
//!   are checked against the identifier pattern in [`crate::query`], never
//!   quoted or escaped.
//! - `update_row`, `delete_where` and `delete_all` report the number of
//!   affected rows; zero means nothing matched.

use crate::query::{self, BuiltQuery, Constraints};
use crate::repo::RepoResult;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// One row read through the generic helpers, columns in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericRow {
    columns: Vec<(String, Value)>,
}

impl GenericRow {
    /// Value of `column`, if the row has it.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }
}

/// Returns every row of `table` in store order.
pub fn select_all(conn: &Connection, table: &str) -> RepoResult<Vec<GenericRow>> {
    fetch_rows(conn, &query::select_all(table)?)
}

/// Returns rows of `table` where every constraint column equals its value.
pub fn select_where(
    conn: &Connection,
    table: &str,
    constraints: &Constraints,
) -> RepoResult<Vec<GenericRow>> {
    fetch_rows(conn, &query::select_where(table, constraints)?)
}

/// Applies `changes` to the row with `id`.
///
/// Returns the affected row count; `0` when no row has that id.
pub fn update_row(
    conn: &Connection,
    table: &str,
    id: i64,
    changes: &Constraints,
) -> RepoResult<usize> {
    let changed = execute(conn, &query::update_by_id(table, id, changes)?)?;
    debug!(
        "event=row_update module=repo status=ok table={} columns={} rows={}",
        table,
        changes.len(),
        changed
    );
    Ok(changed)
}

/// Deletes rows matching all constraints. Returns the deleted row count.
pub fn delete_where(
    conn: &Connection,
    table: &str,
    constraints: &Constraints,
) -> RepoResult<usize> {
    let deleted = execute(conn, &query::delete_where(table, constraints)?)?;
    debug!(
        "event=row_delete module=repo status=ok table={} rows={}",
        table, deleted
    );
    Ok(deleted)
}

/// Deletes every row of `table`. Irreversible.
pub fn delete_all(conn: &Connection, table: &str) -> RepoResult<usize> {
    let deleted = execute(conn, &query::delete_all(table)?)?;
    debug!(
        "event=table_clear module=repo status=ok table={} rows={}",
        table, deleted
    );
    Ok(deleted)
}

fn execute(conn: &Connection, query: &BuiltQuery) -> RepoResult<usize> {
    let changed = conn.execute(query.sql(), params_from_iter(query.params()))?;
    Ok(changed)
}

fn fetch_rows(conn: &Connection, query: &BuiltQuery) -> RepoResult<Vec<GenericRow>> {
    let mut stmt = conn.prepare(query.sql())?;
    let names: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt.query(params_from_iter(query.params()))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut columns = Vec::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            columns.push((name.clone(), row.get::<_, Value>(index)?));
        }
        out.push(GenericRow { columns });
    }

    Ok(out)
}
