use super::{Constraints, QueryError, QueryResult};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::Value;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// SQL text with positional `?` placeholders and the values to bind.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    sql: String,
    params: Vec<Value>,
}

impl BuiltQuery {
    fn new(sql: String, params: Vec<Value>) -> QueryResult<Self> {
        // Identifiers are validated, so every `?` in the text is a placeholder.
        let placeholders = sql.matches('?').count();
        if placeholders != params.len() {
            return Err(QueryError::PlaceholderMismatch {
                placeholders,
                params: params.len(),
            });
        }
        Ok(Self { sql, params })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

/// `SELECT * FROM <table>`
pub fn select_all(table: &str) -> QueryResult<BuiltQuery> {
    let table = identifier(table)?;
    BuiltQuery::new(format!("SELECT * FROM {table}"), Vec::new())
}

/// `SELECT * FROM <table> WHERE c1 = ? AND c2 = ? ...`
pub fn select_where(table: &str, constraints: &Constraints) -> QueryResult<BuiltQuery> {
    let table = identifier(table)?;
    let (clause, params) = predicate("select_where", constraints)?;
    BuiltQuery::new(format!("SELECT * FROM {table} WHERE {clause}"), params)
}

/// `DELETE FROM <table> WHERE c1 = ? AND c2 = ? ...`
pub fn delete_where(table: &str, constraints: &Constraints) -> QueryResult<BuiltQuery> {
    let table = identifier(table)?;
    let (clause, params) = predicate("delete_where", constraints)?;
    BuiltQuery::new(format!("DELETE FROM {table} WHERE {clause}"), params)
}

/// `DELETE FROM <table>`
pub fn delete_all(table: &str) -> QueryResult<BuiltQuery> {
    let table = identifier(table)?;
    BuiltQuery::new(format!("DELETE FROM {table}"), Vec::new())
}

/// `UPDATE <table> SET c1 = ?, c2 = ? WHERE id = ?`
///
/// The row id is bound last, after every changed value.
pub fn update_by_id(table: &str, id: i64, changes: &Constraints) -> QueryResult<BuiltQuery> {
    let table = identifier(table)?;
    if changes.is_empty() {
        return Err(QueryError::EmptyConstraints {
            operation: "update_row",
        });
    }

    let mut assignments = Vec::with_capacity(changes.len());
    let mut params = Vec::with_capacity(changes.len() + 1);
    for (column, value) in changes.iter() {
        assignments.push(format!("{} = ?", identifier(column)?));
        params.push(value.clone());
    }
    params.push(Value::Integer(id));

    BuiltQuery::new(
        format!("UPDATE {table} SET {} WHERE id = ?", assignments.join(", ")),
        params,
    )
}

fn predicate(
    operation: &'static str,
    constraints: &Constraints,
) -> QueryResult<(String, Vec<Value>)> {
    if constraints.is_empty() {
        return Err(QueryError::EmptyConstraints { operation });
    }

    let mut clauses = Vec::with_capacity(constraints.len());
    let mut params = Vec::with_capacity(constraints.len());
    for (column, value) in constraints.iter() {
        clauses.push(format!("{} = ?", identifier(column)?));
        params.push(value.clone());
    }

    Ok((clauses.join(" AND "), params))
}

fn identifier(name: &str) -> QueryResult<&str> {
    if IDENTIFIER_RE.is_match(name) {
        Ok(name)
    } else {
        Err(QueryError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{delete_all, delete_where, select_all, select_where, update_by_id};
    use crate::query::{Constraints, QueryError};
    use rusqlite::types::Value;

    fn text(value: &str) -> Value {
        Value::Text(value.to_string())
    }

    #[test]
    fn select_where_joins_clauses_with_and_in_mapping_order() {
        let constraints = Constraints::new()
            .with_text("status", "todo")
            .with("project_id", 2_i64);
        let query = select_where("tasks", &constraints).unwrap();

        assert_eq!(
            query.sql(),
            "SELECT * FROM tasks WHERE status = ? AND project_id = ?"
        );
        assert_eq!(query.params(), &[text("todo"), Value::Integer(2)]);
    }

    #[test]
    fn update_binds_row_id_after_changes() {
        let changes = Constraints::new()
            .with_text("status", "done")
            .with_text("end_date", "2024-03-06 11:00");
        let query = update_by_id("tasks", 9, &changes).unwrap();

        assert_eq!(
            query.sql(),
            "UPDATE tasks SET status = ?, end_date = ? WHERE id = ?"
        );
        assert_eq!(
            query.params(),
            &[text("done"), text("2024-03-06 11:00"), Value::Integer(9)]
        );
    }

    #[test]
    fn placeholder_count_matches_params_for_every_builder() {
        let constraints = Constraints::new()
            .with_text("a", "1")
            .with_text("b", "2")
            .with_text("c", "3");
        let queries = vec![
            select_all("projects").unwrap(),
            select_where("projects", &constraints).unwrap(),
            delete_where("projects", &constraints).unwrap(),
            delete_all("projects").unwrap(),
            update_by_id("projects", 1, &constraints).unwrap(),
        ];

        for query in queries {
            assert_eq!(query.sql().matches('?').count(), query.params().len());
        }
    }

    #[test]
    fn empty_mappings_are_rejected() {
        let empty = Constraints::new();
        assert_eq!(
            select_where("tasks", &empty).unwrap_err(),
            QueryError::EmptyConstraints {
                operation: "select_where"
            }
        );
        assert_eq!(
            delete_where("tasks", &empty).unwrap_err(),
            QueryError::EmptyConstraints {
                operation: "delete_where"
            }
        );
        assert_eq!(
            update_by_id("tasks", 1, &empty).unwrap_err(),
            QueryError::EmptyConstraints {
                operation: "update_row"
            }
        );
    }

    #[test]
    fn identifiers_outside_allow_list_are_rejected() {
        let err = select_all("tasks; DROP TABLE projects").unwrap_err();
        assert!(matches!(err, QueryError::InvalidIdentifier(_)));

        let constraints = Constraints::new().with_text("status = 'x' OR 1", "todo");
        let err = delete_where("tasks", &constraints).unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidIdentifier("status = 'x' OR 1".to_string())
        );
    }

    #[test]
    fn values_are_never_spliced_into_sql() {
        let constraints = Constraints::new().with_text("name", "x' OR '1'='1");
        let query = select_where("projects", &constraints).unwrap();
        assert!(!query.sql().contains("OR"));
        assert_eq!(query.params(), &[text("x' OR '1'='1")]);
    }
}
