use rusqlite::types::Value;

/// Insertion-ordered column→value mapping.
///
/// Used both as an AND-ed equality predicate and as an update change set.
/// Re-inserting a column replaces its value but keeps its first position, so
/// the generated SQL stays deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    entries: Vec<(String, Value)>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Constraints::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Builder-style insert of a text value.
    pub fn with_text(self, column: impl Into<String>, value: &str) -> Self {
        self.with(column, value.to_string())
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(column, value)| (column.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Constraints {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut constraints = Self::new();
        for (column, value) in iter {
            constraints.insert(column, value);
        }
        constraints
    }
}

#[cfg(test)]
mod tests {
    use super::Constraints;
    use rusqlite::types::Value;

    #[test]
    fn keeps_insertion_order() {
        let constraints = Constraints::new()
            .with_text("status", "todo")
            .with("project_id", 3_i64)
            .with_text("name", "Warmup");
        let columns: Vec<&str> = constraints.iter().map(|(column, _)| column).collect();
        assert_eq!(columns, vec!["status", "project_id", "name"]);
    }

    #[test]
    fn reinsert_replaces_value_in_place() {
        let mut constraints = Constraints::new()
            .with_text("status", "todo")
            .with_text("name", "Warmup");
        constraints.insert("status", "done".to_string());

        let entries: Vec<(&str, &Value)> = constraints.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ("status", &Value::Text("done".to_string())));
        assert_eq!(entries[1].0, "name");
    }
}
