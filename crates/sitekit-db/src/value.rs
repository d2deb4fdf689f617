use chrono::{DateTime, Utc};

/// A nullable SQL scalar with its column type.
///
/// The type tag is kept for `NULL` as well so the bound parameter matches the
/// column type on the Postgres side.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(Option<i64>),
    Bool(Option<bool>),
    Text(Option<String>),
    Timestamp(Option<DateTime<Utc>>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Int(v) => v.is_none(),
            Value::Bool(v) => v.is_none(),
            Value::Text(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(Some(s)) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(Some(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(Some(v.into()))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(Some(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Some(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Some(v.to_string()))
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(Some(v.clone()))
    }
}

impl From<Option<String>> for Value {
    fn from(v: Option<String>) -> Self {
        Value::Text(v)
    }
}

impl From<Option<&str>> for Value {
    fn from(v: Option<&str>) -> Self {
        Value::Text(v.map(str::to_string))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(Some(v))
    }
}

/// Ordered column→value map, used both as an equality filter and as the set
/// of columns to write.
///
/// Setting a column twice keeps the position of the first write and the
/// value of the last one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(&'static str, Value)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &'static str, value: impl Into<Value>) {
        let value = value.into();
        match self.0.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.0.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        let index = self.0.iter().position(|(name, _)| *name == column)?;
        Some(self.0.remove(index).1)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let fields = Fields::new()
            .set("email", "a@example.com")
            .set("is_active", true)
            .set("email", "b@example.com");

        let columns: Vec<_> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(columns, vec!["email", "is_active"]);
        assert_eq!(fields.get("email").and_then(Value::as_str), Some("b@example.com"));
    }

    #[test]
    fn test_remove() {
        let mut fields = Fields::new().set("password", "hunter22").set("email", "a@example.com");

        assert_eq!(fields.remove("password"), Some(Value::Text(Some("hunter22".into()))));
        assert!(!fields.contains("password"));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.remove("password"), None);
    }

    #[test]
    fn test_null_detection() {
        assert!(Value::from(None::<String>).is_null());
        assert!(Value::Int(None).is_null());
        assert!(!Value::from(0_i64).is_null());
    }
}
