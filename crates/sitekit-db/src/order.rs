use crate::{entity::Entity, error::RepoError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            descending: false,
        }
    }

    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            descending: true,
        }
    }

    /// `"-created_at"` sorts descending, `"email"` ascending.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().strip_prefix('-') {
            Some(column) => Self::desc(column.trim()),
            None => Self::asc(raw.trim().trim_start_matches('+')),
        }
    }

    /// Parses user-supplied ordering, rejecting columns `E` does not have.
    pub fn parse_list<E: Entity>(raw: &[&str]) -> Result<Vec<Self>, RepoError> {
        raw.iter()
            .map(|item| {
                let order = Self::parse(item);
                if E::has_column(&order.column) {
                    Ok(order)
                } else {
                    Err(RepoError::UnknownColumn {
                        table: E::TABLE,
                        column: order.column,
                    })
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!(OrderBy::parse("-created_at"), OrderBy::desc("created_at"));
        assert_eq!(OrderBy::parse("email"), OrderBy::asc("email"));
        assert_eq!(OrderBy::parse(" +id "), OrderBy::asc("id"));
    }
}
