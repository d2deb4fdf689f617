use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("unknown column `{column}` on table `{table}`")]
    UnknownColumn { table: &'static str, column: String },

    #[error("duplicate value violates unique constraint `{constraint}`")]
    UniqueViolation { constraint: String },

    #[error("row not found in `{table}`")]
    NotFound { table: &'static str },

    #[error(transparent)]
    Database(sqlx::Error),
}

impl RepoError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, RepoError::UniqueViolation { .. })
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return RepoError::UniqueViolation {
                    constraint: db_err.constraint().unwrap_or_default().to_string(),
                };
            }
        }
        RepoError::Database(e)
    }
}
