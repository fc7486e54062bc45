use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Meal plan not found")]
    NotFound,

    #[error("Meal plan for date {date} already exists")]
    DuplicateKey { date: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Unavailable(other),
        }
    }
}

impl StoreError {
    /// Map a write error, turning a unique-index rejection on `date` into
    /// [`StoreError::DuplicateKey`].
    pub fn from_write(err: sqlx::Error, date: &str) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            if db.is_unique_violation() {
                return StoreError::DuplicateKey { date: date.to_string() };
            }
        }
        err.into()
    }
}
