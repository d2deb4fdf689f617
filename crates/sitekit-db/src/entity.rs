use sqlx::FromRow;
use sqlx::postgres::PgRow;

/// A row type stored in one table.
///
/// `COLUMNS` lists every column the repository may read, filter, order, or
/// write, `id` included. Names outside this list are rejected before any SQL
/// is built, so the list doubles as the identifier allow-list.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Column set to `NOW()` by every update that changes something.
    const TOUCH_ON_UPDATE: Option<&'static str> = None;

    fn id(&self) -> i64;

    fn has_column(name: &str) -> bool {
        Self::COLUMNS.contains(&name)
    }
}
