use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use shared::Expense;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tokio::sync::OnceCell;
use tracing::info;

use crate::error::Result;

/// DbConnection manages the expense store.
///
/// The pool is lazy: building it never touches the database, so the service
/// can start while the store is unreachable. The schema is prepared on first
/// successful use and every operation goes through [`DbConnection::ensure_schema`].
#[derive(Clone)]
pub struct DbConnection {
    pool: SqlitePool,
    schema_ready: Arc<OnceCell<()>>,
}

impl DbConnection {
    /// Create a lazily connecting pool for the given database URL.
    /// Only a malformed URL fails here.
    pub fn connect_lazy(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy_with(options);

        Ok(Self::from_pool(pool))
    }

    /// Initialize an isolated in-memory test database
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // a single long-lived connection keeps the in-memory database alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self::from_pool(pool);
        db.ensure_schema().await?;
        Ok(db)
    }

    fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            schema_ready: Arc::new(OnceCell::new()),
        }
    }

    /// Prepare the schema once. A failed attempt leaves the cell empty so the
    /// next caller tries again.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.schema_ready
            .get_or_try_init(|| Self::setup_schema(&self.pool))
            .await?;
        Ok(())
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                month TEXT NOT NULL,
                category TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                description TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_expenses_user_month ON expenses (user_id, month);")
            .execute(pool)
            .await?;

        info!("Expense schema ready");
        Ok(())
    }

    /// Store a new expense record
    pub async fn insert_expense(&self, expense: &Expense) -> Result<()> {
        self.ensure_schema().await?;

        sqlx::query(
            "INSERT INTO expenses (id, user_id, month, category, amount, date, description) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&expense.id)
        .bind(&expense.user_id)
        .bind(&expense.month)
        .bind(&expense.category)
        .bind(expense.amount)
        .bind(expense.date.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .bind(&expense.description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All expenses for a user and month, in storage order (no explicit sort)
    pub async fn find_expenses(&self, user_id: &str, month: &str) -> Result<Vec<Expense>> {
        self.ensure_schema().await?;

        let rows = sqlx::query(
            "SELECT id, user_id, month, category, amount, date, description FROM expenses WHERE user_id = ? AND month = ?",
        )
        .bind(user_id)
        .bind(month)
        .fetch_all(&self.pool)
        .await?;

        let expenses = rows
            .iter()
            .map(row_to_expense)
            .collect::<std::result::Result<Vec<_>, sqlx::Error>>()?;
        Ok(expenses)
    }
}

fn row_to_expense(row: &SqliteRow) -> std::result::Result<Expense, sqlx::Error> {
    let date: String = row.try_get("date")?;
    let date = DateTime::parse_from_rfc3339(&date)
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
        .with_timezone(&Utc);

    Ok(Expense {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        month: row.try_get("month")?,
        category: row.try_get("category")?,
        amount: row.try_get("amount")?,
        date,
        description: row.try_get("description")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpenseError;
    use chrono::TimeZone;

    async fn setup_test() -> DbConnection {
        DbConnection::init_test().await.expect("Failed to create test database")
    }

    fn expense(id: &str, user_id: &str, month: &str, amount: f64) -> Expense {
        Expense {
            id: id.to_string(),
            user_id: user_id.to_string(),
            month: month.to_string(),
            category: "Food".to_string(),
            amount,
            date: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_expense() {
        let db = setup_test().await;

        let mut stored = expense("e1", "u1", "2024-01", 50.0);
        stored.description = Some("lunch".to_string());
        stored.date = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(123);
        db.insert_expense(&stored).await.expect("Failed to insert expense");

        let found = db.find_expenses("u1", "2024-01").await.expect("Failed to query");
        assert_eq!(found, vec![stored]);
    }

    #[tokio::test]
    async fn test_find_with_no_matches_is_empty() {
        let db = setup_test().await;

        let found = db.find_expenses("nobody", "1999-12").await.expect("Query failed");
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_find_filters_on_user_and_month() {
        let db = setup_test().await;

        for e in [
            expense("a", "u1", "2024-01", 10.0),
            expense("b", "u1", "2024-02", 20.0),
            expense("c", "u2", "2024-01", 30.0),
            expense("d", "u1", "2024-01", 40.0),
        ] {
            db.insert_expense(&e).await.expect("Failed to insert expense");
        }

        let found = db.find_expenses("u1", "2024-01").await.expect("Query failed");
        let ids: Vec<&str> = found.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"a"));
        assert!(ids.contains(&"d"));
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let db = setup_test().await;

        db.insert_expense(&expense("same", "u1", "2024-01", 1.0)).await.unwrap();
        let err = db.insert_expense(&expense("same", "u1", "2024-01", 2.0)).await.unwrap_err();
        assert!(matches!(err, ExpenseError::StorageUnavailable(_)));

        let found = db.find_expenses("u1", "2024-01").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, 1.0);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_per_operation() {
        let db = DbConnection::connect_lazy("sqlite:/nonexistent-expense-tracker/dir/expenses.db")
            .expect("Lazy pool should build without touching the store");

        let err = db.find_expenses("u1", "2024-01").await.unwrap_err();
        assert!(matches!(err, ExpenseError::StorageUnavailable(_)));

        // nothing is cached after a failure; the next call tries again
        let err = db.insert_expense(&expense("x", "u1", "2024-01", 5.0)).await.unwrap_err();
        assert!(matches!(err, ExpenseError::StorageUnavailable(_)));
    }
}
