use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::domain::{
    AccountId, Cents, Expense, ExpenseId, NewExpense, NewProduct, Product, ProductId,
};

use super::MIGRATION_001_INITIAL;

/// Credential row as stored, looked up by username at login.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub account_id: AccountId,
    pub secret: String,
}

/// Returns true when the error was raised by a UNIQUE or FOREIGN KEY constraint.
pub fn is_integrity_violation(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<sqlx::Error>() {
        Some(sqlx::Error::Database(db_err)) => {
            db_err.is_unique_violation() || db_err.is_foreign_key_violation()
        }
        _ => false,
    }
}

/// Repository for persisting and querying accounts, products and expenses.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given path.
    /// Creates the database file if it doesn't exist.
    pub async fn connect(database_path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", database_path))
            .context("Invalid database path")?
            .create_if_missing(true)
            .foreign_keys(true);

        Self::open(options).await
    }

    /// Open a private in-memory database. Everything is lost when the
    /// repository is dropped.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .context("Invalid in-memory database options")?
            .foreign_keys(true);

        Self::open(options).await
    }

    // One connection, never recycled: an in-memory database lives only as
    // long as its connection.
    async fn open(options: SqliteConnectOptions) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_path: &str) -> Result<Self> {
        let repo = Self::connect(database_path).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Account operations
    // ========================

    /// Insert a new account. Fails with a unique violation if the username is taken.
    pub async fn insert_account(&self, username: &str, secret: &str) -> Result<AccountId> {
        let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
            .bind(username)
            .bind(secret)
            .execute(&self.pool)
            .await
            .context("Failed to save account")?;
        Ok(result.last_insert_rowid())
    }

    /// Get the stored credential for a username (exact, case-sensitive match).
    pub async fn find_credential(&self, username: &str) -> Result<Option<StoredCredential>> {
        let row = sqlx::query("SELECT id, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch account")?;

        Ok(row.map(|row| StoredCredential {
            account_id: row.get("id"),
            secret: row.get("password"),
        }))
    }

    /// Check whether an account exists.
    pub async fn account_exists(&self, id: AccountId) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch account")?;
        Ok(row.is_some())
    }

    // ========================
    // Product operations
    // ========================

    /// Save a new product and return its generated ID.
    pub async fn insert_product(&self, product: &NewProduct) -> Result<ProductId> {
        let result =
            sqlx::query("INSERT INTO products (user_id, name, price_cents) VALUES (?, ?, ?)")
                .bind(product.owner_id)
                .bind(&product.name)
                .bind(product.price_cents)
                .execute(&self.pool)
                .await
                .context("Failed to save product")?;
        Ok(result.last_insert_rowid())
    }

    /// Get a product by ID.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query("SELECT id, user_id, name, price_cents FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch product")?;

        Ok(row.as_ref().map(Self::row_to_product))
    }

    /// Get the first product with this name owned by an account.
    pub async fn find_product_by_name(
        &self,
        owner_id: AccountId,
        name: &str,
    ) -> Result<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, price_cents
            FROM products
            WHERE user_id = ? AND name = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch product by name")?;

        Ok(row.as_ref().map(Self::row_to_product))
    }

    /// List an account's products in insertion order.
    pub async fn list_products(&self, owner_id: AccountId) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, price_cents
            FROM products
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list products")?;

        Ok(rows.iter().map(Self::row_to_product).collect())
    }

    /// Delete a product together with all of its expenses.
    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        // Expenses first, the foreign key still points at the product
        sqlx::query("DELETE FROM expenses WHERE product_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete product expenses")?;

        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete product")?;

        tx.commit().await.context("Failed to commit product deletion")?;
        Ok(())
    }

    fn row_to_product(row: &SqliteRow) -> Product {
        Product {
            id: row.get("id"),
            owner_id: row.get("user_id"),
            name: row.get("name"),
            price_cents: row.get("price_cents"),
        }
    }

    // ========================
    // Expense operations
    // ========================

    /// Save a new expense and return its generated ID.
    pub async fn insert_expense(&self, expense: &NewExpense) -> Result<ExpenseId> {
        let result =
            sqlx::query("INSERT INTO expenses (product_id, name, amount_cents) VALUES (?, ?, ?)")
                .bind(expense.product_id)
                .bind(&expense.name)
                .bind(expense.amount_cents)
                .execute(&self.pool)
                .await
                .context("Failed to save expense")?;
        Ok(result.last_insert_rowid())
    }

    /// List a product's expenses in insertion order.
    pub async fn list_expenses(&self, product_id: ProductId) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, product_id, name, amount_cents
            FROM expenses
            WHERE product_id = ?
            ORDER BY id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        Ok(rows
            .iter()
            .map(|row| Expense {
                id: row.get("id"),
                product_id: row.get("product_id"),
                name: row.get("name"),
                amount_cents: row.get("amount_cents"),
            })
            .collect())
    }

    /// Delete a single expense.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<()> {
        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete expense")?;
        Ok(())
    }

    /// Sum expense amounts for a product. A product without expenses sums to 0.
    pub async fn sum_expenses(&self, product_id: ProductId) -> Result<Cents> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0) as total
            FROM expenses
            WHERE product_id = ?
            "#,
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to sum expenses")?;

        Ok(row.get("total"))
    }
}
