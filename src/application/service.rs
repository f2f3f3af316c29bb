use tracing::{debug, info, warn};

use crate::domain::{
    AccountId, Cents, Expense, ExpenseId, NewAccount, NewExpense, NewProduct, Product,
    ProductId, ProductReport, ProfitSimulation, SimulationError, add_to_total, select,
};
use crate::storage::{Repository, is_integrity_violation};

use super::{AppError, CredentialVerifier, TrackerConfig};

/// Application service providing the tracker's operations.
/// This is the primary interface for any client (menu, subcommands, tests).
pub struct TrackerService {
    repo: Repository,
    config: TrackerConfig,
    credentials: Box<dyn CredentialVerifier>,
}

impl TrackerService {
    /// Create a new service over an already migrated repository.
    pub fn new(repo: Repository, config: TrackerConfig) -> Self {
        let credentials = config.password_scheme.verifier();
        Self {
            repo,
            config,
            credentials,
        }
    }

    /// Open (or create) the database at the given path and ensure the schema exists.
    pub async fn open(database_path: &str, config: TrackerConfig) -> Result<Self, AppError> {
        let repo = Repository::init(database_path).await?;
        debug!(database = database_path, "database ready");
        Ok(Self::new(repo, config))
    }

    /// Service backed by a private in-memory database.
    pub async fn in_memory(config: TrackerConfig) -> Result<Self, AppError> {
        let repo = Repository::in_memory().await?;
        repo.migrate().await?;
        Ok(Self::new(repo, config))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    // ========================
    // Account operations
    // ========================

    /// Register a new account. A taken username leaves the store untouched.
    pub async fn register(&self, username: &str, password: &str) -> Result<AccountId, AppError> {
        let account = NewAccount::new(username)?;
        let secret = self.credentials.seal(password)?;

        match self.repo.insert_account(&account.username, &secret).await {
            Ok(id) => {
                info!(account_id = id, username = %account.username, "account registered");
                Ok(id)
            }
            Err(err) if is_integrity_violation(&err) => {
                Err(AppError::DuplicateUsername(account.username))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Check credentials. Returns the account ID when they match.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountId>, AppError> {
        let stored = self.repo.find_credential(username).await?;

        match stored {
            Some(cred) if self.credentials.verify(password, &cred.secret) => {
                info!(account_id = cred.account_id, "login succeeded");
                Ok(Some(cred.account_id))
            }
            _ => {
                warn!(username, "login failed");
                Ok(None)
            }
        }
    }

    // ========================
    // Product operations
    // ========================

    /// Add a product to an account's catalog.
    pub async fn add_product(
        &self,
        owner_id: AccountId,
        name: &str,
        price_cents: Cents,
    ) -> Result<ProductId, AppError> {
        let product = NewProduct::new(owner_id, name, price_cents)?;

        if !self.repo.account_exists(owner_id).await? {
            return Err(AppError::AccountNotFound(owner_id));
        }

        let id = self.repo.insert_product(&product).await?;
        info!(product_id = id, owner_id, name = %product.name, "product added");
        Ok(id)
    }

    /// List an account's products in the order they were added.
    pub async fn list_products(&self, owner_id: AccountId) -> Result<Vec<Product>, AppError> {
        Ok(self.repo.list_products(owner_id).await?)
    }

    /// Get a product by ID.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, AppError> {
        self.repo
            .get_product(id)
            .await?
            .ok_or(AppError::ProductNotFound(id))
    }

    /// Get one of an account's products by name.
    pub async fn find_product(&self, owner_id: AccountId, name: &str) -> Result<Product, AppError> {
        self.repo
            .find_product_by_name(owner_id, name.trim())
            .await?
            .ok_or_else(|| AppError::InvalidSelection(name.to_string()))
    }

    /// Resolve a 1-based position in the account's product list.
    pub async fn select_product(
        &self,
        owner_id: AccountId,
        selection: &str,
    ) -> Result<Product, AppError> {
        let products = self.repo.list_products(owner_id).await?;
        select(&products, selection)
            .cloned()
            .ok_or_else(|| AppError::InvalidSelection(selection.trim().to_string()))
    }

    /// Remove the product at a 1-based position in the account's product list,
    /// along with all of its expenses.
    pub async fn remove_product(
        &self,
        owner_id: AccountId,
        selection: &str,
    ) -> Result<Product, AppError> {
        let product = self.select_product(owner_id, selection).await?;
        self.repo.delete_product(product.id).await?;
        info!(product_id = product.id, owner_id, "product removed");
        Ok(product)
    }

    // ========================
    // Expense operations
    // ========================

    /// Record an expense against a product.
    pub async fn add_expense(
        &self,
        product_id: ProductId,
        name: &str,
        amount_cents: Cents,
    ) -> Result<ExpenseId, AppError> {
        let expense = NewExpense::new(product_id, name, amount_cents)?;

        if self.repo.get_product(product_id).await?.is_none() {
            return Err(AppError::ProductNotFound(product_id));
        }

        let total = self.repo.sum_expenses(product_id).await?;
        add_to_total("Expense total", total, expense.amount_cents)?;

        let id = self.repo.insert_expense(&expense).await?;
        info!(expense_id = id, product_id, name = %expense.name, "expense added");
        Ok(id)
    }

    /// List a product's expenses in the order they were added.
    pub async fn list_expenses(&self, product_id: ProductId) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_expenses(product_id).await?)
    }

    /// Remove the expense at a 1-based position in the product's expense list.
    pub async fn remove_expense(
        &self,
        product_id: ProductId,
        selection: &str,
    ) -> Result<Expense, AppError> {
        let expenses = self.repo.list_expenses(product_id).await?;
        let expense = select(&expenses, selection)
            .cloned()
            .ok_or_else(|| AppError::InvalidSelection(selection.trim().to_string()))?;

        self.repo.delete_expense(expense.id).await?;
        info!(expense_id = expense.id, product_id, "expense removed");
        Ok(expense)
    }

    /// Price, total expenses and net income per unit for a product.
    pub async fn report(&self, product_id: ProductId) -> Result<ProductReport, AppError> {
        let product = self.get_product(product_id).await?;
        let total_expenses = self.repo.sum_expenses(product_id).await?;
        let report = ProductReport::new(&product, total_expenses);
        debug!(
            product_id,
            total_expenses,
            net_income_per_unit = report.net_income_per_unit,
            "product report"
        );
        Ok(report)
    }

    /// Project profit for selling `quantity` units of a product.
    pub async fn simulate_profit(
        &self,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<ProfitSimulation, AppError> {
        let report = match self.report(product_id).await {
            Ok(report) => report,
            Err(AppError::ProductNotFound(id)) => {
                return Err(SimulationError::ProductNotFound(id).into());
            }
            Err(err) => return Err(err),
        };

        let simulation = report.simulate(quantity, self.config.zero_quantity)?;
        debug!(
            product_id,
            quantity,
            total_profit = simulation.total_profit,
            "profit simulation"
        );
        Ok(simulation)
    }
}
