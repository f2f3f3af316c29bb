use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::application::{AppError, TrackerService};
use crate::domain::{AccountId, Product, parse_money, parse_quantity, require_name};

use super::prompt::Prompt;
use super::ui::Ui;

const APP_TITLE: &str = "Xpense - Small Business Expense Tracker";
const CHOICE_LABEL: &str = "Enter your choice: ";

/// Interactive session: binds menu choices to tracker operations.
///
/// Recoverable errors are shown and the same menu is displayed again; store
/// and console failures end the session.
pub struct Session<'a, P: Prompt, W: Write> {
    service: &'a TrackerService,
    prompt: P,
    ui: Ui<W>,
}

impl<'a, P: Prompt, W: Write> Session<'a, P, W> {
    pub fn new(service: &'a TrackerService, prompt: P, ui: Ui<W>) -> Self {
        Self {
            service,
            prompt,
            ui,
        }
    }

    pub fn into_parts(self) -> (P, Ui<W>) {
        (self.prompt, self.ui)
    }

    /// Run the top-level Register / Login / Exit loop until the user exits.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.ui.show_header(APP_TITLE)?;
            self.ui.show_options(&["Register", "Login", "Exit"])?;
            let Some(choice) = self.prompt.ask(CHOICE_LABEL)? else {
                break;
            };

            match choice.trim() {
                "1" => {
                    let result = self.register().await;
                    self.recover(result)?;
                }
                "2" => {
                    let result = self.login().await;
                    if let Some(Some(account_id)) = self.recover(result)? {
                        self.account_menu(account_id).await?;
                    }
                }
                "3" => break,
                other => self.unknown_choice(other)?,
            }
        }

        self.ui.show_box("Goodbye!")?;
        Ok(())
    }

    async fn account_menu(&mut self, account_id: AccountId) -> Result<()> {
        loop {
            self.ui.show_header("Main Menu")?;
            self.ui.show_options(&[
                "View Products",
                "Add Product",
                "Remove Product",
                "Manage Expenses",
                "Logout",
            ])?;
            let Some(choice) = self.prompt.ask(CHOICE_LABEL)? else {
                break;
            };

            match choice.trim() {
                "1" => {
                    let result = self.view_products(account_id).await;
                    self.recover(result)?;
                    self.prompt.pause()?;
                }
                "2" => {
                    let result = self.add_product(account_id).await;
                    self.recover(result)?;
                    self.prompt.pause()?;
                }
                "3" => {
                    let result = self.remove_product(account_id).await;
                    self.recover(result)?;
                    self.prompt.pause()?;
                }
                "4" => {
                    let result = self.choose_product(account_id).await;
                    match self.recover(result)? {
                        Some(Some(product)) => self.expense_menu(product).await?,
                        _ => self.prompt.pause()?,
                    }
                }
                "5" => break,
                other => self.unknown_choice(other)?,
            }
        }

        self.ui.show_box("Logging out...")?;
        Ok(())
    }

    async fn expense_menu(&mut self, product: Product) -> Result<()> {
        debug!(product_id = product.id, "managing expenses");
        loop {
            self.ui.show_header(&format!("Expense Management - {}", product.name))?;
            self.ui.show_options(&[
                "View Expenses",
                "Add Expense",
                "Remove Expense",
                "View Product Report",
                "Simulate Profit",
                "Go Back",
            ])?;
            let Some(choice) = self.prompt.ask(CHOICE_LABEL)? else {
                break;
            };

            let result = match choice.trim() {
                "1" => self.view_expenses(&product).await,
                "2" => self.add_expense(&product).await,
                "3" => self.remove_expense(&product).await,
                "4" => self.view_report(&product).await,
                "5" => self.simulate_profit(&product).await,
                "6" => break,
                other => {
                    self.unknown_choice(other)?;
                    continue;
                }
            };
            self.recover(result)?;
            self.prompt.pause()?;
        }
        Ok(())
    }

    // ========================
    // Account actions
    // ========================

    async fn register(&mut self) -> Result<(), AppError> {
        self.ui.show_header("Register")?;
        let Some(username) = self.prompt.ask("Enter a username: ")? else {
            return Ok(());
        };
        let Some(password) = self.prompt.ask_secret("Enter a password: ")? else {
            return Ok(());
        };

        self.service.register(&username, &password).await?;
        self.ui
            .show_success("Registration successful! You can now log in.")?;
        Ok(())
    }

    async fn login(&mut self) -> Result<Option<AccountId>, AppError> {
        self.ui.show_header("Login")?;
        let Some(username) = self.prompt.ask("Enter your username: ")? else {
            return Ok(None);
        };
        let Some(password) = self.prompt.ask_secret("Enter your password: ")? else {
            return Ok(None);
        };

        match self.service.login(&username, &password).await? {
            Some(account_id) => {
                self.ui.show_success("Login successful!")?;
                Ok(Some(account_id))
            }
            None => {
                self.ui.show_error("Invalid credentials. Try again.")?;
                self.prompt.pause()?;
                Ok(None)
            }
        }
    }

    // ========================
    // Product actions
    // ========================

    /// Show the account's products. Returns false when there are none.
    async fn list_products(&mut self, account_id: AccountId) -> Result<bool, AppError> {
        let products = self.service.list_products(account_id).await?;
        if products.is_empty() {
            self.ui.show_error("No products found.")?;
            return Ok(false);
        }
        self.ui.show_products(&products)?;
        Ok(true)
    }

    async fn view_products(&mut self, account_id: AccountId) -> Result<(), AppError> {
        self.list_products(account_id).await?;
        Ok(())
    }

    async fn add_product(&mut self, account_id: AccountId) -> Result<(), AppError> {
        self.ui.show_header("Add Product")?;
        let Some(name) = self.prompt.ask("Enter product name: ")? else {
            return Ok(());
        };
        // Reject a blank name before asking for the price
        require_name("Product name", &name)?;
        let Some(price) = self.prompt.ask("Enter product price: ")? else {
            return Ok(());
        };
        let price_cents = parse_money("price", &price)?;

        self.service.add_product(account_id, &name, price_cents).await?;
        self.ui.show_success("Product added successfully!")?;
        Ok(())
    }

    async fn remove_product(&mut self, account_id: AccountId) -> Result<(), AppError> {
        if !self.list_products(account_id).await? {
            return Ok(());
        }
        let Some(selection) = self.prompt.ask("Select a product to remove (number): ")? else {
            return Ok(());
        };

        self.service.remove_product(account_id, &selection).await?;
        self.ui.show_success("Product removed successfully!")?;
        Ok(())
    }

    async fn choose_product(&mut self, account_id: AccountId) -> Result<Option<Product>, AppError> {
        if !self.list_products(account_id).await? {
            return Ok(None);
        }
        let Some(selection) = self
            .prompt
            .ask("Select a product to manage expenses (number): ")?
        else {
            return Ok(None);
        };

        Ok(Some(self.service.select_product(account_id, &selection).await?))
    }

    // ========================
    // Expense actions
    // ========================

    /// Show the product's expenses. Returns false when there are none.
    async fn list_expenses(&mut self, product: &Product) -> Result<bool, AppError> {
        let expenses = self.service.list_expenses(product.id).await?;
        if expenses.is_empty() {
            self.ui.show_error("No expenses found.")?;
            return Ok(false);
        }
        self.ui.show_expenses(&expenses)?;
        Ok(true)
    }

    async fn view_expenses(&mut self, product: &Product) -> Result<(), AppError> {
        self.list_expenses(product).await?;
        Ok(())
    }

    async fn add_expense(&mut self, product: &Product) -> Result<(), AppError> {
        self.ui.show_header("Add Expense")?;
        let Some(name) = self.prompt.ask("Enter expense name: ")? else {
            return Ok(());
        };
        require_name("Expense name", &name)?;
        let Some(amount) = self.prompt.ask("Enter expense amount: ")? else {
            return Ok(());
        };
        let amount_cents = parse_money("amount", &amount)?;

        self.service.add_expense(product.id, &name, amount_cents).await?;
        self.ui.show_success("Expense added successfully!")?;
        Ok(())
    }

    async fn remove_expense(&mut self, product: &Product) -> Result<(), AppError> {
        if !self.list_expenses(product).await? {
            return Ok(());
        }
        let Some(selection) = self.prompt.ask("Select an expense to remove (number): ")? else {
            return Ok(());
        };

        self.service.remove_expense(product.id, &selection).await?;
        self.ui.show_success("Expense removed successfully!")?;
        Ok(())
    }

    async fn view_report(&mut self, product: &Product) -> Result<(), AppError> {
        let report = self.service.report(product.id).await?;
        self.ui.show_report(&report)?;
        Ok(())
    }

    async fn simulate_profit(&mut self, product: &Product) -> Result<(), AppError> {
        let Some(quantity) = self.prompt.ask("Enter number of products sold: ")? else {
            return Ok(());
        };
        let quantity = parse_quantity(&quantity)?;

        let simulation = self.service.simulate_profit(product.id, quantity).await?;
        self.ui.show_simulation(&simulation)?;
        Ok(())
    }

    // ========================
    // Helpers
    // ========================

    /// Show a recoverable error and carry on; escalate anything else.
    fn recover<T>(&mut self, result: Result<T, AppError>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                debug!(error = %err, "operation rejected");
                self.ui.show_error(&err.to_string())?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn unknown_choice(&mut self, choice: &str) -> Result<()> {
        self.ui.show_error(&format!("Invalid choice: {}", choice))?;
        Ok(())
    }
}
