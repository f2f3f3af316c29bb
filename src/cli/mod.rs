pub mod menu;
pub mod prompt;
pub mod ui;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::application::{PasswordScheme, TrackerConfig, TrackerService};
use crate::domain::{ProductReport, ProfitSimulation, ZeroQuantityPolicy};

pub use menu::Session;
pub use prompt::{Prompt, ScriptedPrompt, TerminalPrompt};
pub use ui::Ui;

/// Xpense - Small Business Expense Tracker
#[derive(Parser)]
#[command(name = "xpense")]
#[command(about = "Track products, their production expenses and projected profit")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "business_tracker.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Accept a quantity of zero in profit simulations (profit is 0)
    #[arg(long, global = true)]
    pub allow_zero_quantity: bool,

    /// Store and compare passwords in plaintext (databases from older versions)
    #[arg(long, global = true)]
    pub plaintext_passwords: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive menu (default)
    Menu,

    /// Create the database and its tables
    Init,

    /// Register a new account
    Register {
        /// Username (must be unique)
        username: String,
    },

    /// Show the per-unit report for a product
    Report {
        /// Account that owns the product
        #[arg(short, long)]
        user: String,

        /// Product name
        product: String,

        /// Also simulate profit for this many units sold
        #[arg(short, long)]
        quantity: Option<i64>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Serialize)]
struct ReportOutput {
    report: ProductReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    simulation: Option<ProfitSimulation>,
}

impl Cli {
    pub fn config(&self) -> TrackerConfig {
        let zero_quantity = if self.allow_zero_quantity {
            ZeroQuantityPolicy::Allow
        } else {
            ZeroQuantityPolicy::Reject
        };
        let password_scheme = if self.plaintext_passwords {
            PasswordScheme::Plaintext
        } else {
            PasswordScheme::Argon2
        };

        TrackerConfig::default()
            .with_zero_quantity(zero_quantity)
            .with_password_scheme(password_scheme)
    }

    pub async fn run(self) -> Result<()> {
        let service = TrackerService::open(&self.database, self.config())
            .await
            .with_context(|| format!("Failed to open database '{}'", self.database))?;

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Menu => {
                let mut session = Session::new(&service, TerminalPrompt::new(), Ui::stdout());
                session.run().await?;
            }

            Commands::Init => {
                println!("Database initialized: {}", self.database);
            }

            Commands::Register { username } => {
                let password = rpassword::prompt_password("Password: ")?;
                let confirm = rpassword::prompt_password("Confirm password: ")?;
                if password != confirm {
                    bail!("Passwords do not match");
                }

                let id = service.register(&username, &password).await?;
                println!("Registered account: {} ({})", username, id);
            }

            Commands::Report {
                user,
                product,
                quantity,
                format,
            } => {
                run_report_command(&service, &user, &product, quantity, &format).await?;
            }
        }

        Ok(())
    }
}

async fn run_report_command(
    service: &TrackerService,
    user: &str,
    product_name: &str,
    quantity: Option<i64>,
    format: &str,
) -> Result<()> {
    if !matches!(format, "table" | "json") {
        bail!("Invalid format '{}'. Valid formats: table, json", format);
    }

    let password = rpassword::prompt_password("Password: ")?;
    let Some(account_id) = service.login(user, &password).await? else {
        bail!("Invalid credentials for '{}'", user);
    };

    let product = service.find_product(account_id, product_name).await?;
    let report = service.report(product.id).await?;
    let simulation = match quantity {
        Some(q) => Some(service.simulate_profit(product.id, q).await?),
        None => None,
    };

    if format == "json" {
        let output = ReportOutput { report, simulation };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let mut ui = Ui::new(std::io::stdout());
        ui.show_report(&report)?;
        if let Some(simulation) = simulation {
            ui.show_simulation(&simulation)?;
        }
    }

    Ok(())
}
