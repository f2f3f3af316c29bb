use std::io::{self, IsTerminal, Stdout, Write};

use colored::Colorize;

use crate::domain::{
    Expense, Product, ProductReport, ProfitSimulation, format_cents, total_expenses,
};

const RULE_WIDTH: usize = 60;
const OPTIONS_WIDTH: usize = 30;

/// Console rendering for headers, menus, listings and status messages.
pub struct Ui<W: Write> {
    out: W,
    clear_screen: bool,
}

impl Ui<Stdout> {
    /// Render to stdout, clearing the screen between screens on a terminal.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let clear_screen = out.is_terminal();
        Self { out, clear_screen }
    }
}

impl<W: Write> Ui<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            clear_screen: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn show_header(&mut self, title: &str) -> io::Result<()> {
        if self.clear_screen {
            write!(self.out, "\x1B[2J\x1B[1;1H")?;
        }
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out, "{}", rule.yellow())?;
        writeln!(self.out, "{}", format!("=== {} ===", title.to_uppercase()).yellow())?;
        writeln!(self.out, "{}", rule.yellow())
    }

    pub fn show_options(&mut self, labels: &[&str]) -> io::Result<()> {
        let border = format!("+{}+", "-".repeat(OPTIONS_WIDTH));
        writeln!(self.out, "{}", border.cyan())?;
        for (index, label) in labels.iter().enumerate() {
            let line = format!("| {}. {:<width$} |", index + 1, label, width = OPTIONS_WIDTH - 4);
            writeln!(self.out, "{}", line.cyan())?;
        }
        writeln!(self.out, "{}", border.cyan())?;
        self.out.flush()
    }

    pub fn show_success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", format!("✓ {}", message).green())
    }

    pub fn show_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", format!("✗ {}", message).red())
    }

    /// Framed one-line notice.
    pub fn show_box(&mut self, message: &str) -> io::Result<()> {
        let border = format!("+{}+", "-".repeat(message.chars().count() + 2));
        writeln!(self.out, "{}", border.yellow())?;
        writeln!(self.out, "{}", format!("| {} |", message).yellow())?;
        writeln!(self.out, "{}", border.yellow())
    }

    pub fn show_products(&mut self, products: &[Product]) -> io::Result<()> {
        self.show_header("Products")?;
        for (index, product) in products.iter().enumerate() {
            let line = format!(
                "{}. {} - {}",
                index + 1,
                product.name,
                format_cents(product.price_cents)
            );
            writeln!(self.out, "{}", line.cyan())?;
        }
        self.show_rule()
    }

    pub fn show_expenses(&mut self, expenses: &[Expense]) -> io::Result<()> {
        self.show_header("Expenses")?;
        for (index, expense) in expenses.iter().enumerate() {
            let line = format!(
                "{}. {} - {}",
                index + 1,
                expense.name,
                format_cents(expense.amount_cents)
            );
            writeln!(self.out, "{}", line.cyan())?;
        }
        let total = match total_expenses(expenses) {
            Some(cents) => format!("Total: {}", format_cents(cents)),
            None => "Total: out of range".to_string(),
        };
        writeln!(self.out, "{}", total.cyan().bold())?;
        self.show_rule()
    }

    pub fn show_report(&mut self, report: &ProductReport) -> io::Result<()> {
        self.show_header("Product Report")?;
        let lines = [
            format!("Product: {}", report.product_name),
            format!("Product Price: {}", format_cents(report.price)),
            format!("Total Expenses: {}", format_cents(report.total_expenses)),
            format!(
                "Net Income Per Unit: {}",
                format_cents(report.net_income_per_unit)
            ),
        ];
        for line in lines {
            writeln!(self.out, "{}", line.cyan())?;
        }
        self.show_rule()
    }

    pub fn show_simulation(&mut self, simulation: &ProfitSimulation) -> io::Result<()> {
        self.show_header("Profit Simulation")?;
        let per_unit = format!(
            "Net Income Per Unit: {}",
            format_cents(simulation.net_income_per_unit)
        );
        let total = format!(
            "Estimated Profit for {} units: {}",
            simulation.quantity,
            format_cents(simulation.total_profit)
        );
        writeln!(self.out, "{}", per_unit.cyan())?;
        writeln!(self.out, "{}", total.cyan())?;
        self.show_rule()
    }

    fn show_rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH).yellow())
    }
}
