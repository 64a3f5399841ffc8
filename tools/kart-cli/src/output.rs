//! Output formatting for the CLI.

use console::style;
use kart_commerce::cart::Cart;
use kart_commerce::ports::NotificationSink;
use kart_commerce::Currency;
use serde_json::{json, Value};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", format_row(cols, widths));
    }

    /// Print the cart as a table, or as JSON in JSON mode.
    pub fn cart(&self, cart: &Cart, currency: Currency) {
        if self.json {
            self.json(&cart_json(cart, currency));
            return;
        }

        self.header("Cart");
        if cart.is_empty() {
            self.info("Your cart is empty");
            return;
        }

        let widths = [6, 40, 12, 6, 12];
        self.table_row(&["ID", "PRODUCT", "PRICE", "QTY", "SUBTOTAL"], &widths);
        for line in cart {
            let price = line.product.unit_price(currency).display();
            let subtotal = money_or_dash(line.subtotal(currency).map(|m| m.display()));
            self.table_row(
                &[
                    &line.product_id().to_string(),
                    &truncate(&line.product.title, widths[1]),
                    &price,
                    &line.amount.to_string(),
                    &subtotal,
                ],
                &widths,
            );
        }

        println!();
        self.kv("items", &cart.item_count().to_string());
        self.kv(
            "total",
            &money_or_dash(cart.total(currency).map(|m| m.display())),
        );
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Prints cart notifications as error lines.
pub struct OutputSink {
    output: Output,
}

impl OutputSink {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

impl NotificationSink for OutputSink {
    fn error(&self, message: &str) {
        self.output.error(message);
    }
}

/// JSON view of the cart: its lines as persisted plus derived totals.
pub fn cart_json(cart: &Cart, currency: Currency) -> Value {
    let total = cart.total(currency).ok();
    json!({
        "lines": cart.lines(),
        "size": cart.size(),
        "itemCount": cart.item_count(),
        "total": total.map(|m| m.display()),
        "currency": currency.code(),
    })
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn money_or_dash<E>(value: Result<String, E>) -> String {
    value.unwrap_or_else(|_| "-".to_string())
}
