//! The interactive storefront session: one catalog, one cart, a small
//! command vocabulary mirroring the on-screen controls of a storefront
//! (load, add, decrease, remove, checkout).

use rust_decimal::Decimal;
use shoply_catalog::{CatalogLoader, LoadReport};
use shoply_core::errors::ApplicationError;
use shoply_core::{Cart, CartEntry, CatalogStatus, CatalogStore, Product, ProductId};
use uuid::Uuid;

pub struct Session {
    store: CatalogStore,
    cart: Cart,
    loader: CatalogLoader,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self { output: output.into(), quit: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Load,
    List,
    Add(u64),
    Dec(u64),
    Rm(u64),
    Cart,
    Total,
    Checkout,
    Help,
    Quit,
}

const HELP: &str = "commands:\n  \
    load           fetch the product catalog (replaces any loaded catalog)\n  \
    list           show the loaded catalog\n  \
    add <id>       add a product to the cart (repeats increase quantity)\n  \
    dec <id>       decrease quantity (removes the line at zero)\n  \
    rm <id>        remove a product from the cart\n  \
    cart           show the cart\n  \
    total          show the cart total\n  \
    checkout       demo affordance only, does nothing\n  \
    help           show this message\n  \
    quit           leave the shop";

impl Session {
    pub fn new(loader: CatalogLoader) -> Self {
        Self { store: CatalogStore::new(), cart: Cart::new(), loader }
    }

    pub async fn handle(&mut self, line: &str) -> Reply {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Reply::text(""),
            Err(message) => return Reply::text(message),
        };

        match command {
            Command::Load => self.load().await,
            Command::List => Reply::text(self.render_catalog()),
            Command::Add(id) => self.add(ProductId(id)),
            Command::Dec(id) => {
                self.cart.decrease(ProductId(id));
                Reply::text(self.render_cart_summary())
            }
            Command::Rm(id) => {
                self.cart.remove(ProductId(id));
                Reply::text(self.render_cart_summary())
            }
            Command::Cart => Reply::text(self.render_cart()),
            Command::Total => Reply::text(format!("total: {}", money(self.cart.total()))),
            Command::Checkout => Reply::text(
                "checkout is a demo affordance only; nothing was charged and the cart is unchanged",
            ),
            Command::Help => Reply::text(HELP),
            Command::Quit => Reply { output: "bye".to_string(), quit: true },
        }
    }

    async fn load(&mut self) -> Reply {
        match self.loader.load(&mut self.store).await {
            Ok(LoadReport::Applied { count }) => Reply::text(format!(
                "loaded {count} products from {origin}",
                origin = self.loader.origin()
            )),
            Ok(LoadReport::StaleDiscarded) => {
                Reply::text("load superseded by a newer request; catalog unchanged")
            }
            Err(error) => {
                let correlation_id = Uuid::new_v4().to_string();
                let interface =
                    ApplicationError::from(error).into_interface(correlation_id.clone());
                Reply::text(format!(
                    "{} (ref {correlation_id})",
                    interface.user_message()
                ))
            }
        }
    }

    fn add(&mut self, id: ProductId) -> Reply {
        let Some(product) = self.store.find(id).cloned() else {
            return Reply::text(format!(
                "product {id} is not in the loaded catalog (run `load`, then `list`)"
            ));
        };

        self.cart.add(&product);
        Reply::text(self.render_cart_summary())
    }

    fn render_catalog(&self) -> String {
        let mut lines = Vec::new();

        match self.store.status() {
            CatalogStatus::Empty => {
                return "catalog is empty; run `load` to fetch products".to_string()
            }
            CatalogStatus::Loading => lines.push("catalog load in flight".to_string()),
            CatalogStatus::Failed { message } => {
                lines.push(format!("last load failed ({message}); showing previous catalog"));
            }
            CatalogStatus::Ready { count, loaded_at } => {
                lines.push(format!("{count} products, loaded {loaded_at}"));
            }
        }

        for product in self.store.products() {
            lines.push(render_product(product));
        }

        lines.join("\n")
    }

    fn render_cart(&self) -> String {
        if self.cart.is_empty() {
            return "your cart is empty".to_string();
        }

        let mut lines: Vec<String> = self.cart.entries().iter().map(render_cart_line).collect();
        lines.push(format!("total: {}", money(self.cart.total())));
        lines.join("\n")
    }

    fn render_cart_summary(&self) -> String {
        format!(
            "cart: {count} line(s), total {total}",
            count = self.cart.len(),
            total = money(self.cart.total())
        )
    }
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb {
        "load" => Command::Load,
        "list" => Command::List,
        "add" => Command::Add(parse_id(words.next(), "add")?),
        "dec" => Command::Dec(parse_id(words.next(), "dec")?),
        "rm" => Command::Rm(parse_id(words.next(), "rm")?),
        "cart" => Command::Cart,
        "total" => Command::Total,
        "checkout" => Command::Checkout,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}` (try `help`)")),
    };

    Ok(Some(command))
}

fn parse_id(word: Option<&str>, verb: &str) -> Result<u64, String> {
    let Some(word) = word else {
        return Err(format!("`{verb}` needs a product id (see `list`)"));
    };

    word.parse::<u64>().map_err(|_| format!("`{word}` is not a product id"))
}

pub(crate) fn render_product(product: &Product) -> String {
    format!("  [{id}] {title} - {price}", id = product.id, title = product.title, price = money(product.price))
}

fn render_cart_line(entry: &CartEntry) -> String {
    format!(
        "  [{id}] {title} x{quantity} - {line_total}",
        id = entry.product.id,
        title = entry.product.title,
        quantity = entry.quantity,
        line_total = money(entry.line_total())
    )
}

/// Two-decimal rounding happens here, on display only; stored values keep
/// full precision.
pub(crate) fn money(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}
