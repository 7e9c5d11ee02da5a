// storefront/src/bin/storefront_cli.rs

//! Terminal storefront: browse the catalog and manage this machine's cart.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

use storefront::catalog::{self, PRODUCTS};
use storefront::client::CartClient;
use storefront::models::{CartItem, CartSummary};
use storefront::session::{get_session_id, FileSessionStorage};
use storefront::telemetry;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli", version, about = "Browse the store and manage your cart")]
struct Cli {
  /// Base URL of the storefront server.
  #[arg(long, env = "STOREFRONT_URL", default_value = "http://127.0.0.1:8080")]
  base_url: String,

  /// File holding this client's session id.
  #[arg(long, env = "STOREFRONT_SESSION_FILE", default_value = ".storefront-session.json")]
  session_file: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// List the products for sale.
  Products,
  /// Show the cart and its total.
  Cart,
  /// Add one unit of a product by catalog id.
  Add { product_id: String },
  /// Remove a cart row by its id.
  Remove { id: Uuid },
  /// Empty the cart.
  Clear,
  /// Delete carts untouched for more than seven days (all sessions).
  Cleanup,
  /// Print the session id.
  Session,
}

fn print_cart(items: &[CartItem]) {
  let summary = CartSummary::from_items(items);
  println!("Cart ({})", summary.total_items);
  if items.is_empty() {
    println!("  Cart is empty");
    return;
  }
  for item in items {
    println!(
      "  {}  {:<22} ${} x {}  ${:.2}",
      item.id,
      item.product_name,
      item.product_price,
      item.quantity,
      item.line_total()
    );
  }
  println!("Total: ${:.2}", summary.total_price);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(telemetry::env_filter("warn"))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let storage = FileSessionStorage::new(&cli.session_file);
  let session_id = get_session_id(Some(&storage)).context("Failed to load session id")?;
  let client = CartClient::new(&cli.base_url, session_id);

  match cli.command {
    Command::Products => {
      for product in PRODUCTS.iter() {
        println!("  {:>2}  {:<22} ${}", product.id, product.name, product.price());
      }
    }
    Command::Cart => print_cart(&client.list().await?),
    Command::Add { product_id } => {
      let product = catalog::find(&product_id).ok_or_else(|| anyhow!("Unknown product id '{}'", product_id))?;
      let item = client.add(product).await?;
      println!("Added {} (quantity {})", item.product_name, item.quantity);
      print_cart(&client.list().await?);
    }
    Command::Remove { id } => {
      client.remove(id).await?;
      print_cart(&client.list().await?);
    }
    Command::Clear => {
      client.clear().await?;
      print_cart(&client.list().await?);
    }
    Command::Cleanup => {
      let deleted = client.cleanup().await?;
      println!("Deleted {} stale cart rows", deleted);
    }
    Command::Session => println!("{}", client.session_id()),
  }

  Ok(())
}
