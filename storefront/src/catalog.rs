// storefront/src/catalog.rs

//! The fixed product list. The browser page carries its own copy; there is no
//! catalog endpoint.

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
  pub id: &'static str,
  pub name: &'static str,
  price_cents: i64,
}

impl Product {
  pub fn price(&self) -> Decimal {
    Decimal::new(self.price_cents, 2)
  }
}

const fn product(id: &'static str, name: &'static str, price_cents: i64) -> Product {
  Product { id, name, price_cents }
}

pub static PRODUCTS: [Product; 8] = [
  product("1", "Wireless Headphones", 5999),
  product("2", "USB-C Hub", 3499),
  product("3", "Mechanical Keyboard", 8999),
  product("4", "Mouse Pad XL", 1999),
  product("5", "Webcam HD", 4999),
  product("6", "Monitor Stand", 2999),
  product("7", "Cable Organizer", 1299),
  product("8", "Desk Lamp", 2499),
];

pub fn find(id: &str) -> Option<&'static Product> {
  PRODUCTS.iter().find(|p| p.id == id)
}
