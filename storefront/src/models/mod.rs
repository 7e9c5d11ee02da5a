// storefront/src/models/mod.rs

//! Data structures representing rows of the `carts` table and values derived from them.

pub mod cart_item;

pub use cart_item::{CartItem, CartSummary, NewCartItem};
