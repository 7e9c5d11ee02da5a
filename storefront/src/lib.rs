// storefront/src/lib.rs

//! Session-scoped shopping cart service.
//!
//! Carts are rows in a single `carts` table grouped by a client-generated
//! session id. The HTTP API under `/api/cart` lists, adds (or increments),
//! removes and clears rows, and sweeps rows untouched for more than seven days.
//! A static storefront page is served at `/`.

pub mod catalog;
pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod web;

pub use errors::{AppError, Result};
