// storefront/src/web/handlers/mod.rs

pub mod cart_handlers;
pub mod storefront_handlers;
