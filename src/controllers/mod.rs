pub mod health;
pub mod interactions;
pub mod products;
pub mod public_config;
