pub mod analysis;
pub mod health;
pub mod registry;
