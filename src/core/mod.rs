pub mod color;
pub mod config;
pub mod court;
pub mod error;
pub mod sectors;
pub mod selection;
pub mod session;
