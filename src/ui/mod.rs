pub mod interactive;
pub mod menu;
pub mod viewer;
