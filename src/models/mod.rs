pub mod state;
pub mod views;
