pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod state;
pub mod utils;
