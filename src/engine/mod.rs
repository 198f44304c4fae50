pub mod components;
pub mod config;
pub mod rendering;
pub mod systems;
pub mod utils;

pub use config::DemoConfig;
