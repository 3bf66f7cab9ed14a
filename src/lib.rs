pub mod app;
pub mod braille;
pub mod config;
pub mod data;
pub mod error;
pub mod geo;
pub mod map;
pub mod page;
pub mod reload;
pub mod scene;
pub mod ui;

pub use error::{MapError, Result};
