pub mod draw_service;
pub mod import_service;

pub use draw_service::*;
