mod handler;
mod keyboards;
pub mod types;
mod utils;

pub use handler::TelegramService;
