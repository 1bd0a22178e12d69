pub mod document;
pub mod health;
pub mod image;
pub mod pdf;
mod server;

pub use server::{new_server, router};
