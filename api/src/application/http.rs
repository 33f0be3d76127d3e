pub mod chat;
pub mod health;
pub mod label;
pub mod server;
