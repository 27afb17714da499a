pub mod account;
pub mod chat;
pub mod classify;
pub mod directory;
pub mod monitor;
