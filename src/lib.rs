pub mod api;
pub mod app;
pub mod chat;
pub mod cli;
pub mod config;
pub mod models;
pub mod router;
pub mod session;
pub mod settings;
pub mod storage;
pub mod transport;
