pub mod commands;
pub mod config;
pub mod discord;
pub mod icu;
pub mod interactions;
pub mod job;
pub mod language;
pub mod security;
pub mod server;
pub mod store;
