pub mod auth;
pub mod client;
pub mod gateway;
pub mod list;
pub mod metrics;
pub mod proxy;
pub mod utils;
