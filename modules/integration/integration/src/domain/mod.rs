pub mod access;
pub mod directory;
pub mod local_client;
pub mod models;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_support;

pub use local_client::IntegrationLocalClient;
