//! Vault upload backends

mod ofapi_client;

pub use ofapi_client::OfApiVaultClient;
