//! Infrastructure layer: stores, the vault client and observability

pub mod creator;
pub mod observability;
pub mod upload_link;
pub mod vault;
