//! Domain layer: upload tokens, creators and vault uploads

pub mod creator;
pub mod error;
pub mod upload_token;
pub mod vault;

pub use creator::{Creator, CreatorId, CreatorRepository};
pub use error::DomainError;
pub use upload_token::{
    IssuedUploadToken, TokenVerification, UploadTokenCodec, UploadTokenPayload,
    UploadTokenSecret, DEFAULT_TTL_MINUTES,
};
pub use vault::{VaultFile, VaultReceipt, VaultUploader};
