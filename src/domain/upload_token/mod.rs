//! Upload link tokens
//!
//! A token is `base64url(JSON payload) + "." + base64url(HMAC-SHA256(payload_b64))`.
//! Tokens are self-contained: verifying one needs only the shared secret and
//! the wall clock, never a database lookup.

mod codec;
mod payload;
mod secret;

pub use codec::{IssuedUploadToken, TokenVerification, UploadTokenCodec, DEFAULT_TTL_MINUTES};
pub use payload::UploadTokenPayload;
pub use secret::UploadTokenSecret;
