//! Issuance and verification of signed upload tokens

use std::fmt::Debug;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

use super::{UploadTokenPayload, UploadTokenSecret};
use crate::domain::DomainError;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of an upload link when the caller does not pick one
pub const DEFAULT_TTL_MINUTES: i64 = 30;

/// A freshly minted token together with the claims it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedUploadToken {
    pub token: String,
    pub payload: UploadTokenPayload,
}

/// Outcome of verifying a token
///
/// Rejections carry no reason. Callers treat `Rejected` as unauthorized
/// whether the token was malformed, forged or expired.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerification {
    Valid(UploadTokenPayload),
    Rejected,
}

impl TokenVerification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn into_payload(self) -> Option<UploadTokenPayload> {
        match self {
            Self::Valid(payload) => Some(payload),
            Self::Rejected => None,
        }
    }
}

/// Internal diagnostics only, never returned to callers
#[derive(Debug, Clone, Copy)]
enum RejectReason {
    Malformed,
    BadSignature,
    Undecodable,
    Expired,
}

impl RejectReason {
    fn as_str(self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::BadSignature => "bad_signature",
            Self::Undecodable => "undecodable",
            Self::Expired => "expired",
        }
    }
}

/// Stateless token codec keyed by the shared upload secret
#[derive(Clone)]
pub struct UploadTokenCodec {
    secret: UploadTokenSecret,
}

impl Debug for UploadTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadTokenCodec")
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl UploadTokenCodec {
    pub fn new(secret: UploadTokenSecret) -> Self {
        Self { secret }
    }

    /// Mint a token string for `creator_id`/`account` valid for `ttl_minutes`
    pub fn create_token(
        &self,
        creator_id: &str,
        account: &str,
        ttl_minutes: i64,
    ) -> Result<String, DomainError> {
        self.issue(creator_id, account, ttl_minutes)
            .map(|issued| issued.token)
    }

    /// Mint a token against the wall clock
    pub fn issue(
        &self,
        creator_id: &str,
        account: &str,
        ttl_minutes: i64,
    ) -> Result<IssuedUploadToken, DomainError> {
        self.issue_at(creator_id, account, ttl_minutes, Utc::now().timestamp())
    }

    /// Mint a token as if issued at `now` (Unix epoch seconds)
    pub fn issue_at(
        &self,
        creator_id: &str,
        account: &str,
        ttl_minutes: i64,
        now: i64,
    ) -> Result<IssuedUploadToken, DomainError> {
        let payload = UploadTokenPayload::new(creator_id, account, now, ttl_minutes);

        let json = serde_json::to_vec(&payload).map_err(|e| {
            DomainError::internal(format!("Failed to serialize upload token payload: {}", e))
        })?;

        let data = URL_SAFE_NO_PAD.encode(json);
        let sig = URL_SAFE_NO_PAD.encode(self.sign(&data));

        Ok(IssuedUploadToken {
            token: format!("{}.{}", data, sig),
            payload,
        })
    }

    /// Verify a token against the wall clock
    pub fn verify(&self, token: &str) -> TokenVerification {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as of `now` (Unix epoch seconds)
    pub fn verify_at(&self, token: &str, now: i64) -> TokenVerification {
        match self.check(token, now) {
            Ok(payload) => TokenVerification::Valid(payload),
            Err(reason) => {
                debug!(reason = reason.as_str(), "Upload token rejected");
                TokenVerification::Rejected
            }
        }
    }

    fn check(&self, token: &str, now: i64) -> Result<UploadTokenPayload, RejectReason> {
        let (data, sig) = split_token(token).ok_or(RejectReason::Malformed)?;

        let expected = self.sign(data);
        let provided = URL_SAFE_NO_PAD
            .decode(sig)
            .map_err(|_| RejectReason::Malformed)?;

        if provided.len() != expected.len() {
            return Err(RejectReason::BadSignature);
        }

        if !bool::from(provided.ct_eq(&expected)) {
            return Err(RejectReason::BadSignature);
        }

        let json = URL_SAFE_NO_PAD
            .decode(data)
            .map_err(|_| RejectReason::Undecodable)?;

        let payload: UploadTokenPayload =
            serde_json::from_slice(&json).map_err(|_| RejectReason::Undecodable)?;

        if payload.is_expired_at(now) {
            return Err(RejectReason::Expired);
        }

        Ok(payload)
    }

    fn sign(&self, data: &str) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(data.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Exactly two non-empty segments separated by a single `.`
fn split_token(token: &str) -> Option<(&str, &str)> {
    let mut parts = token.split('.');

    let data = parts.next()?;
    let sig = parts.next()?;

    if parts.next().is_some() || data.is_empty() || sig.is_empty() {
        return None;
    }

    Some((data, sig))
}
