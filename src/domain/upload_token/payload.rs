use serde::{Deserialize, Serialize};

/// Claims carried inside an upload token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTokenPayload {
    /// Creator the upload is scoped to
    pub creator_id: String,
    /// External account id used for the vault upload (e.g. `acct_XXX`)
    pub account: String,
    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,
}

impl UploadTokenPayload {
    /// Create claims issued at `issued_at` that live for `ttl_minutes`
    pub fn new(
        creator_id: impl Into<String>,
        account: impl Into<String>,
        issued_at: i64,
        ttl_minutes: i64,
    ) -> Self {
        Self {
            creator_id: creator_id.into(),
            account: account.into(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_minutes.saturating_mul(60)),
        }
    }

    /// A token stays valid through its `exp` second
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp < now
    }

    /// Lifetime of the token in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.exp.saturating_sub(self.iat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_expiry() {
        let payload = UploadTokenPayload::new("creator_123", "acct_abc", 1_000, 30);

        assert_eq!(payload.iat, 1_000);
        assert_eq!(payload.exp, 2_800);
        assert_eq!(payload.ttl_seconds(), 1_800);
    }

    #[test]
    fn test_expiry_boundary() {
        let payload = UploadTokenPayload::new("c", "a", 0, 1);

        assert!(!payload.is_expired_at(59));
        assert!(!payload.is_expired_at(60));
        assert!(payload.is_expired_at(61));
    }

    #[test]
    fn test_negative_ttl_is_already_expired() {
        let payload = UploadTokenPayload::new("c", "a", 500, -1);
        assert!(payload.is_expired_at(500));
    }

    #[test]
    fn test_huge_ttl_saturates() {
        let payload = UploadTokenPayload::new("c", "a", 10, i64::MAX);
        assert_eq!(payload.exp, i64::MAX);
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let payload = UploadTokenPayload::new("creator_123", "acct_abc", 100, 1);
        let json = serde_json::to_string(&payload).unwrap();

        assert_eq!(
            json,
            r#"{"creatorId":"creator_123","account":"acct_abc","iat":100,"exp":160}"#
        );
    }
}
