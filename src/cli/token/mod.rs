//! Offline token commands

use std::process::ExitCode;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{TimeZone, Utc};
use clap::Args;
use rand::{rngs::OsRng, RngCore};
use serde_json::json;

use crate::config::AppConfig;
use crate::domain::{IssuedUploadToken, TokenVerification, UploadTokenPayload};

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Creator the link belongs to
    #[arg(long)]
    pub creator_id: String,

    /// OnlyFans API account uploads go to
    #[arg(long)]
    pub account: String,

    /// Lifetime; defaults to `upload_link.default_ttl_minutes`
    #[arg(long, allow_negative_numbers = true)]
    pub ttl_minutes: Option<i64>,

    /// Print token, URL and expiry as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    pub token: String,
}

#[derive(Args, Debug)]
pub struct GenSecretArgs {
    /// Random bytes before encoding
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(16..=1024))]
    pub bytes: u16,
}

pub fn issue(args: IssueArgs) -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let codec = crate::build_token_codec(&config)?;
    let ttl_minutes = args
        .ttl_minutes
        .unwrap_or(config.upload_link.default_ttl_minutes);

    let issued = codec.issue(&args.creator_id, &args.account, ttl_minutes)?;
    println!(
        "{}",
        render_issued(&issued, &config.upload_link.public_base_url, args.json)?
    );

    Ok(ExitCode::SUCCESS)
}

pub fn verify(args: VerifyArgs) -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    let codec = crate::build_token_codec(&config)?;

    match codec.verify(args.token.trim()) {
        TokenVerification::Valid(payload) => {
            println!("{}", render_payload(&payload)?);
            Ok(ExitCode::SUCCESS)
        }
        TokenVerification::Rejected => {
            println!("rejected");
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn gen_secret(args: GenSecretArgs) -> anyhow::Result<ExitCode> {
    println!("{}", generate_secret(usize::from(args.bytes)));
    Ok(ExitCode::SUCCESS)
}

fn render_issued(
    issued: &IssuedUploadToken,
    public_base_url: &str,
    as_json: bool,
) -> anyhow::Result<String> {
    if !as_json {
        return Ok(issued.token.clone());
    }

    let url = format!(
        "{}/upload?token={}",
        public_base_url.trim_end_matches('/'),
        issued.token
    );

    Ok(serde_json::to_string_pretty(&json!({
        "token": issued.token,
        "url": url,
        "expires_at": issued.payload.exp,
        "expires_at_utc": timestamp_to_rfc3339(issued.payload.exp),
    }))?)
}

fn render_payload(payload: &UploadTokenPayload) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&json!({
        "creatorId": payload.creator_id,
        "account": payload.account,
        "iat": payload.iat,
        "exp": payload.exp,
        "expires_at_utc": timestamp_to_rfc3339(payload.exp),
    }))?)
}

fn timestamp_to_rfc3339(seconds: i64) -> Option<String> {
    Utc.timestamp_opt(seconds, 0).single().map(|t| t.to_rfc3339())
}

fn generate_secret(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UploadTokenCodec, UploadTokenSecret};

    fn issued() -> IssuedUploadToken {
        UploadTokenCodec::new(UploadTokenSecret::new("cli-secret").unwrap())
            .issue_at("creator_123", "acct_abc", 30, 1_700_000_000)
            .unwrap()
    }

    #[test]
    fn test_generate_secret_length_and_alphabet() {
        let secret = generate_secret(32);

        assert_eq!(URL_SAFE_NO_PAD.decode(&secret).unwrap().len(), 32);
        assert!(secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(secret, generate_secret(32));
    }

    #[test]
    fn test_render_issued_plain_is_token() {
        let issued = issued();
        assert_eq!(
            render_issued(&issued, "https://dash.example.com", false).unwrap(),
            issued.token
        );
    }

    #[test]
    fn test_render_issued_json() {
        let issued = issued();
        let rendered = render_issued(&issued, "https://dash.example.com/", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(
            value["url"],
            json!(format!("https://dash.example.com/upload?token={}", issued.token))
        );
        assert_eq!(value["expires_at"], json!(1_700_001_800));
        assert_eq!(value["expires_at_utc"], json!("2023-11-14T22:43:20+00:00"));
    }

    #[test]
    fn test_render_payload() {
        let rendered = render_payload(&issued().payload).unwrap();

        assert!(rendered.contains("\"creatorId\": \"creator_123\""));
        assert!(rendered.contains("\"account\": \"acct_abc\""));
    }
}
