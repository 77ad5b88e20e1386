// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Compact token encoding and decoding (JWT, HS256).
//!
//! A token is three base64url segments separated by `.`: header, claims
//! payload, HMAC-SHA256 signature. The signature is verified before any
//! claim is parsed, so an attacker-supplied `exp` is never honored without
//! a valid signature.

use base64ct::{Base64, Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Minimum accepted key length for HS256 (256 bits).
const MIN_KEY_BYTES: usize = 32;

/// Error building a signing key from its configured value.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("signing secret is not valid base64")]
    InvalidEncoding,
    #[error("signing secret must be at least {MIN_KEY_BYTES} bytes, got {0}")]
    TooShort(usize),
}

/// Symmetric HMAC-SHA256 signing key.
///
/// Loaded once at startup from a base64-encoded configuration value and
/// shared read-only by all concurrent validations. The key material is
/// never logged or serialized; `Debug` is redacted.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Decode a base64-encoded symmetric secret.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyError> {
        let bytes = Base64::decode_vec(encoded.trim()).map_err(|_| KeyError::InvalidEncoding)?;
        if bytes.len() < MIN_KEY_BYTES {
            return Err(KeyError::TooShort(bytes.len()));
        }
        Ok(Self(bytes))
    }

    /// Build a key from raw bytes. Intended for tests and embedding.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, KeyError> {
        let bytes = bytes.into();
        if bytes.len() < MIN_KEY_BYTES {
            return Err(KeyError::TooShort(bytes.len()));
        }
        Ok(Self(bytes))
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

/// Token header. Only HS256 is issued or accepted.
#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    typ: Option<String>,
}

/// Claims carried inside a token.
///
/// The core relies only on `sub` and `exp`; extra claims attached at
/// issuance survive the round trip in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (canonical identity identifier)
    pub sub: String,

    /// Issued-at timestamp (Unix seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,

    /// Any additional claims attached at issuance
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    /// Session hint (`sid` claim), if one was attached at issuance.
    pub fn session_hint(&self) -> Option<&str> {
        self.extra.get("sid").and_then(serde_json::Value::as_str)
    }
}

/// Encodes an identity into a compact signed token and decodes a token
/// back into its claims.
pub struct TokenCodec {
    key: SigningKey,
    ttl_seconds: i64,
}

impl TokenCodec {
    pub fn new(key: SigningKey, ttl_seconds: i64) -> Self {
        Self { key, ttl_seconds }
    }

    /// Issue a token for `subject` valid for the configured lifetime.
    ///
    /// Deterministic given identical inputs and clock.
    pub fn generate(
        &self,
        subject: &str,
        extra: serde_json::Map<String, serde_json::Value>,
        now: i64,
    ) -> String {
        let header = Header {
            alg: "HS256".to_string(),
            typ: Some("JWT".to_string()),
        };
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
            extra,
        };

        let header_json = serde_json::to_vec(&header).expect("header serializes to JSON");
        let claims_json = serde_json::to_vec(&claims).expect("claims serialize to JSON");

        let signing_input = format!(
            "{}.{}",
            Base64UrlUnpadded::encode_string(&header_json),
            Base64UrlUnpadded::encode_string(&claims_json),
        );
        let signature = self.sign(&signing_input);

        format!(
            "{signing_input}.{}",
            Base64UrlUnpadded::encode_string(&signature)
        )
    }

    /// Verify a token and return its claims.
    ///
    /// Fails with `MalformedToken` if the structure cannot be parsed, with
    /// `InvalidSignature` if the signature does not verify against the
    /// signing key, and with `TokenExpired` if `exp` is at or before `now`.
    pub fn decode(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let (signing_input, signature_b64) =
            token.rsplit_once('.').ok_or(AuthError::MalformedToken)?;
        let (header_b64, claims_b64) = signing_input
            .split_once('.')
            .ok_or(AuthError::MalformedToken)?;
        if header_b64.is_empty() || claims_b64.is_empty() || claims_b64.contains('.') {
            return Err(AuthError::MalformedToken);
        }

        // Signature first: nothing in the payload is trusted until it verifies.
        let signature = Base64UrlUnpadded::decode_vec(signature_b64)
            .map_err(|_| AuthError::InvalidSignature)?;
        let mut mac = HmacSha256::new_from_slice(&self.key.0)
            .map_err(|_| AuthError::InvalidSignature)?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        let header_json = Base64UrlUnpadded::decode_vec(header_b64)
            .map_err(|_| AuthError::MalformedToken)?;
        let header: Header =
            serde_json::from_slice(&header_json).map_err(|_| AuthError::MalformedToken)?;
        if header.alg != "HS256" {
            return Err(AuthError::MalformedToken);
        }

        let claims_json = Base64UrlUnpadded::decode_vec(claims_b64)
            .map_err(|_| AuthError::MalformedToken)?;
        let claims: Claims =
            serde_json::from_slice(&claims_json).map_err(|_| AuthError::MalformedToken)?;

        if claims.exp <= now {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }

    fn sign(&self, signing_input: &str) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.key.0).expect("HMAC accepts keys of any length");
        mac.update(signing_input.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}
