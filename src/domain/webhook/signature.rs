//! Messenger webhook signature verification.
//!
//! The platform signs every delivery with the app secret. `X-Hub-Signature`
//! carries `sha1=<hex>` (HMAC-SHA1 over the raw body); newer deliveries also
//! carry `X-Hub-Signature-256: sha256=<hex>`, which is preferred when present.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::WebhookError;

/// Header carrying the HMAC-SHA1 signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature";

/// Header carrying the HMAC-SHA256 signature.
pub const SIGNATURE_256_HEADER: &str = "x-hub-signature-256";

/// Supported signing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    Sha1,
    Sha256,
}

/// Parsed `<algorithm>=<hex digest>` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub algorithm: SignatureAlgorithm,
    pub digest: Vec<u8>,
}

impl SignatureHeader {
    /// Parses a signature header value such as `sha1=8f3c...`.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let (method, hash) = header
            .trim()
            .split_once('=')
            .ok_or_else(|| WebhookError::MalformedSignature("expected <method>=<hash>".into()))?;

        let algorithm = match method {
            "sha1" => SignatureAlgorithm::Sha1,
            "sha256" => SignatureAlgorithm::Sha256,
            other => {
                return Err(WebhookError::MalformedSignature(format!(
                    "unsupported method {}",
                    other
                )))
            }
        };

        let digest = hex::decode(hash)
            .map_err(|_| WebhookError::MalformedSignature("digest is not hex".into()))?;

        Ok(Self { algorithm, digest })
    }
}

/// Verifier for Messenger webhook signatures.
pub struct SignatureVerifier {
    app_secret: SecretString,
}

impl SignatureVerifier {
    pub fn new(app_secret: impl Into<String>) -> Self {
        Self {
            app_secret: SecretString::new(app_secret.into()),
        }
    }

    /// Verifies a delivery given the values of both signature headers.
    ///
    /// The SHA-256 header wins when both are present.
    pub fn verify(
        &self,
        sha256_header: Option<&str>,
        sha1_header: Option<&str>,
        body: &[u8],
    ) -> Result<(), WebhookError> {
        let header = sha256_header
            .or(sha1_header)
            .ok_or(WebhookError::MissingSignature)?;
        let header = SignatureHeader::parse(header)?;

        let expected = self.compute(header.algorithm, body)?;

        if !constant_time_compare(&expected, &header.digest) {
            tracing::warn!(
                algorithm = ?header.algorithm,
                body_len = body.len(),
                "Webhook signature mismatch"
            );
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }

    fn compute(&self, algorithm: SignatureAlgorithm, body: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let key = self.app_secret.expose_secret().as_bytes();
        let digest = match algorithm {
            SignatureAlgorithm::Sha1 => {
                let mut mac = Hmac::<Sha1>::new_from_slice(key)
                    .map_err(|_| WebhookError::InvalidSignature)?;
                mac.update(body);
                mac.finalize().into_bytes().to_vec()
            }
            SignatureAlgorithm::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(key)
                    .map_err(|_| WebhookError::InvalidSignature)?;
                mac.update(body);
                mac.finalize().into_bytes().to_vec()
            }
        };
        Ok(digest)
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a `sha1=<hex>` header value for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha1>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(body);
    format!("sha1={}", hex::encode(mac.finalize().into_bytes()))
}
