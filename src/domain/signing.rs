use crate::error::{ApnsError, Result};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

/// A P-256 private key imported from PEM, usable only for ES256 signing.
///
/// Constructed once at provider initialization and immutable afterwards; an
/// import failure is fatal to provider construction.
pub struct SigningKey {
    key: EncodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct ProbeClaims {
    iat: u64,
}

impl SigningKey {
    /// Imports a PEM-encoded PKCS8 elliptic-curve private key.
    ///
    /// # Errors
    /// Returns [`ApnsError::KeyImport`] if the PEM is malformed, the key is
    /// not an EC private key, or the curve is not P-256.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let key = EncodingKey::from_ec_pem(pem.as_bytes()).map_err(ApnsError::KeyImport)?;

        // A wrong-curve key is only rejected when it is used, so sign a
        // throwaway token here to surface every failure mode at import.
        jsonwebtoken::encode(&Header::new(Algorithm::ES256), &ProbeClaims { iat: 0 }, &key)
            .map_err(ApnsError::KeyImport)?;

        Ok(Self { key })
    }

    pub(crate) const fn encoding_key(&self) -> &EncodingKey {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P256_PEM: &str = include_str!("../../tests/fixtures/p256.pem");
    const P384_PEM: &str = include_str!("../../tests/fixtures/p384.pem");

    #[test]
    fn test_import_valid_p256_key() {
        assert!(SigningKey::from_pem(P256_PEM).is_ok());
    }

    #[test]
    fn test_import_malformed_pem() {
        let result = SigningKey::from_pem("not a pem at all");
        assert!(matches!(result, Err(ApnsError::KeyImport(_))));
    }

    #[test]
    fn test_import_truncated_pem() {
        let truncated = &P256_PEM[..P256_PEM.len() / 2];
        assert!(matches!(SigningKey::from_pem(truncated), Err(ApnsError::KeyImport(_))));
    }

    #[test]
    fn test_import_unsupported_curve() {
        // P-384 is a valid EC key but APNs mandates P-256.
        assert!(matches!(SigningKey::from_pem(P384_PEM), Err(ApnsError::KeyImport(_))));
    }
}
