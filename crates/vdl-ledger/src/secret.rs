use k256::ecdsa::SigningKey;

use crate::error::{LedgerError, LedgerResult};

/// Source of the notary's signing key.
///
/// Key material is injected, never embedded in source or configuration
/// files, and implementations must not expose it through `Debug`, logs, or
/// serialization.
pub trait SecretProvider: Send + Sync {
    /// Produce the signing key.
    fn signing_key(&self) -> LedgerResult<SigningKey>;
}

/// Reads a hex-encoded secp256k1 key from an environment variable.
pub struct EnvSecretProvider {
    var: String,
}

impl EnvSecretProvider {
    /// Provider reading from the given environment variable.
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// The environment variable consulted.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl SecretProvider for EnvSecretProvider {
    fn signing_key(&self) -> LedgerResult<SigningKey> {
        let raw = std::env::var(&self.var)
            .map_err(|_| LedgerError::MissingSecret(self.var.clone()))?;
        parse_key_hex(&raw)
    }
}

impl std::fmt::Debug for EnvSecretProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only the variable name; never the material behind it.
        f.debug_struct("EnvSecretProvider").field("var", &self.var).finish()
    }
}

/// Holds a key directly. For tests and embedding.
pub struct StaticSecretProvider {
    key: SigningKey,
}

impl StaticSecretProvider {
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }
}

impl SecretProvider for StaticSecretProvider {
    fn signing_key(&self) -> LedgerResult<SigningKey> {
        Ok(self.key.clone())
    }
}

impl std::fmt::Debug for StaticSecretProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticSecretProvider(<redacted>)")
    }
}

/// Decode a 32-byte secp256k1 key from hex, tolerating a `0x` prefix.
pub fn parse_key_hex(raw: &str) -> LedgerResult<SigningKey> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(stripped).map_err(|e| LedgerError::InvalidKey(e.to_string()))?;
    SigningKey::from_slice(&bytes).map_err(|e| LedgerError::InvalidKey(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY_HEX: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn parses_with_and_without_prefix() {
        assert!(parse_key_hex(TEST_KEY_HEX).is_ok());
        assert!(parse_key_hex(&format!("0x{TEST_KEY_HEX}")).is_ok());
    }

    #[test]
    fn rejects_bad_material() {
        assert!(matches!(parse_key_hex("zz"), Err(LedgerError::InvalidKey(_))));
        assert!(matches!(parse_key_hex("abcd"), Err(LedgerError::InvalidKey(_))));
    }

    #[test]
    fn missing_env_var_is_reported() {
        let provider = EnvSecretProvider::new("VDL_TEST_KEY_THAT_DOES_NOT_EXIST");
        assert!(matches!(
            provider.signing_key(),
            Err(LedgerError::MissingSecret(_))
        ));
    }

    #[test]
    fn debug_never_prints_key_material() {
        let key = parse_key_hex(TEST_KEY_HEX).unwrap();
        let debug = format!("{:?}", StaticSecretProvider::new(key));
        assert!(!debug.contains(&TEST_KEY_HEX[..8]));
    }
}
