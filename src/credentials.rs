use crate::error::{Result, StudioError};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::env;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    SecretStore,
    ManualInput,
}

/// Bearer token for the inference endpoint. Only held for the current session.
pub struct Credential {
    token: SecretString,
    source: CredentialSource,
}

impl Credential {
    pub fn new(token: impl Into<String>, source: CredentialSource) -> Self {
        Self {
            token: SecretString::from(token.into()),
            source,
        }
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn expose(&self) -> &str {
        self.token.expose_secret()
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .field("source", &self.source)
            .finish()
    }
}

/// A process-wide configuration source that may hold the token.
pub trait SecretStore: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Reads secrets from the process environment (populated from `.env` at startup).
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretStore;

impl SecretStore for EnvSecretStore {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

#[derive(Debug, Default, Clone)]
pub struct MapSecretStore {
    entries: HashMap<String, String>,
}

impl MapSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl SecretStore for MapSecretStore {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Two-stage token lookup: the secret store first, then whatever the user typed.
pub struct CredentialResolver {
    store: Box<dyn SecretStore>,
    key: String,
}

impl CredentialResolver {
    pub fn new(store: impl SecretStore + 'static, key: impl Into<String>) -> Self {
        Self {
            store: Box::new(store),
            key: key.into(),
        }
    }

    /// Stage one. `None` means the page must offer the masked manual field.
    pub fn resolve(&self) -> Option<Credential> {
        match self.store.lookup(&self.key) {
            Some(token) if !token.trim().is_empty() => {
                log::debug!("Token found in secret store under {}", self.key);
                Some(Credential::new(token, CredentialSource::SecretStore))
            }
            _ => {
                log::debug!("No {} in secret store, manual entry required", self.key);
                None
            }
        }
    }

    /// Stage two. The secret store wins; otherwise a non-empty manual entry is used.
    pub fn resolve_or_manual(&self, manual: Option<&str>) -> Result<Credential> {
        if let Some(credential) = self.resolve() {
            return Ok(credential);
        }

        match manual {
            Some(token) if !token.trim().is_empty() => {
                Ok(Credential::new(token, CredentialSource::ManualInput))
            }
            _ => Err(StudioError::MissingCredential),
        }
    }

    pub fn has_secret(&self) -> bool {
        self.resolve().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver_with(token: Option<&str>) -> CredentialResolver {
        let store = match token {
            Some(token) => MapSecretStore::new().with_secret("HF_TOKEN", token),
            None => MapSecretStore::new(),
        };
        CredentialResolver::new(store, "HF_TOKEN")
    }

    #[test]
    fn secret_store_token_is_used() {
        let credential = resolver_with(Some("hf_secret")).resolve().unwrap();
        assert_eq!(credential.expose(), "hf_secret");
        assert_eq!(credential.source(), CredentialSource::SecretStore);
    }

    #[test]
    fn empty_secret_counts_as_missing() {
        assert!(resolver_with(Some("")).resolve().is_none());
        assert!(!resolver_with(Some("   ")).has_secret());
    }

    #[test]
    fn manual_entry_is_the_fallback() {
        let credential = resolver_with(None)
            .resolve_or_manual(Some("hf_typed"))
            .unwrap();
        assert_eq!(credential.expose(), "hf_typed");
        assert_eq!(credential.source(), CredentialSource::ManualInput);
    }

    #[test]
    fn secret_store_wins_over_manual_entry() {
        let credential = resolver_with(Some("hf_secret"))
            .resolve_or_manual(Some("hf_typed"))
            .unwrap();
        assert_eq!(credential.source(), CredentialSource::SecretStore);
    }

    #[test]
    fn no_token_anywhere_is_missing_credential() {
        let resolver = resolver_with(None);
        assert!(matches!(
            resolver.resolve_or_manual(None),
            Err(StudioError::MissingCredential)
        ));
        assert!(matches!(
            resolver.resolve_or_manual(Some("")),
            Err(StudioError::MissingCredential)
        ));
    }

    #[test]
    fn debug_output_hides_token() {
        let credential = Credential::new("hf_topsecret", CredentialSource::ManualInput);
        let printed = format!("{:?}", credential);
        assert!(!printed.contains("hf_topsecret"));
        assert_eq!(credential.bearer_header(), "Bearer hf_topsecret");
    }
}
