use async_trait::async_trait;

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("request is not authenticated")]
    Unauthenticated,
}

/// caller identity attached to authenticated requests, the name lands in
/// the owner label of created objects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
}

impl Principal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// seam between the API stores and whatever identity system fronts them
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError>;
}

/// local/dev mode: every caller is root
#[derive(Debug, Default)]
pub struct RootAuthenticator;

#[async_trait]
impl Authenticator for RootAuthenticator {
    async fn authenticate(&self, _token: &str) -> Result<Principal, AuthError> {
        Ok(Principal::new("root"))
    }
}

/// fixed token-to-identity table, used by tests and single-tenant setups
#[derive(Debug, Default)]
pub struct StaticAuthenticator {
    tokens: std::collections::HashMap<String, String>,
}

impl StaticAuthenticator {
    pub fn with_token(mut self, token: impl Into<String>, name: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), name.into());
        self
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        self.tokens
            .get(token)
            .map(|name| Principal::new(name.clone()))
            .ok_or(AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod test {
    use super::{Authenticator, StaticAuthenticator};

    #[fluvio_future::test]
    async fn test_static_tokens() {
        let auth = StaticAuthenticator::default().with_token("secret", "alice");

        let principal = auth.authenticate("secret").await.expect("principal");
        assert_eq!(principal.name, "alice");

        assert!(auth.authenticate("wrong").await.is_err());
    }
}
