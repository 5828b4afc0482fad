use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(pub String);

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(pub String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl RefreshToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens end up in log fields, keep the secret part out of them.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({})", redact(&self.0))
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefreshToken({})", redact(&self.0))
    }
}

fn redact(token: &str) -> String {
    let head: String = token.chars().take(4).collect();
    format!("{head}***")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: AccessToken(access_token.into()),
            refresh_token: RefreshToken(refresh_token.into()),
        }
    }
}

/// Body returned by `POST /oauth/token`.
#[derive(Debug, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenGrant> for TokenPair {
    fn from(grant: TokenGrant) -> Self {
        TokenPair::new(grant.access_token, grant.refresh_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token_body() {
        let token = AccessToken("abcdefghijkl".to_string());
        assert_eq!(format!("{:?}", token), "AccessToken(abcd***)");
        assert_eq!(token.bearer(), "Bearer abcdefghijkl");
    }

    #[test]
    fn token_grant_decodes_oauth_shape() {
        let grant: TokenGrant =
            serde_json::from_str(r#"{"access_token":"a1","refresh_token":"r1","expires_in":300}"#)
                .unwrap();
        let pair = TokenPair::from(grant);
        assert_eq!(pair, TokenPair::new("a1", "r1"));
    }
}
