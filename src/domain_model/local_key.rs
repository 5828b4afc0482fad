use std::fmt;

/// Reserved keys of the secure store. Each one holds an independently
/// encrypted blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalKey {
    User,
    AccessToken,
    RefreshToken,
}

impl LocalKey {
    pub const ALL: [LocalKey; 3] = [LocalKey::User, LocalKey::AccessToken, LocalKey::RefreshToken];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocalKey::User => "user",
            LocalKey::AccessToken => "access_token",
            LocalKey::RefreshToken => "refresh_token",
        }
    }
}

impl AsRef<str> for LocalKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LocalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
