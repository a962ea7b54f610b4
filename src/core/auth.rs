//! Request authentication.
//!
//! OpenSprinkler takes the lowercase hex MD5 of the device password as the
//! `pw` query parameter on every call. There is no login step or session.

use md5::{Digest, Md5};

#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn from_password(password: &str) -> Self {
        let mut hasher = Md5::new();
        hasher.update(password.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}
