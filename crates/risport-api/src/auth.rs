use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Application user credentials for the RisPort70 service.
///
/// RisPort70 only understands HTTP basic authentication. The password stays
/// wrapped in a [`SecretString`] until the header is encoded.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Encode as an `Authorization: Basic ...` header value.
    ///
    /// The value is marked sensitive so it never shows up in debug output.
    pub fn basic_auth_header(&self) -> Result<HeaderValue, Error> {
        let raw = format!("{}:{}", self.username, self.password.expose_secret());
        let encoded = STANDARD.encode(raw.as_bytes());
        let mut value =
            HeaderValue::from_str(&format!("Basic {encoded}")).map_err(|e| Error::InvalidHeader {
                name: "Authorization".into(),
                reason: e.to_string(),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_basic_auth() {
        let creds = Credentials::new("administrator", "ciscopsdt".to_string());
        let header = creds.basic_auth_header().expect("valid header");
        assert_eq!(header.to_str().ok(), Some("Basic YWRtaW5pc3RyYXRvcjpjaXNjb3BzZHQ="));
        assert!(header.is_sensitive());
    }
}
