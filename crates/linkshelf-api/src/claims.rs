//! Reading the payload of activation and password-reset tokens.
//!
//! The activation page greets the user by the name embedded in the token
//! before anything is sent to the backend. Only the backend can verify a
//! token, so this just decodes the middle segment of the JWT.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// The claims Linkshelf reads out of a token. Unknown claims are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Expiry, in seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<u64>,
    /// Subject user id, present on session tokens.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
}

impl TokenClaims {
    /// `true` if the token carries an expiry at or before `now` (Unix
    /// seconds). A token without `exp` never expires as far as we can tell.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }
}

/// Decodes the payload of a `header.payload.signature` token.
///
/// Returns `None` for anything that isn't three dot-separated segments with
/// a base64url JSON object in the middle. The signature is not checked.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return None;
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    match serde_json::from_slice(&bytes) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "token payload is not a claims object");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    #[test]
    fn test_decode_claims_reads_activation_payload() {
        let claims = decode_claims(&token(
            r#"{"name":"Ada","email":"ada@example.com","password":"x","iat":1,"exp":1700000000}"#,
        ))
        .unwrap();

        assert_eq!(claims.name, "Ada");
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
        assert_eq!(claims.exp, Some(1_700_000_000));
        assert_eq!(claims.id, None);
    }

    #[test]
    fn test_decode_claims_reads_session_subject() {
        let claims = decode_claims(&token(r#"{"_id":"u1"}"#)).unwrap();
        assert_eq!(claims.id.as_deref(), Some("u1"));
        assert!(claims.name.is_empty());
    }

    #[test]
    fn test_decode_claims_malformed_is_none() {
        assert_eq!(decode_claims(""), None);
        assert_eq!(decode_claims("only-one-segment"), None);
        assert_eq!(decode_claims("a.b"), None);
        assert_eq!(decode_claims("a.b.c.d"), None);
        assert_eq!(decode_claims("a.!!!.c"), None);
        // Valid base64, but not JSON.
        assert_eq!(decode_claims(&format!("a.{}.c", URL_SAFE_NO_PAD.encode("hello"))), None);
    }

    #[test]
    fn test_decode_claims_tolerates_padding() {
        let payload = format!("{}==", URL_SAFE_NO_PAD.encode(r#"{"name":"Al"}"#));
        let claims = decode_claims(&format!("h.{payload}.s")).unwrap();
        assert_eq!(claims.name, "Al");
    }

    #[test]
    fn test_is_expired_at() {
        let claims = TokenClaims {
            exp: Some(100),
            ..TokenClaims::default()
        };
        assert!(!claims.is_expired_at(99));
        assert!(claims.is_expired_at(100));
        assert!(!TokenClaims::default().is_expired_at(u64::MAX));
    }
}
