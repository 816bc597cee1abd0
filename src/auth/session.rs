use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::{AuthError, Role, SessionClaims, SessionUser};

/// Name of the signed session cookie.
pub const SESSION_COOKIE: &str = "fitclub_session";

/// Issues and validates the signed session cookie.
///
/// The cookie value is an HS256 token carrying `{user id, role, name}`;
/// tampering with any of them invalidates the signature.
#[derive(Clone)]
pub struct SessionSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: Duration,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner")
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .finish()
    }
}

impl SessionSigner {
    /// Create a signer from the configured session secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl: Duration::hours(12),
        }
    }

    /// Sign a session token for an authenticated user.
    pub fn issue(&self, user: &SessionUser) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + self.session_ttl;

        let claims = SessionClaims {
            sub: user.id.to_string(),
            role: user.role,
            name: user.name.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AuthError::Token)
    }

    /// Validate a session token and recover the user it was issued for.
    pub fn validate(&self, token: &str) -> Result<SessionUser, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidSession,
            })?;

        let id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| AuthError::InvalidSession)?;

        Ok(SessionUser {
            id,
            role: claims.role,
            name: claims.name,
        })
    }

    /// Build the session cookie around a signed token.
    pub fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Cookie used to clear the session on logout.
    pub fn clear_cookie() -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> SessionUser {
        SessionUser {
            id: 42,
            role: Role::Member,
            name: "Alice Example".to_string(),
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let signer = SessionSigner::new("test_secret");
        let token = signer.issue(&test_user()).unwrap();
        let user = signer.validate(&token).unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.role, Role::Member);
        assert_eq!(user.name, "Alice Example");
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let signer = SessionSigner::new("test_secret");
        let token = signer.issue(&test_user()).unwrap();

        let mut tampered = token.clone();
        tampered.push('x');
        assert!(signer.validate(&tampered).is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let signer = SessionSigner::new("test_secret");
        let other = SessionSigner::new("another_secret");
        let token = signer.issue(&test_user()).unwrap();

        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn test_cookie_attributes() {
        let signer = SessionSigner::new("test_secret");
        let cookie = signer.cookie("token".to_string());

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
