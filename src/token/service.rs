use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::SessionClaims;
use crate::AuthError;
use crate::secret::SigningSecret;

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: SessionClaims,
    /// Exact expiry instant; `claims.exp` is this truncated to seconds.
    pub expires_at: DateTime<Utc>,
}

/// Outcome of checking a presented token.
///
/// Callers that only care whether a session exists collapse this with
/// [`Verification::into_claims`]; the rejection reason is kept for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Valid(SessionClaims),
    Invalid(AuthError),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid(_))
    }

    pub fn into_claims(self) -> Option<SessionClaims> {
        match self {
            Verification::Valid(claims) => Some(claims),
            Verification::Invalid(_) => None,
        }
    }
}

impl From<Result<SessionClaims, AuthError>> for Verification {
    fn from(result: Result<SessionClaims, AuthError>) -> Self {
        match result {
            Ok(claims) => Verification::Valid(claims),
            Err(err) => Verification::Invalid(err),
        }
    }
}

/// Signs and verifies HS256 session tokens.
#[derive(Clone)]
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionTokenService {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.expose_secret()),
            decoding_key: DecodingKey::from_secret(secret.expose_secret()),
            validation,
        }
    }

    /// Signs a token for the user that expires `lifetime` from now.
    pub fn issue(
        &self,
        user_id: &str,
        email: &str,
        lifetime: Duration,
    ) -> Result<IssuedToken, AuthError> {
        self.issue_at(user_id, email, lifetime, Utc::now())
    }

    /// Signs a token as if issued at `now`.
    pub fn issue_at(
        &self,
        user_id: &str,
        email: &str,
        lifetime: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let expires_at = now.checked_add_signed(lifetime).ok_or_else(|| {
            AuthError::ConfigurationError("session lifetime overflows the clock".to_owned())
        })?;

        let claims = SessionClaims {
            user_id: user_id.to_owned(),
            email: email.to_owned(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenSigningFailed(e.to_string()))?;

        Ok(IssuedToken {
            token,
            claims,
            expires_at,
        })
    }

    /// Decodes and validates a token, returning the claims.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let token_data =
            jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::TokenInvalid,
                })?;

        Ok(token_data.claims)
    }

    pub fn verify(&self, token: &str) -> Verification {
        self.decode(token).into()
    }
}
