use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};
use crate::entities::token::{Claims, TokenPair, TokenType};
use crate::settings::{AppConfig, JwtKeys};
use crate::errors::AuthError;

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

/// Issues and verifies bearer tokens. Built at startup; no route requires a token yet.
#[derive(Clone, Debug)]
pub struct JwtService {
    keys: JwtKeys,
    access_expiration: Duration,
    refresh_expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            access_expiration: Duration::minutes(config.jwt_expiration_minutes),
            refresh_expiration: Duration::days(config.refresh_token_exp_days),
        }
    }

    pub fn create_access_token(&self, subject: &str) -> Result<String, AuthError> {
        self.create_token(subject, TokenType::Access, self.access_expiration)
    }

    pub fn create_refresh_token(&self, subject: &str) -> Result<String, AuthError> {
        self.create_token(subject, TokenType::Refresh, self.refresh_expiration)
    }

    pub fn create_token_pair(&self, subject: &str) -> Result<TokenPair, AuthError> {
        Ok(TokenPair::new(
            self.create_access_token(subject)?,
            self.create_refresh_token(subject)?,
        ))
    }

    /// Decodes a token and checks that it is of the expected kind.
    pub fn decode_token(&self, token: &str, expected: TokenType) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.keys.decoding, &validation)?;

        if data.claims.token_type != expected {
            return Err(AuthError::InvalidToken);
        }
        Ok(data)
    }

    fn create_token(&self, subject: &str, token_type: TokenType, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + ttl).timestamp() as usize;

        let claims = Claims {
            sub: subject.to_string(),
            token_type,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }
}
