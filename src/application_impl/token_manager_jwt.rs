use crate::application_port::{AccountError, TokenManager};
use crate::domain_model::{User, UserId};
use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub signing_key: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: String, // user id
    exp: i64,
    iat: i64,
    iss: String,
    aud: String,
    jti: String,
}

const REFRESH_TOKEN_BYTES: usize = 32;

pub struct JwtTokenManager {
    cfg: JwtConfig,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtTokenManager {
    pub fn new(cfg: JwtConfig) -> Self {
        let encoding = EncodingKey::from_secret(&cfg.signing_key);
        let decoding = DecodingKey::from_secret(&cfg.signing_key);
        JwtTokenManager {
            cfg,
            encoding,
            decoding,
        }
    }

    fn claims_for(&self, user_id: UserId) -> Result<AccessClaims, AccountError> {
        let iat = Utc::now();
        let exp = chrono::Duration::from_std(self.cfg.access_ttl)
            .ok()
            .and_then(|ttl| iat.checked_add_signed(ttl))
            .ok_or_else(|| AccountError::Internal("access token ttl out of range".into()))?;
        Ok(AccessClaims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: iat.timestamp(),
            iss: self.cfg.issuer.clone(),
            aud: self.cfg.audience.clone(),
            jti: uuid::Uuid::new_v4().to_string(),
        })
    }

    fn encode_claims(&self, claims: &AccessClaims) -> Result<String, AccountError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AccountError::Internal(e.to_string()))
    }

    fn decode_claims(&self, token: &str) -> Result<AccessClaims, AccountError> {
        let mut v = Validation::new(Algorithm::HS256);
        v.validate_exp = true;
        v.set_audience(&[self.cfg.audience.as_str()]);
        v.set_issuer(&[self.cfg.issuer.as_str()]);
        let data = decode::<AccessClaims>(token, &self.decoding, &v).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AccountError::TokenExpired,
            _ => AccountError::TokenInvalid,
        })?;
        Ok(data.claims)
    }
}

#[async_trait::async_trait]
impl TokenManager for JwtTokenManager {
    async fn generate_token(&self, user: &User) -> Result<String, AccountError> {
        let claims = self.claims_for(user.id)?;
        self.encode_claims(&claims)
    }

    async fn parse_token(&self, token: &str) -> Result<UserId, AccountError> {
        let claims = self.decode_claims(token)?;
        claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AccountError::TokenInvalid)
    }

    fn new_refresh_token(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn manager(key: &str) -> JwtTokenManager {
        JwtTokenManager::new(JwtConfig {
            issuer: "turnstile.test".into(),
            audience: "turnstile-clients".into(),
            access_ttl: Duration::from_secs(900),
            signing_key: key.as_bytes().to_vec(),
        })
    }

    fn user() -> User {
        User {
            id: UserId::new(),
            name: "ada".into(),
            email: "ada@example.com".into(),
            password: "$argon2id$x".into(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn token_round_trips_to_subject() {
        let m = manager("k1");
        let u = user();
        let token = m.generate_token(&u).await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(m.parse_token(&token).await.unwrap(), u.id);
    }

    #[tokio::test]
    async fn foreign_key_is_rejected() {
        let token = manager("k1").generate_token(&user()).await.unwrap();
        let err = manager("k2").parse_token(&token).await.unwrap_err();
        assert!(matches!(err, AccountError::TokenInvalid));
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        let err = manager("k1").parse_token("not.a.jwt").await.unwrap_err();
        assert!(matches!(err, AccountError::TokenInvalid));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let m = manager("k1");
        let mut claims = m.claims_for(UserId::new()).unwrap();
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;
        let token = m.encode_claims(&claims).unwrap();

        let err = m.parse_token(&token).await.unwrap_err();
        assert!(matches!(err, AccountError::TokenExpired));
    }

    #[tokio::test]
    async fn non_uuid_subject_is_invalid() {
        let m = manager("k1");
        let mut claims = m.claims_for(UserId::new()).unwrap();
        claims.sub = "root".into();
        let token = m.encode_claims(&claims).unwrap();

        let err = m.parse_token(&token).await.unwrap_err();
        assert!(matches!(err, AccountError::TokenInvalid));
    }

    #[tokio::test]
    async fn oversized_ttl_is_an_error() {
        let m = JwtTokenManager::new(JwtConfig {
            access_ttl: Duration::from_secs(u64::MAX),
            ..manager("k1").cfg
        });

        let err = m.generate_token(&user()).await.unwrap_err();
        assert!(matches!(err, AccountError::Internal(_)));
    }

    #[test]
    fn refresh_tokens_are_random_hex() {
        let m = manager("k1");
        let a = m.new_refresh_token();
        let b = m.new_refresh_token();
        assert_eq!(a.len(), REFRESH_TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
