/**
 * Session Management and JWT Tokens
 *
 * Bearer tokens are HS256 JWTs binding an account id to an issuance time and
 * an expiry. The signing secret comes from configuration and lives in a
 * `TokenService` owned by the application state.
 */

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::account::Role;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Account ID
    pub sub: String,
    /// Display name at issuance
    pub name: String,
    /// Role at issuance; informational, the store stays authoritative
    pub role: Role,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    /// Account id carried in `sub`
    pub fn account_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Issues and verifies bearer tokens
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs: ttl_hours.saturating_mul(60 * 60),
        }
    }

    /// Create a token for an account, valid from now
    pub fn issue(&self, account_id: Uuid, name: &str, role: Role) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(account_id, name, role, unix_now())
    }

    /// Create a token as if issued at `iat`
    pub fn issue_at(
        &self,
        account_id: Uuid,
        name: &str,
        role: Role,
        iat: u64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: account_id.to_string(),
            name: name.to_string(),
            role,
            exp: iat.saturating_add(self.ttl_secs),
            iat,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify signature and expiry and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(token_data.claims)
    }
}

fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}
