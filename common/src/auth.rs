use chrono::Utc;
use jsonwebtoken::{
    decode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use mongodb::bson::oid::ObjectId;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{
    constants::DURATION,
    error::{self, AddCode},
};

pub static ENCODING_KEY: Lazy<EncodingKey> = Lazy::new(|| {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    EncodingKey::from_secret(secret.as_bytes())
});

pub static DECODING_KEY: Lazy<DecodingKey> = Lazy::new(|| {
    let secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    DecodingKey::from_secret(secret.as_bytes())
});

#[derive(Debug, Clone, PartialEq)]
pub enum Auth {
    Admin(ObjectId),
    User(ObjectId),
    None,
}

impl Auth {
    pub fn id(&self) -> Option<ObjectId> {
        match self {
            Auth::Admin(id) => Some(*id),
            Auth::User(id) => Some(*id),
            Auth::None => None,
        }
    }

    pub fn full_access(&self) -> bool {
        matches!(self, Auth::Admin(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    role: Role,
    user_id: String,
    exp: i64,
}

impl Auth {
    /// Returns `Ok(None)` for an expired token, `Err` for a garbled one.
    pub fn from_token(token: &str) -> error::Result<Option<Self>> {
        match decode::<Claims>(token, &DECODING_KEY, &Validation::new(Algorithm::HS512)) {
            Ok(data) => {
                let claims = data.claims;
                let id = claims.user_id.parse()?;
                Ok(Some(match claims.role {
                    Role::Admin => Auth::Admin(id),
                    Role::User => Auth::User(id),
                }))
            }
            Err(err) if matches!(err.kind(), ErrorKind::ExpiredSignature) => Ok(None),
            Err(err) => Err(anyhow::anyhow!("Error parsing token: {}", err).code(401)),
        }
    }

    pub fn to_token(&self) -> error::Result<String> {
        let header = Header {
            alg: Algorithm::HS512,
            ..Default::default()
        };
        let exp = Utc::now().timestamp() + DURATION.num_seconds();
        let claims = match self {
            Auth::Admin(id) => Claims {
                role: Role::Admin,
                user_id: id.to_hex(),
                exp,
            },
            Auth::User(id) => Claims {
                role: Role::User,
                user_id: id.to_hex(),
                exp,
            },
            Auth::None => {
                return Err(anyhow::anyhow!("Cannot create token for Auth::None").code(500))
            }
        };

        let token = match jsonwebtoken::encode(&header, &claims, &ENCODING_KEY) {
            Ok(t) => t,
            Err(_) => return Err(anyhow::anyhow!("Failed to encode token").code(500)),
        };
        Ok(token)
    }
}
