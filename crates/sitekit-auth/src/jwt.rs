//! Token creation and verification.
//!
//! HMAC algorithms (`HS256`, `HS384`, `HS512`) sign with `JWT_SECRET_KEY`.
//! Asymmetric algorithms need `JWT_PRIVATE_KEY` to sign and `JWT_PUBLIC_KEY`
//! to verify, both PEM encoded.

use std::str::FromStr;

use chrono::Utc;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use sitekit_config::JwtConfig;
use sitekit_core::AppError;

use crate::claims::Claims;
use crate::error::AuthFailure;
use crate::token::Identity;

fn algorithm(jwt_config: &JwtConfig) -> Result<Algorithm, AuthFailure> {
    Algorithm::from_str(jwt_config.algorithm.trim())
        .map_err(|_| AuthFailure::MisconfiguredKey(jwt_config.algorithm.clone()))
}

fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}

fn encoding_key(jwt_config: &JwtConfig, algorithm: Algorithm) -> Result<EncodingKey, JwtError> {
    if is_hmac(algorithm) {
        return Ok(EncodingKey::from_secret(jwt_config.secret.as_bytes()));
    }
    let pem = jwt_config
        .private_key
        .as_deref()
        .ok_or(JwtError::from(ErrorKind::InvalidKeyFormat))?
        .as_bytes();

    match algorithm {
        Algorithm::ES256 | Algorithm::ES384 => EncodingKey::from_ec_pem(pem),
        Algorithm::EdDSA => EncodingKey::from_ed_pem(pem),
        _ => EncodingKey::from_rsa_pem(pem),
    }
}

fn decoding_key(jwt_config: &JwtConfig, algorithm: Algorithm) -> Result<DecodingKey, JwtError> {
    if is_hmac(algorithm) {
        return Ok(DecodingKey::from_secret(jwt_config.secret.as_bytes()));
    }
    let pem = jwt_config
        .public_key
        .as_deref()
        .ok_or(JwtError::from(ErrorKind::InvalidKeyFormat))?
        .as_bytes();

    match algorithm {
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(pem),
        Algorithm::EdDSA => DecodingKey::from_ed_pem(pem),
        _ => DecodingKey::from_rsa_pem(pem),
    }
}

/// Issues a session token for `user_id`, valid for `access_token_expiry` seconds.
pub fn create_access_token(user_id: i64, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let algorithm = algorithm(jwt_config).map_err(AppError::internal)?;
    let now = Utc::now().timestamp();

    let claims = Claims {
        user_id,
        iat: now,
        exp: now + jwt_config.access_token_expiry,
        aud: jwt_config.audience.clone(),
        iss: jwt_config.issuer.clone(),
    };

    let key = encoding_key(jwt_config, algorithm).map_err(AppError::internal)?;
    encode(&Header::new(algorithm), &claims, &key).map_err(AppError::internal)
}

/// Checks signature, expiry (with leeway), and the optional audience/issuer,
/// then decodes the claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AuthFailure> {
    let algorithm = algorithm(jwt_config)?;
    let key = decoding_key(jwt_config, algorithm)
        .map_err(|_| AuthFailure::MisconfiguredKey(jwt_config.algorithm.clone()))?;

    let mut validation = Validation::new(algorithm);
    validation.leeway = jwt_config.leeway;
    validation.validate_exp = jwt_config.verify_expiration;
    match &jwt_config.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }
    if let Some(issuer) = &jwt_config.issuer {
        validation.set_issuer(&[issuer]);
    }

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthFailure::Expired,
            _ => AuthFailure::Invalid(e.to_string()),
        })
}

/// Resolves a raw bearer token into the identity it was issued for.
pub fn authenticate_bearer(token: &str, jwt_config: &JwtConfig) -> Result<Identity, AuthFailure> {
    if token.is_empty() {
        return Err(AuthFailure::Invalid("empty bearer token".to_string()));
    }
    let claims = verify_token(token, jwt_config)?;
    Ok(Identity {
        user_id: claims.user_id,
    })
}
