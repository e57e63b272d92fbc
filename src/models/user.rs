//! User model, authorities and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;

/// User as mirrored from the identity service
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Permissions carried in a token's `authorities` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    BookCreate,
    BookUpdate,
    LoanRead,
    LoanApprove,
    LoanReturn,
    FineManage,
    DashboardView,
}

impl Authority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Authority::BookCreate => "BOOK_CREATE",
            Authority::BookUpdate => "BOOK_UPDATE",
            Authority::LoanRead => "LOAN_READ",
            Authority::LoanApprove => "LOAN_APPROVE",
            Authority::LoanReturn => "LOAN_RETURN",
            Authority::FineManage => "FINE_MANAGE",
            Authority::DashboardView => "DASHBOARD_VIEW",
        }
    }
}

impl std::fmt::Display for Authority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Username
    pub sub: String,
    pub user_id: i32,
    /// Authority names granted by the identity service. Names this server
    /// does not know about are kept and simply never match.
    #[serde(default)]
    pub authorities: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn has(&self, authority: Authority) -> bool {
        self.authorities.iter().any(|a| a == authority.as_str())
    }

    /// Require a specific authority
    pub fn require(&self, authority: Authority) -> Result<(), AppError> {
        if self.has(authority) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("Missing authority {}", authority)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(authorities: &[&str]) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            sub: "reader".to_string(),
            user_id: 42,
            authorities: authorities.iter().map(|a| a.to_string()).collect(),
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn test_require_authority() {
        let c = claims(&["LOAN_READ", "USER_BAN"]);
        assert!(c.require(Authority::LoanRead).is_ok());
        assert!(matches!(
            c.require(Authority::LoanApprove),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_token_round_trip() {
        let c = claims(&["FINE_MANAGE"]);
        let token = c.create_token("secret").unwrap();
        let decoded = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(decoded.user_id, 42);
        assert!(decoded.has(Authority::FineManage));
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut c = claims(&[]);
        c.exp = Utc::now().timestamp() - 3600;
        let token = c.create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "secret").is_err());
    }
}
