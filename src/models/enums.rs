//! Circulation status enums, stored as upper-case text columns

use serde::{Deserialize, Serialize};
use sqlx::{
    error::BoxDynError,
    postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef},
    Decode, Encode, Postgres,
};
use utoipa::ToSchema;

use crate::error::AppError;

/// Text conversions and SQLx TEXT/VARCHAR mapping for a closed status enum.
/// Parsing is case-insensitive; unknown values are rejected with `InvalidStatus`.
macro_rules! text_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(AppError::InvalidStatus(format!(
                        "Unknown {} value: {}",
                        stringify!($name),
                        s
                    ))),
                }
            }
        }

        impl sqlx::Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <String as sqlx::Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as sqlx::Type<Postgres>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
                let s = <&str as Decode<Postgres>>::decode(value)?;
                s.parse::<$name>().map_err(|e| e.to_string().into())
            }
        }

        impl Encode<'_, Postgres> for $name {
            fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> sqlx::encode::IsNull {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// CopyStatus
// ---------------------------------------------------------------------------

/// Availability of a single physical copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CopyStatus {
    Available,
    Borrowed,
}

text_enum!(CopyStatus {
    Available => "AVAILABLE",
    Borrowed => "BORROWED",
});

// ---------------------------------------------------------------------------
// RequestType
// ---------------------------------------------------------------------------

/// Kind of circulation request. Only borrowing requests are created today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    Borrowing,
    Returning,
}

text_enum!(RequestType {
    Borrowing => "BORROWING",
    Returning => "RETURNING",
});

// ---------------------------------------------------------------------------
// RequestStatus
// ---------------------------------------------------------------------------

/// Borrow request state. ACCEPTED and DENIED are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Denied,
}

text_enum!(RequestStatus {
    Pending => "PENDING",
    Accepted => "ACCEPTED",
    Denied => "DENIED",
});

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Loan state. Only BORROWED -> RETURNED is driven by the loan engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Borrowed,
    Returned,
    Rejected,
    Nonreturnable,
}

text_enum!(LoanStatus {
    Borrowed => "BORROWED",
    Returned => "RETURNED",
    Rejected => "REJECTED",
    Nonreturnable => "NONRETURNABLE",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("accepted".parse::<RequestStatus>().unwrap(), RequestStatus::Accepted);
        assert_eq!(" Denied ".parse::<RequestStatus>().unwrap(), RequestStatus::Denied);
        assert_eq!("returned".parse::<LoanStatus>().unwrap(), LoanStatus::Returned);
    }

    #[test]
    fn test_unknown_value_is_invalid_status() {
        let err = "LOST".parse::<LoanStatus>().unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(_)));
        assert!("".parse::<CopyStatus>().is_err());
    }

    #[test]
    fn test_serde_matches_storage_text() {
        for status in [
            LoanStatus::Borrowed,
            LoanStatus::Returned,
            LoanStatus::Rejected,
            LoanStatus::Nonreturnable,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(serde_json::to_string(&CopyStatus::Available).unwrap(), "\"AVAILABLE\"");
        assert_eq!(serde_json::to_string(&RequestType::Borrowing).unwrap(), "\"BORROWING\"");
    }
}
