//! Data models for Libris

pub mod book;
pub mod copy;
pub mod dashboard;
pub mod enums;
pub mod fine;
pub mod loan;
pub mod notification;
pub mod request;
pub mod subscription;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookShort};
pub use copy::BookCopy;
pub use enums::{CopyStatus, LoanStatus, RequestStatus, RequestType};
pub use fine::Fine;
pub use loan::{BookLoan, LoanDetails, LoanPolicy};
pub use notification::Notification;
pub use request::{BookRequest, BookRequestDetails};
pub use subscription::Subscription;
pub use user::{Authority, User, UserClaims};
