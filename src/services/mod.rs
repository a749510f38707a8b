//! Services layer - Business logic
//!
//! This module contains all business logic services for the reframe
//! backend. Services are responsible for:
//! - Implementing business rules
//! - Coordinating between repositories
//! - Handling validation and error cases

pub mod analytics;
pub mod export;
pub mod password;
pub mod rate_limiter;
pub mod thought;
pub mod user;

pub use analytics::{summarize, AnalyticsSummary, CategoryCount, DateFilter};
pub use export::{to_csv, CSV_HEADER};
pub use password::{hash_password, verify_password};
pub use rate_limiter::RateLimiter;
pub use thought::{parse_date_range, ThoughtService, ThoughtServiceError};
pub use user::{AuthService, AuthServiceError, LoginInput, SignupInput, MIN_PASSWORD_LEN};
