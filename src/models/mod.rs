//! Data models

pub mod distortion;
pub mod session;
pub mod thought;
pub mod user;

pub use distortion::{Distortion, DISTORTIONS};
pub use session::Session;
pub use thought::{DateRange, NewThought, Thought, MAX_CONTENT_LEN, MAX_INTENSITY, MIN_INTENSITY};
pub use user::{is_valid_email, User};
