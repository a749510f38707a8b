//! Repository layer
//!
//! Repositories encapsulate all SQL for a given entity behind a trait,
//! with separate SQLite and MySQL implementations selected by the pool's
//! driver. Services depend on the traits only.

pub mod session;
pub mod thought;
pub mod user;

pub use session::{SessionRepository, SqlxSessionRepository};
pub use thought::{SqlxThoughtRepository, ThoughtRepository};
pub use user::{SqlxUserRepository, UserRepository};
