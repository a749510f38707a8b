//! Cognitive distortion taxonomy endpoint
//!
//! GET /api/distortions serves the static taxonomy the client uses to
//! populate its picker. Public, no session required.

use axum::Json;

use crate::models::{Distortion, DISTORTIONS};

/// GET /api/distortions - The cognitive distortion taxonomy
pub async fn list_distortions() -> Json<&'static [Distortion]> {
    Json(DISTORTIONS)
}
