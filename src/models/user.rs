// SPDX-License-Identifier: MIT

//! Persisted user document.

use crate::models::HealthMetricsInput;
use serde::{Deserialize, Serialize};

/// The per-user document stored in the content repository, one per
/// username. Serde names are camelCase to stay interoperable with
/// documents written by earlier versions of the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub auth: UserAuth,
    pub profile: UserProfile,
}

/// Credential material. The password itself is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAuth {
    pub username: String,
    /// 32 hex chars (16 random bytes)
    pub salt: String,
    /// 64 hex chars (PBKDF2-HMAC-SHA256, 100k iterations)
    pub password_hash: String,
}

/// Public profile plus the opaque metrics payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub display_name: String,
    pub bio: String,
    /// ISO-8601; set once at signup, never changed.
    pub joined_at: String,
    /// ISO-8601; bumped on every metrics update.
    pub updated_at: String,
    pub metrics: HealthMetricsInput,
}
