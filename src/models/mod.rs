// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod metrics;
pub mod user;

pub use metrics::HealthMetricsInput;
pub use user::{UserAuth, UserProfile, UserRecord};
