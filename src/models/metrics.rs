// SPDX-License-Identifier: MIT

//! Health/lifestyle input payload.
//!
//! This struct belongs to the external metrics-computation pipeline;
//! the persistence layer stores and returns it verbatim and never
//! looks inside. Serde names match the documents the dashboard
//! frontend already writes.

use serde::{Deserialize, Serialize};

/// A user's health and lifestyle inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetricsInput {
    pub age: u32,
    pub sex: Sex,
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
    /// Waist circumference in cm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist_circumference: Option<f64>,
    /// Resting heart rate in bpm
    pub resting_heart_rate: u32,
    /// Hours per night
    pub sleep_hours: f64,
    pub weekly_strength_sessions: u32,
    pub weekly_cardio_sessions: u32,
    pub steps_per_day: u32,
    pub alcohol_frequency: AlcoholFrequency,
    pub smoking_status: SmokingStatus,
    /// Body fat percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlcoholFrequency {
    Never,
    Monthly,
    Weekly,
    Daily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

impl Default for HealthMetricsInput {
    /// Seed values assigned to a fresh account at signup.
    fn default() -> Self {
        Self {
            age: 30,
            sex: Sex::Male,
            height: 175.0,
            weight: 75.0,
            waist_circumference: None,
            resting_heart_rate: 70,
            sleep_hours: 7.5,
            weekly_strength_sessions: 3,
            weekly_cardio_sessions: 2,
            steps_per_day: 8000,
            alcohol_frequency: AlcoholFrequency::Weekly,
            smoking_status: SmokingStatus::Never,
            body_fat_percentage: Some(15.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_frontend_field_names() {
        let json = serde_json::to_value(HealthMetricsInput::default()).unwrap();
        assert_eq!(json["sex"], "male");
        assert_eq!(json["restingHeartRate"], 70);
        assert_eq!(json["alcoholFrequency"], "weekly");
        assert_eq!(json["smokingStatus"], "never");
        // Absent optional fields are omitted, not null
        assert!(json.get("waistCircumference").is_none());
    }

    #[test]
    fn test_deserializes_frontend_document() {
        let doc = serde_json::json!({
            "age": 41,
            "sex": "female",
            "height": 168,
            "weight": 62.5,
            "restingHeartRate": 58,
            "sleepHours": 8,
            "weeklyStrengthSessions": 4,
            "weeklyCardioSessions": 3,
            "stepsPerDay": 11000,
            "alcoholFrequency": "never",
            "smokingStatus": "former",
            "bodyFatPercentage": 21.0
        });
        let metrics: HealthMetricsInput = serde_json::from_value(doc).unwrap();
        assert_eq!(metrics.sex, Sex::Female);
        assert_eq!(metrics.steps_per_day, 11000);
        assert_eq!(metrics.waist_circumference, None);
    }
}
