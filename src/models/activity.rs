// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava activity models: the wire record and its display shape.

use crate::format::format_quantity;
use serde::{Deserialize, Deserializer, Serialize};

/// Displayed in place of a heart rate the device did not record.
pub const NOT_LOGGED: &str = "Not Logged";

/// Activity record as returned by `GET /athlete/activities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StravaActivity {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Distance in miles
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_speed: f64,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub activity_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_speed: f64,
    #[serde(rename = "hasHeartRate", alias = "has_heartrate", default)]
    pub has_heart_rate: bool,
    #[serde(alias = "average_heartrate", default)]
    pub heart_rate: Option<f64>,
}

/// Missing and `null` fields both read as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Heart rate as shown on an activity row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeartRate {
    Logged(f64),
    NotLogged,
}

impl std::fmt::Display for HeartRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeartRate::Logged(bpm) => f.write_str(&format_quantity(*bpm, "bpm")),
            HeartRate::NotLogged => f.write_str(NOT_LOGGED),
        }
    }
}

/// Display shape of an activity, keyed by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityView {
    pub id: u64,
    pub name: String,
    pub distance: f64,
    pub average_speed: f64,
    pub activity_type: String,
    pub max_speed: f64,
    pub heart_rate: HeartRate,
}

impl From<StravaActivity> for ActivityView {
    fn from(activity: StravaActivity) -> Self {
        // The heart rate is only meaningful when the record says it was logged.
        let heart_rate = match (activity.has_heart_rate, activity.heart_rate) {
            (true, Some(bpm)) => HeartRate::Logged(bpm),
            _ => HeartRate::NotLogged,
        };

        Self {
            id: activity.id,
            name: activity.name,
            distance: activity.distance,
            average_speed: activity.average_speed,
            activity_type: activity.activity_type,
            max_speed: activity.max_speed,
            heart_rate,
        }
    }
}

impl ActivityView {
    pub fn distance_label(&self) -> String {
        format_quantity(self.distance, "miles")
    }

    pub fn average_speed_label(&self) -> String {
        format_quantity(self.average_speed, "mph")
    }

    pub fn max_speed_label(&self) -> String {
        format_quantity(self.max_speed, "mph")
    }

    pub fn heart_rate_label(&self) -> String {
        self.heart_rate.to_string()
    }
}

/// Response to `POST /activities`.
///
/// Success is decided by the status code; the identifier is read only when
/// the body carries one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedActivity {
    #[serde(default)]
    pub id: Option<u64>,
}
