// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Create-activity form model and its validation schema.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Activity type tags accepted by the create form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::VariantArray,
)]
pub enum ActivityType {
    Run,
    Ride,
    Swim,
    Walk,
    Hike,
    AlpineSki,
    BackcountrySki,
    Canoeing,
    Crossfit,
    EBikeRide,
    Elliptical,
    IceSkate,
    InlineSkate,
    Kayaking,
    Kitesurf,
    NordicSki,
    RockClimbing,
    RollerSki,
    Rowing,
    Sail,
    Skateboard,
    Snowboard,
    Snowshoe,
    Soccer,
    StairStepper,
    StandUpPaddling,
    Surfing,
    VirtualRide,
    WeightTraining,
    Windsurf,
    Workout,
    Yoga,
}

impl ActivityType {
    /// All tags, in the order the type picker lists them.
    pub fn all() -> &'static [ActivityType] {
        <ActivityType as strum::VariantArray>::VARIANTS
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Values of the create-activity form, exactly as entered.
///
/// Numeric fields keep their text representation; the payload is posted
/// verbatim once validation passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ActivityForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_activity_type"))]
    pub activity_type: String,
    #[validate(length(min = 1, message = "Start date is required"))]
    pub start_date_local: String,
    /// Hours
    #[validate(custom(function = "validate_elapsed_time"))]
    pub elapsed_time: String,
    pub description: String,
    /// Miles
    #[validate(custom(function = "validate_distance"))]
    pub distance: String,
    pub trainer: bool,
    pub commute: bool,
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_activity_type(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", "Activity type is required"));
    }
    ActivityType::from_str(value)
        .map(|_| ())
        .map_err(|_| error("activity_type", "Unknown activity type"))
}

/// Required, numeric and strictly positive.
fn positive_number(
    value: &str,
    required: &'static str,
    not_a_number: &'static str,
    not_positive: &'static str,
) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(error("required", required));
    }
    let number: f64 = value.parse().map_err(|_| error("number", not_a_number))?;
    if !number.is_finite() {
        return Err(error("number", not_a_number));
    }
    if number <= 0.0 {
        return Err(error("positive", not_positive));
    }
    Ok(())
}

fn validate_elapsed_time(value: &str) -> Result<(), ValidationError> {
    positive_number(
        value,
        "Elapsed time is required",
        "Elapsed time must be a number",
        "Elapsed time must be positive",
    )
}

fn validate_distance(value: &str) -> Result<(), ValidationError> {
    positive_number(
        value,
        "Distance is required",
        "Distance must be a number",
        "Distance must be positive",
    )
}
