// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for display formatting.

/// Format a numeric quantity followed by its unit, e.g. `10 miles`.
///
/// Integral values print without a fractional part.
pub fn format_quantity(value: f64, unit: &str) -> String {
    format!("{} {}", value, unit)
}
