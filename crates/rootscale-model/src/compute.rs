// SPDX-License-Identifier: Apache-2.0

pub const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Parses user input the way the compute form expects: surrounding
/// whitespace is ignored and anything that is not a finite float yields
/// `None`.
#[must_use]
pub fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[must_use]
pub fn scale_by_sqrt2(number: f64) -> f64 {
    number * SQRT_2
}
