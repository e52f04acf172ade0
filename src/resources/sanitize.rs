//! Free-text entry of sweep ranges.
//!
//! Every field is stripped down to digits, signs and decimal points, parsed,
//! clamped to its physical limits and written back in canonical form, so the
//! engine only ever sees clean numbers.

use serde::{Deserialize, Serialize};

use crate::resources::{SweepAxis, SweepConfig, SweepRange};
use crate::utils::AeroError;

/// A parsed field together with its canonical text.
#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized<T> {
    pub value: T,
    pub text: String,
}

fn strip(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect()
}

fn parse(input: &str) -> Result<f64, AeroError> {
    let stripped = strip(input);
    stripped
        .parse::<f64>()
        .map_err(|e| AeroError::InvalidInput {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

/// Parses `input` and clamps it into `[min, max]`. The bounds must be finite
/// and ordered.
pub fn sanitize_float(input: &str, min: f64, max: f64) -> Result<Sanitized<f64>, AeroError> {
    if !(min.is_finite() && max.is_finite()) || min > max {
        return Err(AeroError::InvalidInput {
            input: input.to_string(),
            reason: format!("invalid bounds [{}, {}]", min, max),
        });
    }
    let value = parse(input)?.clamp(min, max);
    Ok(Sanitized {
        value,
        text: value.to_string(),
    })
}

/// Parses `input` and rounds it up to a whole count. Counts below one are
/// passed through for the grid to reject.
pub fn sanitize_count(input: &str) -> Result<Sanitized<i64>, AeroError> {
    let raw = parse(input)?.ceil();
    if raw > i64::MAX as f64 || raw < i64::MIN as f64 {
        return Err(AeroError::InvalidInput {
            input: input.to_string(),
            reason: "count out of range".to_string(),
        });
    }
    let value = raw as i64;
    Ok(Sanitized {
        value,
        text: value.to_string(),
    })
}

/// Raw text of one axis: lower bound, upper bound and point count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeText {
    pub min: String,
    pub max: String,
    pub count: String,
}

impl RangeText {
    pub fn new(min: &str, max: &str, count: &str) -> Self {
        Self {
            min: min.to_string(),
            max: max.to_string(),
            count: count.to_string(),
        }
    }

    pub fn from_range(range: &SweepRange) -> Self {
        Self {
            min: range.min.to_string(),
            max: range.max.to_string(),
            count: range.count.to_string(),
        }
    }

    /// Parses `MIN:MAX:COUNT`, keeping each field as raw text.
    pub fn parse_triple(input: &str) -> Result<Self, AeroError> {
        let fields: Vec<&str> = input.split(':').collect();
        match fields.as_slice() {
            [min, max, count] => Ok(Self::new(min, max, count)),
            _ => Err(AeroError::InvalidInput {
                input: input.to_string(),
                reason: "expected MIN:MAX:COUNT".to_string(),
            }),
        }
    }

    /// Sanitizes the three fields in place and returns the range. The upper
    /// bound is clamped to at least the lower one.
    pub fn sanitize(&mut self, axis: SweepAxis) -> Result<SweepRange, AeroError> {
        let (low, high) = axis.limits();
        let min = sanitize_float(&self.min, low, high)?;
        let max = sanitize_float(&self.max, min.value, high)?;
        let count = sanitize_count(&self.count)?;

        self.min = min.text;
        self.max = max.text;
        self.count = count.text;
        Ok(SweepRange::new(min.value, max.value, count.value))
    }
}

/// Text form of the six sweep axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepForm {
    pub mach: RangeText,
    pub alpha: RangeText,
    pub beta: RangeText,
    pub pitch: RangeText,
    pub yaw: RangeText,
    pub roll: RangeText,
}

impl Default for SweepForm {
    fn default() -> Self {
        Self {
            mach: RangeText::new("0.2", "1.5", "10"),
            alpha: RangeText::new("-5", "25", "15"),
            beta: RangeText::new("-5", "5", "10"),
            pitch: RangeText::new("-1", "1", "20"),
            yaw: RangeText::new("-1", "1", "20"),
            roll: RangeText::new("-1", "1", "20"),
        }
    }
}

impl SweepForm {
    /// Text form of the ranges currently in `config`.
    pub fn from_config(config: &SweepConfig) -> Self {
        Self {
            mach: RangeText::from_range(&config.mach),
            alpha: RangeText::from_range(&config.alpha),
            beta: RangeText::from_range(&config.beta),
            pitch: RangeText::from_range(&config.pitch),
            yaw: RangeText::from_range(&config.yaw),
            roll: RangeText::from_range(&config.roll),
        }
    }

    pub fn field_mut(&mut self, axis: SweepAxis) -> &mut RangeText {
        match axis {
            SweepAxis::Mach => &mut self.mach,
            SweepAxis::Alpha => &mut self.alpha,
            SweepAxis::Beta => &mut self.beta,
            SweepAxis::Pitch => &mut self.pitch,
            SweepAxis::Yaw => &mut self.yaw,
            SweepAxis::Roll => &mut self.roll,
        }
    }

    /// Sanitizes every field and writes the ranges into `config`. Nothing is
    /// written unless all six axes parse.
    pub fn apply(&mut self, config: &mut SweepConfig) -> Result<(), AeroError> {
        let mut ranges = Vec::with_capacity(SweepAxis::ALL.len());
        for axis in SweepAxis::ALL {
            ranges.push((axis, self.field_mut(axis).sanitize(axis)?));
        }
        for (axis, range) in ranges {
            *config.range_mut(axis) = range;
        }
        Ok(())
    }
}
