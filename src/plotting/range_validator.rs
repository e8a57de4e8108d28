//! Checks the four axis-limit fields before anything is evaluated.
//!
//! Conditions are checked in a fixed order and the first failing one is reported:
//! x-min, x-max, y-min, y-max must parse as floats, then x-min < x-max, then y-min < y-max.
use crate::plotting::form::PlotForm;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Wrong specified the minimum limit of X axis")]
    XMin,
    #[error("Wrong specified the maximum limit of X axis")]
    XMax,
    #[error("Wrong specified the minimum limit of Y axis")]
    YMin,
    #[error("Wrong specified the maximum limit of Y axis")]
    YMax,
    #[error("Minimum limit of the X axis is greater than or equal to the maximum limit")]
    XOrder,
    #[error("Minimum limit of the Y axis is greater than or equal to the maximum limit")]
    YOrder,
}

/// Validated axis limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Parses a limit field like a float literal, surrounding whitespace allowed.
/// `inf` and `nan` parse but cannot bound an axis, so they are rejected too.
pub fn float_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn validate_ranges(
    x_min: &str,
    x_max: &str,
    y_min: &str,
    y_max: &str,
) -> Result<AxisRange, RangeError> {
    let x_min = float_number(x_min).ok_or(RangeError::XMin)?;
    let x_max = float_number(x_max).ok_or(RangeError::XMax)?;
    let y_min = float_number(y_min).ok_or(RangeError::YMin)?;
    let y_max = float_number(y_max).ok_or(RangeError::YMax)?;
    if x_min >= x_max {
        return Err(RangeError::XOrder);
    }
    if y_min >= y_max {
        return Err(RangeError::YOrder);
    }
    Ok(AxisRange {
        x_min,
        x_max,
        y_min,
        y_max,
    })
}

impl PlotForm {
    pub fn axis_range(&self) -> Result<AxisRange, RangeError> {
        validate_ranges(&self.x_min, &self.x_max, &self.y_min, &self.y_max)
    }
}
