//! Strict parsing of comma-separated numeric options
//!
//! Every token is trimmed and parsed on its own. A token that is empty,
//! non-numeric, or not finite is reported with the field it belongs to;
//! nothing is silently dropped or defaulted.

use std::str::FromStr;
use stencilcut_camtools::CutMode;
use stencilcut_core::{Point, ValidationError};

/// Parse one finite number
pub fn parse_number(field: &str, token: &str) -> Result<f64, ValidationError> {
    let token = token.trim();
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            field: field.to_string(),
            value: token.to_string(),
        })
}

/// Parse a non-empty list `a[,b...]`
pub fn parse_list(field: &str, input: &str) -> Result<Vec<f64>, ValidationError> {
    input.split(',').map(|t| parse_number(field, t)).collect()
}

/// Parse exactly `N` comma-separated numbers
pub fn parse_fixed<const N: usize>(field: &str, input: &str) -> Result<[f64; N], ValidationError> {
    let values = parse_list(field, input)?;
    let actual = values.len();
    values
        .try_into()
        .map_err(|_| ValidationError::WrongArity {
            field: field.to_string(),
            expected: N,
            actual,
        })
}

/// Parse `x,y`
pub fn parse_pair(field: &str, input: &str) -> Result<Point, ValidationError> {
    let [x, y] = parse_fixed::<2>(field, input)?;
    Ok(Point::new(x, y))
}

/// Parse a calibration matrix `a,b,c,d`
pub fn parse_matrix(field: &str, input: &str) -> Result<[f64; 4], ValidationError> {
    parse_fixed::<4>(field, input)
}

/// Parse a cut mode: `0`/`accuracy` or `1`/`speed`
pub fn parse_cut_mode(input: &str) -> Result<CutMode, ValidationError> {
    CutMode::from_str(input).map_err(|reason| ValidationError::InvalidValue {
        field: "cut_mode".to_string(),
        reason,
    })
}
