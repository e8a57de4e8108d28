//! Samples parsed formulas over the x-range. Failures are per curve.
use crate::plotting::formula_parser::ParsedFormula;
use crate::plotting::range_validator::AxisRange;
use crate::plotting::settings::DomainPolicy;
use crate::symbolic::symbolic_lambdify::EvalError;
use ndarray::Array1;
use thiserror::Error;

/// the only free variable a formula may use
pub const ARGUMENT: &str = "x";

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Wrong typed formula {position}: {text}")]
pub struct FormulaEvalError {
    pub position: usize,
    pub text: String,
    #[source]
    pub source: EvalError,
}

/// Evenly spaced x-values over [x_min, x_max], both ends included.
pub fn sample_grid(range: &AxisRange, samples: usize) -> Array1<f64> {
    Array1::linspace(range.x_min, range.x_max, samples)
}

/// y-values of one formula, one per grid point.
pub fn function_value(
    formula: &ParsedFormula,
    grid: &Array1<f64>,
    policy: DomainPolicy,
) -> Result<Array1<f64>, FormulaEvalError> {
    let fail = |source: EvalError| FormulaEvalError {
        position: formula.position,
        text: formula.text.clone(),
        source,
    };
    let values = formula
        .expr
        .lambdify_on_grid(ARGUMENT, grid)
        .map_err(fail)?;
    if policy == DomainPolicy::Strict {
        if let Some((x, _)) = grid
            .iter()
            .zip(values.iter())
            .find(|(_, y)| !y.is_finite())
        {
            return Err(fail(EvalError::NonFinite { x: *x }));
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::parse_expr::{ExponentSubstitution, parse_formula};
    use approx::assert_relative_eq;

    fn formula(position: usize, text: &str) -> ParsedFormula {
        ParsedFormula {
            position,
            text: text.to_string(),
            expr: parse_formula(text, ExponentSubstitution::Blind).unwrap(),
        }
    }

    fn range(x_min: f64, x_max: f64) -> AxisRange {
        AxisRange {
            x_min,
            x_max,
            y_min: -1.0,
            y_max: 1.0,
        }
    }

    #[test]
    fn test_sample_grid() {
        let grid = sample_grid(&range(-5.0, 5.0), 1000);
        assert_eq!(grid.len(), 1000);
        assert_relative_eq!(grid[0], -5.0);
        assert_relative_eq!(grid[999], 5.0);
        assert_relative_eq!(grid[1] - grid[0], 10.0 / 999.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_over_five_points() {
        let grid = sample_grid(&range(0.0, 4.0), 5);
        let y = function_value(&formula(1, "3"), &grid, DomainPolicy::Strict).unwrap();
        assert_eq!(y.to_vec(), vec![3.0; 5]);
    }

    #[test]
    fn test_strict_policy_rejects_division_by_zero() {
        let grid = sample_grid(&range(-1.0, 1.0), 3);
        let err = function_value(&formula(2, "1/x"), &grid, DomainPolicy::Strict).unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.source, EvalError::NonFinite { x: 0.0 });
        assert_eq!(err.to_string(), "Wrong typed formula 2: 1/x");
    }

    #[test]
    fn test_gaps_policy_keeps_non_finite_samples() {
        let grid = sample_grid(&range(-1.0, 1.0), 3);
        let y = function_value(&formula(1, "1/x"), &grid, DomainPolicy::Gaps).unwrap();
        assert_relative_eq!(y[0], -1.0);
        assert!(y[1].is_infinite());
        assert_relative_eq!(y[2], 1.0);
    }

    #[test]
    fn test_unknown_names_fail_per_curve() {
        let grid = sample_grid(&range(0.0, 1.0), 3);
        let err = function_value(&formula(1, "exp(x)"), &grid, DomainPolicy::Gaps).unwrap_err();
        assert_eq!(err.source, EvalError::UnknownFunction("Exp".to_string()));
        let err = function_value(&formula(1, "x*y"), &grid, DomainPolicy::Gaps).unwrap_err();
        assert!(matches!(err.source, EvalError::UnboundSymbol { .. }));
    }
}
