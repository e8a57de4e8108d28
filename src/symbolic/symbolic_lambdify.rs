use crate::symbolic::symbolic_engine::Expr;
use ndarray::Array1;
use std::f64::consts::PI;
use thiserror::Error;

/// Reasons a parsed expression cannot be turned into numbers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("symbol '{name}' is not bound, the only variable is '{var}'")]
    UnboundSymbol { name: String, var: String },
    #[error("function '{0}' is not defined")]
    UnknownFunction(String),
    #[error("value is not finite at x = {x}")]
    NonFinite { x: f64 },
}

pub type Lambdified = Box<dyn Fn(f64) -> f64 + Send + Sync>;

impl Expr {
    // LAMBDIFICATION - Converting Symbolic Expressions to Executable Functions

    /// Converts the expression into a closure of the single variable `var`.
    ///
    /// Fails on the first symbol other than `var` and on the first undefined function,
    /// in tree order.
    ///
    /// # Examples
    /// ```
    /// use mathplot::symbolic::symbolic_engine::Expr;
    /// let f = Expr::Var("x".to_string()).pow(Expr::Const(2.0));
    /// let func = f.lambdify1D("x").unwrap();
    /// assert_eq!(func(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self, var: &str) -> Result<Lambdified, EvalError> {
        let lambdified: Lambdified = match self {
            Expr::Var(name) if name == var => Box::new(|x| x),
            Expr::Var(name) => {
                return Err(EvalError::UnboundSymbol {
                    name: name.clone(),
                    var: var.to_string(),
                });
            }
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| val)
            }
            Expr::Add(lhs, rhs) => {
                let (lf, rf) = (lhs.lambdify1D(var)?, rhs.lambdify1D(var)?);
                Box::new(move |x| lf(x) + rf(x))
            }
            Expr::Sub(lhs, rhs) => {
                let (lf, rf) = (lhs.lambdify1D(var)?, rhs.lambdify1D(var)?);
                Box::new(move |x| lf(x) - rf(x))
            }
            Expr::Mul(lhs, rhs) => {
                let (lf, rf) = (lhs.lambdify1D(var)?, rhs.lambdify1D(var)?);
                Box::new(move |x| lf(x) * rf(x))
            }
            Expr::Div(lhs, rhs) => {
                let (lf, rf) = (lhs.lambdify1D(var)?, rhs.lambdify1D(var)?);
                Box::new(move |x| lf(x) / rf(x))
            }
            Expr::Pow(base, exp) => {
                let (bf, ef) = (base.lambdify1D(var)?, exp.lambdify1D(var)?);
                Box::new(move |x| bf(x).powf(ef(x)))
            }
            Expr::Exp(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).exp())
            }
            Expr::Ln(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).ln())
            }
            Expr::Abs(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).abs())
            }
            Expr::sin(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).sin())
            }
            Expr::cos(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).cos())
            }
            Expr::tg(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).tan())
            }
            Expr::ctg(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| 1.0 / f(x).tan())
            }
            Expr::arcsin(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).asin())
            }
            Expr::arccos(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).acos())
            }
            Expr::arctg(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).atan())
            }
            Expr::arcctg(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| PI / 2.0 - f(x).atan())
            }
            Expr::sinh(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).sinh())
            }
            Expr::cosh(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).cosh())
            }
            Expr::tanh(e) => {
                let f = e.lambdify1D(var)?;
                Box::new(move |x| f(x).tanh())
            }
            Expr::Func(name, _) => return Err(EvalError::UnknownFunction(name.clone())),
        };
        Ok(lambdified)
    }

    /// Evaluates the expression at every point of `grid`.
    ///
    /// The result always has the grid's shape: a constant expression is broadcast
    /// to every sample instead of being returned as a scalar.
    ///
    /// ```
    /// use mathplot::symbolic::symbolic_engine::Expr;
    /// use ndarray::Array1;
    /// let grid = Array1::linspace(0.0, 1.0, 5);
    /// let y = Expr::Const(3.0).lambdify_on_grid("x", &grid).unwrap();
    /// assert_eq!(y.to_vec(), vec![3.0; 5]);
    /// ```
    pub fn lambdify_on_grid(&self, var: &str, grid: &Array1<f64>) -> Result<Array1<f64>, EvalError> {
        let f = self.lambdify1D(var)?;
        if self.is_constant() {
            Ok(Array1::from_elem(grid.raw_dim(), f(0.0)))
        } else {
            Ok(grid.mapv(|x| f(x)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_lambdify_polynomial() {
        let f = (x().pow(Expr::Const(2.0)) - x() + Expr::Const(1.0)).lambdify1D("x").unwrap();
        assert_relative_eq!(f(2.0), 3.0);
        assert_relative_eq!(f(-1.0), 3.0);
    }

    #[test]
    fn test_lambdify_trigonometry() {
        let f = Expr::sin(x().boxed()).lambdify1D("x").unwrap();
        assert_relative_eq!(f(PI / 2.0), 1.0);
        let f = Expr::ctg(x().boxed()).lambdify1D("x").unwrap();
        assert_relative_eq!(f(PI / 4.0), 1.0, epsilon = 1e-12);
        let f = Expr::arcctg(x().boxed()).lambdify1D("x").unwrap();
        assert_relative_eq!(f(1.0), PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_is_broadcast_to_grid() {
        let grid = Array1::linspace(-2.0, 2.0, 5);
        let y = Expr::Const(3.0).lambdify_on_grid("x", &grid).unwrap();
        assert_eq!(y.len(), 5);
        assert!(y.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_grid_evaluation_matches_pointwise() {
        let grid = Array1::linspace(-5.0, 5.0, 11);
        let y = Expr::sin(x().boxed()).lambdify_on_grid("x", &grid).unwrap();
        for (xi, yi) in grid.iter().zip(y.iter()) {
            assert_relative_eq!(*yi, xi.sin());
        }
    }

    #[test]
    fn test_unbound_symbol() {
        let expr = x() * Expr::Var("y".to_string());
        let err = expr.lambdify1D("x").err().unwrap();
        assert_eq!(
            err,
            EvalError::UnboundSymbol {
                name: "y".to_string(),
                var: "x".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_function() {
        let expr = Expr::Func("Exp".to_string(), x().boxed());
        let grid = Array1::linspace(0.0, 1.0, 3);
        assert_eq!(
            expr.lambdify_on_grid("x", &grid),
            Err(EvalError::UnknownFunction("Exp".to_string()))
        );
    }

    #[test]
    fn test_division_by_zero_gives_infinity() {
        let f = (Expr::Const(1.0) / x()).lambdify1D("x").unwrap();
        assert!(f(0.0).is_infinite());
        let f = Expr::Ln(x().boxed()).lambdify1D("x").unwrap();
        assert!(f(-1.0).is_nan());
    }
}
