#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String formula into a symbolic expression
///
///# Example
/// ```
/// use mathplot::symbolic::parse_expr::{parse_formula, ExponentSubstitution};
/// let expr = parse_formula("x^2 + 1", ExponentSubstitution::Blind).unwrap();
/// let f = expr.lambdify1D("x").unwrap();
/// assert_eq!(f(2.0), 5.0);
/// ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// the expression tree and structural queries on it (free symbols, constness, depth)
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
///________________________________________________________________________________________________________________________________________________
/// turns a symbolic expression into a Rust closure and samples it over a grid
///# Example
/// ```
/// use mathplot::symbolic::parse_expr::{parse_formula, ExponentSubstitution};
/// use ndarray::Array1;
/// let expr = parse_formula("sin(x)", ExponentSubstitution::Blind).unwrap();
/// let grid = Array1::linspace(-5.0, 5.0, 1000);
/// let y = expr.lambdify_on_grid("x", &grid).unwrap();
/// assert_eq!(y.len(), 1000);
/// ```
pub mod symbolic_lambdify;
///______________________________________________________________________________________________________________________________________________
/// the collection of utility functions for bracket checking
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
