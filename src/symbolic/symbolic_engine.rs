//! # Symbolic Engine Module
//!
//! The expression tree every formula is parsed into before it is sampled and plotted.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)` - symbols like "x"; only `x` can be bound at evaluation time
//! - **Constants**: `Const(f64)` - numerical constants, `E` and `pi` are resolved to constants by the parser
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow` - basic arithmetic
//! - **Functions**: `Exp`, `Ln`, `sin`, `cos`, etc. - elementary functions
//! - **Undefined functions**: `Func(name, arg)` - a call of an unknown name. It is a valid parse
//!   result and only fails when the expression is evaluated.
//!
//! ### Key Methods
//! - `extract_variables()` - free symbols of the expression
//! - `is_constant()` - no free symbols, the value does not depend on the grid
//! - `depth()` - height of the tree, bounded by the parser
//!
//! Evaluation lives in `symbolic_lambdify`, parsing in `parse_expr`.

#![allow(non_camel_case_types)]

use std::collections::BTreeSet;
use std::fmt;

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```
/// use mathplot::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(expr.extract_variables(), vec!["x"]);
/// assert!(!expr.is_constant());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function: e^x
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Absolute value
    Abs(Box<Expr>),
    sin(Box<Expr>),
    cos(Box<Expr>),
    /// Tangent function - uses mathematical notation 'tg'
    tg(Box<Expr>),
    /// Cotangent function - uses mathematical notation 'ctg'
    ctg(Box<Expr>),
    arcsin(Box<Expr>),
    arccos(Box<Expr>),
    /// Arctangent function - uses mathematical notation 'arctg'
    arctg(Box<Expr>),
    /// Arccotangent function - uses mathematical notation 'arcctg'
    arcctg(Box<Expr>),
    sinh(Box<Expr>),
    cosh(Box<Expr>),
    tanh(Box<Expr>),
    /// Application of a function the engine does not know, e.g. `Exp(x)`
    Func(String, Box<Expr>),
}

/// Pretty printing with parentheses around every compound node.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::Abs(expr) => write!(f, "abs({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tg({})", expr),
            Expr::ctg(expr) => write!(f, "ctg({})", expr),
            Expr::arcsin(expr) => write!(f, "arcsin({})", expr),
            Expr::arccos(expr) => write!(f, "arccos({})", expr),
            Expr::arctg(expr) => write!(f, "arctg({})", expr),
            Expr::arcctg(expr) => write!(f, "arcctg({})", expr),
            Expr::sinh(expr) => write!(f, "sinh({})", expr),
            Expr::cosh(expr) => write!(f, "cosh({})", expr),
            Expr::tanh(expr) => write!(f, "tanh({})", expr),
            Expr::Func(name, expr) => write!(f, "{}({})", name, expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// The operand of a one-argument node, `None` for leaves and binary nodes.
    pub fn single_argument(&self) -> Option<&Expr> {
        match self {
            Expr::Exp(e)
            | Expr::Ln(e)
            | Expr::Abs(e)
            | Expr::sin(e)
            | Expr::cos(e)
            | Expr::tg(e)
            | Expr::ctg(e)
            | Expr::arcsin(e)
            | Expr::arccos(e)
            | Expr::arctg(e)
            | Expr::arcctg(e)
            | Expr::sinh(e)
            | Expr::cosh(e)
            | Expr::tanh(e)
            | Expr::Func(_, e) => Some(e),
            _ => None,
        }
    }

    /// Number of nodes on the longest path from the root to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Var(_) | Expr::Const(_) => 1,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => 1 + left.depth().max(right.depth()),
            other => 1 + other.single_argument().map_or(0, Expr::depth),
        }
    }

    /// All free symbols of the expression, sorted and without duplicates.
    pub fn extract_variables(&self) -> Vec<String> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars.into_iter().collect()
    }

    fn collect_variables(&self, vars: &mut BTreeSet<String>) {
        match self {
            Expr::Var(name) => {
                vars.insert(name.clone());
            }
            Expr::Const(_) => {}
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.collect_variables(vars);
                right.collect_variables(vars);
            }
            other => {
                if let Some(arg) = other.single_argument() {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// An expression without free symbols: its value does not depend on `x`.
    pub fn is_constant(&self) -> bool {
        self.extract_variables().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_display() {
        let expr = Expr::sin(x().boxed()) + x().pow(Expr::Const(2.0));
        assert_eq!(expr.to_string(), "(sin(x) + (x ^ 2))");
        let expr = Expr::Func("Exp".to_string(), x().boxed());
        assert_eq!(expr.to_string(), "Exp(x)");
    }

    #[test]
    fn test_extract_variables_sorted_and_unique() {
        let expr = Expr::Var("y".to_string()) + x() * x() + Expr::cos(Expr::Var("a".to_string()).boxed());
        assert_eq!(expr.extract_variables(), vec!["a", "x", "y"]);
    }

    #[test]
    fn test_is_constant() {
        assert!(Expr::Const(3.0).is_constant());
        assert!((Expr::Const(2.0) * Expr::Exp(Expr::Const(1.0).boxed())).is_constant());
        assert!(!(Expr::Const(2.0) * x()).is_constant());
        assert!(Expr::Func("Exp".to_string(), Expr::Const(1.0).boxed()).is_constant());
    }

    #[test]
    fn test_depth() {
        assert_eq!(x().depth(), 1);
        assert_eq!((x() + Expr::Const(1.0)).depth(), 2);
        let expr = Expr::sin(Box::new(x() * x())) + Expr::Const(2.0);
        assert_eq!(expr.depth(), 4);
        assert_eq!(Expr::Func("f".to_string(), x().boxed()).depth(), 2);
    }

    #[test]
    fn test_neg_is_multiplication_by_minus_one() {
        assert_eq!(-x(), Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(x())));
    }
}
