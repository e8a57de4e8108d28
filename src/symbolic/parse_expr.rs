//! a module turns a String formula into a symbolic expression
//!
//! Formulas are written the way the user types them: `^` for powers, `,` as decimal separator,
//! `e` for Euler's number or a scientific-notation exponent. Before parsing they are rewritten
//! into the operator syntax the grammar understands (`**`, `.`, `E`).
//!
//!# Example
//! ```
//! use mathplot::symbolic::parse_expr::{parse_formula, ExponentSubstitution};
//! use mathplot::symbolic::symbolic_engine::Expr;
//! let expr = parse_formula("2,5", ExponentSubstitution::Blind).unwrap();
//! assert_eq!(expr, Expr::Const(2.5));
//! let expr = parse_formula("x^2 + sin(x)", ExponentSubstitution::Blind).unwrap();
//! assert_eq!(expr.extract_variables(), vec!["x"]);
//! ```
//
//                  precedence levels, loosest first
//                |  expr    term (('+' | '-') term)*    |
//                |  term    unary (('*' | '/') unary)*  |
//                |  unary   ('-' | '+') unary | power   |
//                |  power   atom ('**' unary)?          |
//                |  atom    number | call | symbol | (expr) |
//
// Every '(', unary sign and '**' opens one more level of nesting; past MAX_NESTING the
// formula is rejected before the parser recursion can exhaust the stack.
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::find_unbalanced_bracket;
use log::debug;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace0, one_of},
    combinator::{map, map_res, not, opt, recognize},
    error::ErrorKind,
    multi::many0,
    sequence::{delimited, pair, preceded, terminated},
};
use std::f64::consts::{E, PI};
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// deepest nesting of brackets, unary signs and powers a formula may have
pub const MAX_NESTING: usize = 64;
/// deepest expression tree a formula may produce, long `+`/`*` chains included
pub const MAX_DEPTH: usize = 256;

/// How the letter `e` is rewritten before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ExponentSubstitution {
    /// every `e` becomes `E`, also inside identifiers: `exp(x)` turns into the undefined `Exp(x)`
    #[default]
    Blind,
    /// only a standalone `e` and the exponent marker of a numeric literal are rewritten
    ScopeAware,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty formula")]
    Empty,
    #[error("unbalanced bracket at position {position}")]
    UnbalancedBracket { position: usize },
    #[error("unexpected '{found}' at position {position}")]
    UnexpectedInput { position: usize, found: String },
    #[error("invalid syntax")]
    Syntax,
    #[error("formula is nested too deeply")]
    TooDeep,
}

/// Rewrites a user formula into parser syntax: `^` -> `**`, `,` -> `.`, `e` -> `E`.
pub fn apply_substitutions(formula: &str, mode: ExponentSubstitution) -> String {
    let rewritten = formula.replace('^', "**").replace(',', ".");
    match mode {
        ExponentSubstitution::Blind => rewritten.replace('e', "E"),
        ExponentSubstitution::ScopeAware => substitute_exponent_scope_aware(&rewritten),
    }
}

fn is_identifier_char(c: Option<char>) -> bool {
    c.is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn substitute_exponent_scope_aware(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != 'e' {
            out.push(c);
            continue;
        }
        let prev = i.checked_sub(1).map(|j| chars[j]);
        let next = chars.get(i + 1).copied();
        let standalone = !is_identifier_char(prev) && !is_identifier_char(next);
        if standalone || is_exponent_marker(&chars, i) {
            out.push('E');
        } else {
            out.push('e');
        }
    }
    out
}

// `e` at `pos` closes the mantissa of a number literal and is followed by exponent digits
fn is_exponent_marker(chars: &[char], pos: usize) -> bool {
    let mut start = pos;
    while start > 0 && (chars[start - 1].is_ascii_digit() || chars[start - 1] == '.') {
        start -= 1;
    }
    let has_mantissa = chars[start..pos].iter().any(|c| c.is_ascii_digit());
    let literal_start = start == 0 || !is_identifier_char(Some(chars[start - 1]));
    let digits_at = match chars.get(pos + 1) {
        Some('+') | Some('-') => pos + 2,
        _ => pos + 1,
    };
    let has_exponent = chars.get(digits_at).is_some_and(|c| c.is_ascii_digit());
    has_mantissa && literal_start && has_exponent
}

/// Substitutes and parses one formula.
pub fn parse_formula(formula: &str, mode: ExponentSubstitution) -> Result<Expr, ParseError> {
    let rewritten = apply_substitutions(formula, mode);
    let expr = Expr::parse_expression(&rewritten)?;
    debug!("formula '{}' rewritten as '{}' parsed: {}", formula, rewritten, expr);
    Ok(expr)
}

impl Expr {
    /// Parses a formula already written in parser syntax (`**` for powers, `.` decimals).
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        if input.trim().is_empty() {
            return Err(ParseError::Empty);
        }
        if let Some(position) = find_unbalanced_bracket(input) {
            return Err(ParseError::UnbalancedBracket { position });
        }
        match expression(input, 0) {
            Ok((rest, expr)) if rest.trim().is_empty() => Ok(expr),
            Ok((rest, _)) => Err(ParseError::UnexpectedInput {
                position: input.len() - rest.len(),
                found: rest.trim().to_string(),
            }),
            Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => Err(ParseError::TooDeep),
            Err(_) => Err(ParseError::Syntax),
        }
    }
}

fn too_deep(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Failure(nom::error::Error::new(input, ErrorKind::TooLarge))
}

fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// float literal without sign: `1`, `2.5`, `.5`, `5.`, `1E-3`
fn number(input: &str) -> IResult<&str, f64> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    let exponent = opt((one_of("eE"), opt(one_of("+-")), digit1));
    map_res(recognize(pair(mantissa, exponent)), |s: &str| s.parse::<f64>()).parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn resolve_symbol(name: &str) -> Expr {
    match name {
        "E" => Expr::Const(E),
        "pi" => Expr::Const(PI),
        _ => Expr::Var(name.to_string()),
    }
}

fn resolve_function(name: &str, arg: Expr) -> Expr {
    let arg = arg.boxed();
    match name {
        "sin" => Expr::sin(arg),
        "cos" => Expr::cos(arg),
        "tan" | "tg" => Expr::tg(arg),
        "cot" | "ctg" => Expr::ctg(arg),
        "asin" | "arcsin" => Expr::arcsin(arg),
        "acos" | "arccos" => Expr::arccos(arg),
        "atan" | "arctan" | "arctg" => Expr::arctg(arg),
        "acot" | "arcctg" => Expr::arcctg(arg),
        "exp" => Expr::Exp(arg),
        "log" | "ln" => Expr::Ln(arg),
        "sqrt" => Expr::Pow(arg, Box::new(Expr::Const(0.5))),
        "Abs" | "abs" => Expr::Abs(arg),
        "sinh" => Expr::sinh(arg),
        "cosh" => Expr::cosh(arg),
        "tanh" => Expr::tanh(arg),
        _ => Expr::Func(name.to_string(), arg),
    }
}

fn bracketed(input: &str, depth: usize) -> IResult<&str, Expr> {
    delimited(
        ws(char('(')),
        |i| expression(i, depth + 1),
        ws(char(')')),
    )
    .parse(input)
}

fn call_or_symbol(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, name) = identifier(input)?;
    let (input, arg) = opt(|i| bracketed(i, depth)).parse(input)?;
    let expr = match arg {
        Some(arg) => resolve_function(name, arg),
        None => resolve_symbol(name),
    };
    Ok((input, expr))
}

fn atom(input: &str, depth: usize) -> IResult<&str, Expr> {
    ws(alt((
        map(number, Expr::Const),
        |i| call_or_symbol(i, depth),
        |i| bracketed(i, depth),
    )))
    .parse(input)
}

fn power(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, base) = atom(input, depth)?;
    let (input, exponent) = opt(preceded(ws(tag("**")), |i| unary(i, depth + 1))).parse(input)?;
    let expr = match exponent {
        Some(exponent) => base.pow(exponent),
        None => base,
    };
    Ok((input, expr))
}

fn negate(expr: Expr) -> Expr {
    match expr {
        Expr::Const(value) => Expr::Const(-value),
        other => -other,
    }
}

// all recursion of the grammar passes through here
fn unary(input: &str, depth: usize) -> IResult<&str, Expr> {
    if depth > MAX_NESTING {
        return Err(too_deep(input));
    }
    alt((
        map(preceded(ws(char('-')), |i| unary(i, depth + 1)), negate),
        preceded(ws(char('+')), |i| unary(i, depth + 1)),
        |i| power(i, depth),
    ))
    .parse(input)
}

/// Left fold of an operator chain, refused once the tree would grow deeper than [`MAX_DEPTH`].
fn fold_chain<'a>(
    input: &'a str,
    first: Expr,
    rest: Vec<(char, Expr)>,
    combine: impl Fn(char, Expr, Expr) -> Expr,
) -> IResult<&'a str, Expr> {
    let mut depth = first.depth();
    let mut acc = first;
    for (op, rhs) in rest {
        depth = depth.max(rhs.depth()) + 1;
        if depth > MAX_DEPTH {
            return Err(too_deep(input));
        }
        acc = combine(op, acc, rhs);
    }
    Ok((input, acc))
}

fn term(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, first) = unary(input, depth)?;
    let multiply = terminated(char('*'), not(char('*')));
    let (input, rest) =
        many0(pair(ws(alt((multiply, char('/')))), |i| unary(i, depth))).parse(input)?;
    fold_chain(input, first, rest, |op, acc, rhs| match op {
        '*' => acc * rhs,
        _ => acc / rhs,
    })
}

fn expression(input: &str, depth: usize) -> IResult<&str, Expr> {
    let (input, first) = term(input, depth)?;
    let (input, rest) = many0(pair(ws(one_of("+-")), |i| term(i, depth))).parse(input)?;
    fold_chain(input, first, rest, |op, acc, rhs| match op {
        '+' => acc + rhs,
        _ => acc - rhs,
    })
}
