//! Parses a batch of formula entries. One bad entry discards the whole batch.
use crate::symbolic::parse_expr::{ExponentSubstitution, ParseError, parse_formula};
use crate::symbolic::symbolic_engine::Expr;
use log::info;
use thiserror::Error;

/// One formula entry together with its parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFormula {
    /// 1-based position in the formula field
    pub position: usize,
    /// the entry as typed, before substitutions; used as the curve label
    pub text: String,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Wrong formula {position}: {text}. Remember to separate the formulas by \"; \"")]
pub struct FormulaParseError {
    pub position: usize,
    pub text: String,
    #[source]
    pub source: ParseError,
}

/// Parses every entry in order; the first failure abandons the batch.
pub fn formula_parse(
    entries: &[String],
    mode: ExponentSubstitution,
) -> Result<Vec<ParsedFormula>, FormulaParseError> {
    let mut formulas = Vec::with_capacity(entries.len());
    for (index, text) in entries.iter().enumerate() {
        let expr = parse_formula(text, mode).map_err(|source| FormulaParseError {
            position: index + 1,
            text: text.clone(),
            source,
        })?;
        formulas.push(ParsedFormula {
            position: index + 1,
            text: text.clone(),
            expr,
        });
    }
    info!("parsed {} formula(s)", formulas.len());
    Ok(formulas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::formula_list::formula_list;

    #[test]
    fn test_batch_keeps_order_and_labels() {
        let entries = formula_list("x^2; sin(x); x^2");
        let parsed = formula_parse(&entries, ExponentSubstitution::Blind).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].text, "x^2");
        assert_eq!(parsed[1].position, 2);
        assert_eq!(parsed[2].expr, parsed[0].expr);
    }

    #[test]
    fn test_one_failure_discards_batch() {
        let entries = vec!["x^2".to_string(), "!!bad!!".to_string()];
        let err = formula_parse(&entries, ExponentSubstitution::Blind).unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.text, "!!bad!!");
        assert_eq!(
            err.to_string(),
            "Wrong formula 2: !!bad!!. Remember to separate the formulas by \"; \""
        );
    }

    #[test]
    fn test_error_names_typed_text() {
        let entries = vec!["2,5 +".to_string()];
        let err = formula_parse(&entries, ExponentSubstitution::Blind).unwrap_err();
        assert_eq!(err.text, "2,5 +");
        assert_eq!(err.position, 1);
    }

    #[test]
    fn test_deeply_nested_formula_is_a_parse_error() {
        let deep = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        let entries = vec![deep, "x".to_string()];
        let err = formula_parse(&entries, ExponentSubstitution::Blind).unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.source, ParseError::TooDeep);
        assert!(err.to_string().starts_with("Wrong formula 1: ((("));
        assert!(err.to_string().ends_with(")). Remember to separate the formulas by \"; \""));
    }

    #[test]
    fn test_empty_field_fails_as_first_entry() {
        let err = formula_parse(&formula_list(""), ExponentSubstitution::Blind).unwrap_err();
        assert_eq!(err.position, 1);
        assert_eq!(err.source, ParseError::Empty);
    }
}
