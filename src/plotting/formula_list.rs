/// separator between formulas in the formula field
pub const FORMULA_DELIMITER: &str = "; ";

/// Splits the formula field into formula entries.
///
/// The pieces are not trimmed, and text without a delimiter (the empty string included)
/// is a single entry.
pub fn formula_list(text: &str) -> Vec<String> {
    text.split(FORMULA_DELIMITER).map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_formulas() {
        assert_eq!(formula_list("x^2; sin(x)"), vec!["x^2", "sin(x)"]);
    }

    #[test]
    fn test_empty_input_is_one_empty_entry() {
        assert_eq!(formula_list(""), vec![""]);
    }

    #[test]
    fn test_only_semicolon_space_splits() {
        assert_eq!(formula_list("x;sin(x)"), vec!["x;sin(x)"]);
        assert_eq!(formula_list("x;  y"), vec!["x", " y"]);
        assert_eq!(formula_list("x; x; "), vec!["x", "x", ""]);
    }
}
