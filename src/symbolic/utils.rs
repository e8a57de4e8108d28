// the collection of utility functions for bracket checking

/// Position of the first bracket that has no pair, `None` when all brackets are balanced.
/// Only round brackets are meaningful in a formula.
pub fn find_unbalanced_bracket(s: &str) -> Option<usize> {
    let mut stack = Vec::new();
    for (i, c) in s.char_indices() {
        match c {
            '(' => stack.push(i),
            ')' => {
                if stack.pop().is_none() {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    stack.first().copied()
}
