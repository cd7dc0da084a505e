//! Restricted arithmetic formula language for calculator widgets.
//!
//! A formula is evaluated against the name→score map of the named score
//! widgets currently on the board. The language is deliberately tiny:
//! numeric literals, variable names, `+ - * /`, and parentheses. Any
//! character outside the whitelist rejects the whole formula before parsing,
//! so nothing statement-like is ever interpreted.
//!
//! Every failure mode (bad character, parse error, unknown variable,
//! non-finite result) collapses to [`ERROR_MARKER`]; the evaluator never
//! returns an error to the caller.

mod parser;

use std::collections::BTreeMap;

use parser::parse_expression;

/// Inline marker shown in place of a numeric result.
pub const ERROR_MARKER: &str = "#ERROR";

/// Characters legal in a formula: `[A-Za-z0-9+\-*/().\s]`.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.') || c.is_whitespace()
}

/// Evaluate a formula against the variable map.
///
/// Returns the result formatted to exactly two decimal places, or
/// [`ERROR_MARKER`] on any failure. Division by zero yields a non-finite
/// value and is reported as an error rather than `Infinity`.
pub fn evaluate(formula: &str, vars: &BTreeMap<String, i32>) -> String {
    if formula.chars().any(|c| !is_allowed(c)) {
        return ERROR_MARKER.to_string();
    }
    match parse_expression(formula, vars) {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => ERROR_MARKER.to_string(),
    }
}

/// Splice a variable name into a formula at the given char-index cursor.
///
/// The cursor is clamped to the formula length. Returns the new formula and
/// the cursor position just after the inserted name, so the caller can
/// restore focus and caret on its input element.
pub fn insert_variable(formula: &str, name: &str, cursor: usize) -> (String, usize) {
    let chars: Vec<char> = formula.chars().collect();
    let at = cursor.min(chars.len());
    let mut out = String::with_capacity(formula.len() + name.len());
    out.extend(chars.iter().take(at));
    out.push_str(name);
    out.extend(chars.iter().skip(at));
    (out, at + name.chars().count())
}
