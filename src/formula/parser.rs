//! Recursive-descent parser and evaluator for the formula grammar.
//!
//! Grammar:
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := number | ident | '(' expr ')' | ('+' | '-') factor
//! ```
//!
//! Parsing and evaluation happen in one pass; any syntax error, trailing
//! input, or unknown identifier yields `None`.

use std::collections::BTreeMap;

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    vars: &'a BTreeMap<String, i32>,
}

/// Parse and evaluate a whole formula. `None` on any error.
pub(super) fn parse_expression(input: &str, vars: &BTreeMap<String, i32>) -> Option<f64> {
    let mut p = Parser {
        chars: input.chars().collect(),
        pos: 0,
        vars,
    };
    let value = p.expr()?;
    p.skip_whitespace();
    if p.pos == p.chars.len() {
        Some(value)
    } else {
        None
    }
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consume `c` if it is next (after whitespace).
    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Some(value);
            }
        }
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;
        loop {
            if self.eat('*') {
                value *= self.factor()?;
            } else if self.eat('/') {
                // Division by zero produces a non-finite value here; the
                // caller rejects it after the full evaluation.
                value /= self.factor()?;
            } else {
                return Some(value);
            }
        }
    }

    fn factor(&mut self) -> Option<f64> {
        self.skip_whitespace();
        if self.eat('(') {
            let value = self.expr()?;
            return self.eat(')').then_some(value);
        }
        if self.eat('+') {
            return self.factor();
        }
        if self.eat('-') {
            return Some(-self.factor()?);
        }
        match self.peek()? {
            c if c.is_ascii_digit() || c == '.' => self.number(),
            c if c.is_ascii_alphabetic() => self.variable(),
            _ => None,
        }
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || c == '.')
        {
            self.pos += 1;
        }
        let text: String = self.chars.get(start..self.pos)?.iter().collect();
        text.parse::<f64>().ok()
    }

    fn variable(&mut self) -> Option<f64> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let name: String = self.chars.get(start..self.pos)?.iter().collect();
        self.vars.get(&name).map(|v| f64::from(*v))
    }
}
