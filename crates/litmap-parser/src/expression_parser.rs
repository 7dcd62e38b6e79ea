//! Filter expression parser
//!
//! Reduces the token tree produced by the tokenizer into a `FilterExpr`.
//!
//! Operators have no precedence: operands are combined strictly left to
//! right, a binary operator waits for the next operand, and `not` applies
//! to the operand that follows it. `a or b and c` therefore reads as
//! `(a or b) and c`.

use crate::error::{ParseError, Result};
use crate::tokenizer::tokenize;
use litmap_core::ast::{FilterExpr, Keyword, Token};

/// Filter parser
pub struct FilterParser;

impl FilterParser {
    /// Parse filter text into an expression.
    ///
    /// Empty (or whitespace-only) text parses to `FilterExpr::All`.
    pub fn parse(input: &str) -> Result<FilterExpr> {
        let root = tokenize(input)?;
        let expr = Self::reduce(&root)?;
        log::debug!("parsed filter {:?} as {}", input, expr);
        Ok(expr)
    }

    /// Reduce one token (and everything below it) into an expression
    pub fn reduce(token: &Token) -> Result<FilterExpr> {
        match token {
            Token::Leaf { field, value } => Ok(FilterExpr::leaf(field.clone(), value.clone())),
            Token::Group { items } => Self::reduce_group(items),
            Token::Keyword { keyword } => Err(ParseError::MissingOperand(format!(
                "'{}' without conditions",
                keyword
            ))),
            Token::Text { text } => Err(ParseError::UnexpectedText(text.clone())),
        }
    }

    /// Stack reduction over the items of one group
    fn reduce_group(items: &[Token]) -> Result<FilterExpr> {
        let mut reducer = Reducer::default();

        for item in items {
            match item {
                Token::Keyword {
                    keyword: Keyword::Not,
                } => reducer.negations += 1,
                Token::Keyword { keyword } => reducer.push_operator(*keyword)?,
                Token::Text { text } => return Err(ParseError::UnexpectedText(text.clone())),
                operand => {
                    let expr = Self::reduce(operand)?;
                    reducer.push_operand(expr)?;
                }
            }
        }

        reducer.finish()
    }
}

/// Pending state while reducing one group
#[derive(Default)]
struct Reducer {
    operand: Option<FilterExpr>,
    operator: Option<Keyword>,
    negations: usize,
}

impl Reducer {
    fn push_operator(&mut self, keyword: Keyword) -> Result<()> {
        if self.negations > 0 {
            return Err(ParseError::MissingOperand(format!(
                "'not' followed by '{}'",
                keyword
            )));
        }
        if let Some(pending) = self.operator {
            return Err(ParseError::MissingOperand(format!(
                "'{}' followed by '{}'",
                pending, keyword
            )));
        }
        if self.operand.is_none() {
            return Err(ParseError::MissingOperand(format!(
                "'{}' has no left operand",
                keyword
            )));
        }
        self.operator = Some(keyword);
        Ok(())
    }

    fn push_operand(&mut self, mut expr: FilterExpr) -> Result<()> {
        for _ in 0..self.negations {
            expr = FilterExpr::negate(expr);
        }
        self.negations = 0;

        self.operand = match (self.operand.take(), self.operator.take()) {
            (Some(left), Some(Keyword::And)) => Some(FilterExpr::and(left, expr)),
            (Some(left), Some(Keyword::Or)) => Some(FilterExpr::or(left, expr)),
            (None, None) => Some(expr),
            (Some(left), _) => {
                return Err(ParseError::MissingOperator(format!(
                    "{} directly followed by {}",
                    describe(&left),
                    describe(&expr)
                )))
            }
            (None, Some(keyword)) => {
                return Err(ParseError::MissingOperand(format!(
                    "'{}' has no left operand",
                    keyword
                )))
            }
        };
        Ok(())
    }

    fn finish(self) -> Result<FilterExpr> {
        if self.negations > 0 {
            return Err(ParseError::MissingOperand("trailing 'not'".to_string()));
        }
        if let Some(keyword) = self.operator {
            return Err(ParseError::MissingOperand(format!("trailing '{}'", keyword)));
        }
        Ok(self.operand.unwrap_or(FilterExpr::All))
    }
}

/// Operand text for messages; an empty group renders as `()`
fn describe(expr: &FilterExpr) -> String {
    if expr.is_all() {
        "()".to_string()
    } else {
        expr.to_string()
    }
}
