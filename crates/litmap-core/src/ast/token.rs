//! Raw filter token tree
//!
//! Scanning filter text yields a tree of tokens that mirrors the
//! parenthesis structure of the input. Each closed group either collapses
//! into a single `Leaf` (when it contains `=`) or stays a `Group`.

use super::operator::Keyword;
use serde::{Deserialize, Serialize};

/// Token produced by the filter scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "token", rename_all = "snake_case")]
pub enum Token {
    /// `{field: value}` condition
    Leaf { field: String, value: String },

    /// One parenthesis level that did not collapse into a leaf
    Group { items: Vec<Token> },

    /// Logical keyword
    Keyword { keyword: Keyword },

    /// Run of literal characters outside any condition
    Text { text: String },
}

impl Token {
    /// Create a leaf token
    pub fn leaf(field: impl Into<String>, value: impl Into<String>) -> Self {
        Token::Leaf {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a group token
    pub fn group(items: Vec<Token>) -> Self {
        Token::Group { items }
    }

    /// Create a keyword token
    pub fn keyword(keyword: Keyword) -> Self {
        Token::Keyword { keyword }
    }

    /// Create a text token
    pub fn text(text: impl Into<String>) -> Self {
        Token::Text { text: text.into() }
    }

    /// Number of leaf conditions in this token tree
    pub fn leaf_count(&self) -> usize {
        match self {
            Token::Leaf { .. } => 1,
            Token::Group { items } => items.iter().map(Token::leaf_count).sum(),
            Token::Keyword { .. } | Token::Text { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_constructors() {
        assert_eq!(
            Token::leaf("year", "2020"),
            Token::Leaf {
                field: "year".to_string(),
                value: "2020".to_string()
            }
        );
        assert_eq!(
            Token::keyword(Keyword::And),
            Token::Keyword {
                keyword: Keyword::And
            }
        );
    }

    #[test]
    fn test_leaf_count_nested() {
        let tree = Token::group(vec![
            Token::leaf("x", "y"),
            Token::keyword(Keyword::And),
            Token::group(vec![
                Token::leaf("a", "b"),
                Token::keyword(Keyword::Or),
                Token::leaf("c", "d"),
            ]),
        ]);
        assert_eq!(tree.leaf_count(), 3);
    }

    #[test]
    fn test_token_serde_tagged() {
        let json = serde_json::to_value(Token::keyword(Keyword::Not)).unwrap();
        assert_eq!(json["token"], "keyword");
        assert_eq!(json["keyword"], "not");
    }
}
