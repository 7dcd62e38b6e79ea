//! Filter tokenizer
//!
//! Single left-to-right scan over the filter text with an explicit stack
//! of open groups, one per parenthesis depth.
//!
//! - `(` opens a group, `)` closes it.
//! - A closed group whose characters contain `=` collapses into a leaf:
//!   the characters before the first `=` form the field, everything after
//!   it (with any further `=` removed) forms the value.
//! - At each position the 5-character window is compared to `" and "` and
//!   `" not "`, then the 4-character window to `" or "`, then to `"not "`.
//!   Keyword matching ignores case.
//! - Any other character is kept literally.

use crate::error::{ParseError, Result};
use litmap_core::ast::{Keyword, Token};

/// One entry of a group while it is still open
#[derive(Debug)]
enum Element {
    Char(char),
    Keyword(Keyword),
    Token(Token),
}

/// Scan filter text into a token tree.
///
/// Always yields exactly one root token: a `Leaf` when the whole text is a
/// single unparenthesized condition, otherwise a `Group`.
pub fn tokenize(text: &str) -> Result<Token> {
    let chars: Vec<char> = text.chars().collect();
    let mut stack: Vec<Vec<Element>> = vec![Vec::new()];
    let mut index = 0;

    while index < chars.len() {
        let c = chars[index];

        if c == '(' {
            stack.push(Vec::new());
            index += 1;
        } else if c == ')' {
            if stack.len() < 2 {
                return Err(ParseError::UnbalancedParen { position: index });
            }
            let group = stack.pop().unwrap_or_default();
            let token = collapse(group)?;
            if let Some(parent) = stack.last_mut() {
                parent.push(Element::Token(token));
            }
            index += 1;
        } else if let Some((keyword, width)) = keyword_at(&chars, index) {
            if let Some(current) = stack.last_mut() {
                current.push(Element::Keyword(keyword));
            }
            index += width;
        } else {
            if let Some(current) = stack.last_mut() {
                current.push(Element::Char(c));
            }
            index += 1;
        }
    }

    if stack.len() > 1 {
        return Err(ParseError::UnclosedParen {
            open: stack.len() - 1,
        });
    }

    let root = collapse_root(stack.pop().unwrap_or_default())?;
    log::trace!("tokenized filter {:?}: {} condition(s)", text, root.leaf_count());
    Ok(root)
}

/// Match a keyword window starting at `index`
fn keyword_at(chars: &[char], index: usize) -> Option<(Keyword, usize)> {
    let window = |width: usize| -> Option<String> {
        chars
            .get(index..index + width)
            .map(|w| w.iter().collect::<String>().to_lowercase())
    };

    match window(5).as_deref() {
        Some(" and ") => return Some((Keyword::And, 5)),
        Some(" not ") => return Some((Keyword::Not, 5)),
        _ => {}
    }

    match window(4).as_deref() {
        Some(" or ") => Some((Keyword::Or, 4)),
        Some("not ") => Some((Keyword::Not, 4)),
        _ => None,
    }
}

/// Close a group: a leaf if it holds an `=`, a group otherwise
fn collapse(elements: Vec<Element>) -> Result<Token> {
    let split = elements
        .iter()
        .position(|e| matches!(e, Element::Char('=')));

    match split {
        Some(split) => collapse_leaf(&elements, split),
        None => Ok(Token::group(group_items(elements))),
    }
}

/// Close the outermost level. An unparenthesized condition must be a single
/// `field=value` with no keywords and no further `=`.
fn collapse_root(elements: Vec<Element>) -> Result<Token> {
    let equals = elements
        .iter()
        .filter(|e| matches!(e, Element::Char('=')))
        .count();
    let has_keyword = elements.iter().any(|e| matches!(e, Element::Keyword(_)));

    if equals > 0 && (equals > 1 || has_keyword) {
        return Err(ParseError::MalformedLeaf(render(&elements)));
    }
    collapse(elements)
}

fn collapse_leaf(elements: &[Element], split: usize) -> Result<Token> {
    if elements.iter().any(|e| matches!(e, Element::Token(_))) {
        return Err(ParseError::MalformedLeaf(render(elements)));
    }

    let field = render(&elements[..split]).trim().to_string();
    let value = render(&elements[split + 1..]).replace('=', "");

    if field.is_empty() {
        return Err(ParseError::MalformedLeaf(render(elements)));
    }

    Ok(Token::leaf(field, value))
}

/// Turn the elements of a non-leaf group into tokens, merging runs of
/// literal characters and dropping whitespace-only runs
fn group_items(elements: Vec<Element>) -> Vec<Token> {
    let mut items = Vec::new();
    let mut run = String::new();

    let flush = |run: &mut String, items: &mut Vec<Token>| {
        if !run.trim().is_empty() {
            items.push(Token::text(run.trim()));
        }
        run.clear();
    };

    for element in elements {
        match element {
            Element::Char(c) => run.push(c),
            Element::Keyword(keyword) => {
                flush(&mut run, &mut items);
                items.push(Token::keyword(keyword));
            }
            Element::Token(token) => {
                flush(&mut run, &mut items);
                items.push(token);
            }
        }
    }
    flush(&mut run, &mut items);

    items
}

/// Render leaf elements back to text; keywords become their lower-case word
fn render(elements: &[Element]) -> String {
    let mut text = String::new();
    for element in elements {
        match element {
            Element::Char(c) => text.push(*c),
            Element::Keyword(keyword) => text.push_str(keyword.as_str()),
            Element::Token(_) => text.push_str("(...)"),
        }
    }
    text
}
