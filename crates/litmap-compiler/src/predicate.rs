//! Compiled filter predicates
//!
//! A `Predicate` is the executable form of a filter: a tree of attribute
//! comparisons and precomputed review-field memberships that can be
//! evaluated against publications without consulting the scope again.

use litmap_core::ast::Lookup;
use litmap_core::model::{Attribute, Publication, PublicationId};
use litmap_core::Value;
use std::collections::HashSet;

/// Executable filter
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every publication
    All,

    /// Comparison against a built-in attribute
    Attribute(AttributeMatch),

    /// Membership in the publications a review-field condition selected
    MemberOf {
        field: String,
        publications: HashSet<PublicationId>,
    },

    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn and(left: Predicate, right: Predicate) -> Self {
        Predicate::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Predicate, right: Predicate) -> Self {
        Predicate::Or(Box::new(left), Box::new(right))
    }

    pub fn negate(operand: Predicate) -> Self {
        Predicate::Not(Box::new(operand))
    }

    /// Returns true for the empty filter
    pub fn is_match_all(&self) -> bool {
        matches!(self, Predicate::All)
    }

    /// Evaluate against one publication
    pub fn matches(&self, publication: &Publication) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Attribute(condition) => condition.matches(publication),
            Predicate::MemberOf { publications, .. } => publications.contains(&publication.id),
            Predicate::And(left, right) => left.matches(publication) && right.matches(publication),
            Predicate::Or(left, right) => left.matches(publication) || right.matches(publication),
            Predicate::Not(operand) => !operand.matches(publication),
        }
    }

    /// Keep the publications that match, in input order
    pub fn filter<'a, I>(&self, publications: I) -> Vec<&'a Publication>
    where
        I: IntoIterator<Item = &'a Publication>,
    {
        publications
            .into_iter()
            .filter(|publication| self.matches(publication))
            .collect()
    }
}

/// Expected operand of an attribute comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    Text(String),
    Numbers(Vec<f64>),
    /// `true` matches empty or absent values
    IsNull(bool),
}

/// One comparison against a built-in attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeMatch {
    pub attribute: Attribute,
    pub lookup: Lookup,
    pub expected: Expected,
}

impl AttributeMatch {
    /// Multi-valued attributes match when any element matches
    pub fn matches(&self, publication: &Publication) -> bool {
        let value = publication.attribute(self.attribute);

        match &self.expected {
            Expected::IsNull(expect_null) => value.is_empty() == *expect_null,
            Expected::Text(expected) => value
                .scalars()
                .into_iter()
                .any(|scalar| self.matches_text(scalar, expected)),
            Expected::Numbers(expected) => value
                .scalars()
                .into_iter()
                .filter_map(Value::as_f64)
                .any(|n| self.matches_number(n, expected)),
        }
    }

    fn matches_text(&self, scalar: &Value, expected: &str) -> bool {
        let candidate = match scalar.as_str() {
            Some(s) => s.to_string(),
            None => scalar.to_string(),
        };
        self.lookup
            .matches_text(&candidate, expected, self.attribute.case_sensitive())
    }

    fn matches_number(&self, candidate: f64, expected: &[f64]) -> bool {
        if self.lookup == Lookup::In {
            return expected.iter().any(|e| *e == candidate);
        }
        expected
            .first()
            .and_then(|e| self.lookup.matches_number(candidate, *e))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litmap_core::model::NewPublication;

    fn publication(id: u64, doi: &str, title: &str, year: u16) -> Publication {
        Publication::from_new(
            PublicationId(id),
            NewPublication::new(doi, title, year).with_authors(["Petersen, K.", "Feldt, R."]),
        )
    }

    fn attribute(attribute: Attribute, lookup: Lookup, expected: Expected) -> Predicate {
        Predicate::Attribute(AttributeMatch {
            attribute,
            lookup,
            expected,
        })
    }

    #[test]
    fn test_all_matches_everything() {
        let p = publication(1, "10.1/a", "A", 2020);
        assert!(Predicate::All.matches(&p));
        assert!(Predicate::All.is_match_all());
    }

    #[test]
    fn test_attribute_numeric() {
        let p = publication(1, "10.1/a", "A", 2020);
        let from_2020 = Expected::Numbers(vec![2020.0]);
        assert!(attribute(Attribute::Year, Lookup::Gte, from_2020.clone()).matches(&p));
        assert!(!attribute(Attribute::Year, Lookup::Lt, from_2020).matches(&p));
        assert!(attribute(
            Attribute::Year,
            Lookup::In,
            Expected::Numbers(vec![2019.0, 2020.0])
        )
        .matches(&p));
    }

    #[test]
    fn test_attribute_doi_case_insensitive() {
        let p = publication(1, "10.1000/ABC", "A", 2020);
        let predicate = attribute(
            Attribute::Doi,
            Lookup::Exact,
            Expected::Text("10.1000/abc".into()),
        );
        assert!(predicate.matches(&p));
    }

    #[test]
    fn test_attribute_multi_valued_any() {
        let p = publication(1, "10.1/a", "A", 2020);
        let predicate = attribute(
            Attribute::Authors,
            Lookup::StartsWith,
            Expected::Text("Feldt".into()),
        );
        assert!(predicate.matches(&p));
    }

    #[test]
    fn test_attribute_isnull() {
        let p = publication(1, "10.1/a", "A", 2020);
        assert!(attribute(Attribute::Source, Lookup::IsNull, Expected::IsNull(true)).matches(&p));
        assert!(attribute(Attribute::Title, Lookup::IsNull, Expected::IsNull(false)).matches(&p));
    }

    #[test]
    fn test_member_of_and_combinators() {
        let first = publication(1, "10.1/a", "A", 2020);
        let second = publication(2, "10.1/b", "B", 2018);
        let member = Predicate::MemberOf {
            field: "relevance".into(),
            publications: [PublicationId(2)].into_iter().collect(),
        };

        assert!(!member.matches(&first));
        assert!(member.matches(&second));

        let recent = attribute(Attribute::Year, Lookup::Gt, Expected::Numbers(vec![2019.0]));
        let either = Predicate::or(member.clone(), recent.clone());
        assert_eq!(either.filter([&first, &second]).len(), 2);

        let neither = Predicate::negate(either);
        assert!(neither.filter([&first, &second]).is_empty());

        let both = Predicate::and(member, recent);
        assert!(both.filter([&first, &second]).is_empty());
    }
}
