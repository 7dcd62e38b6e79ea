//! List propagation
//!
//! After a list's membership changes, every follower re-evaluates its
//! criteria against the list's publications and adds the matches it does
//! not have yet. Followers that gained publications are processed in turn,
//! breadth first, until a pass adds nothing.
//!
//! Propagation only ever adds. A follower whose criteria do not compile is
//! skipped without affecting its siblings.

use super::config::PropagationConfig;
use crate::error::Result;
use crate::store::Catalog;
use litmap_compiler::{compile_filter, FilterErrorKind};
use litmap_core::model::{ListId, PublicationId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One publication added to one list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addition {
    pub list: ListId,
    pub publication: PublicationId,
}

/// A follower left untouched because its criteria did not compile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationSkip {
    pub list: ListId,
    pub criteria: String,
    pub kind: FilterErrorKind,
    pub error: String,
}

/// Outcome of one propagation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationReport {
    /// List whose change started the pass
    pub source: ListId,
    pub additions: Vec<Addition>,
    pub skipped: Vec<PropagationSkip>,
    /// Follower evaluations performed
    pub steps: usize,
    /// A depth or step limit stopped the pass early
    pub truncated: bool,
}

impl PropagationReport {
    fn new(source: ListId) -> Self {
        Self {
            source,
            additions: Vec::new(),
            skipped: Vec::new(),
            steps: 0,
            truncated: false,
        }
    }

    /// Publications added to `list` during the pass
    pub fn added_to(&self, list: ListId) -> Vec<PublicationId> {
        self.additions
            .iter()
            .filter(|addition| addition.list == list)
            .map(|addition| addition.publication)
            .collect()
    }

    /// Returns true if the pass changed nothing
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty()
    }
}

/// Propagate the current membership of `list` to its followers, transitively
pub fn propagate(
    catalog: &mut Catalog,
    list: ListId,
    config: &PropagationConfig,
) -> Result<PropagationReport> {
    catalog.list(list)?;

    let mut report = PropagationReport::new(list);
    let mut queue = VecDeque::from([(list, 0usize)]);

    'pass: while let Some((source, depth)) = queue.pop_front() {
        let followers: Vec<ListId> = catalog.list(source)?.followers.iter().copied().collect();

        for follower in followers {
            if report.steps >= config.max_steps {
                tracing::warn!(
                    "Propagation from list {} stopped after {} steps",
                    list,
                    report.steps
                );
                report.truncated = true;
                break 'pass;
            }
            report.steps += 1;

            let gained = propagate_edge(catalog, source, follower, &mut report)?;
            if gained == 0 {
                continue;
            }

            if depth + 1 >= config.max_depth {
                tracing::warn!(
                    "Propagation from list {} reached depth {} at list {}",
                    list,
                    config.max_depth,
                    follower
                );
                report.truncated = true;
                continue;
            }
            queue.push_back((follower, depth + 1));
        }
    }

    tracing::debug!(
        "Propagated list {}: {} addition(s), {} skipped, {} step(s)",
        list,
        report.additions.len(),
        report.skipped.len(),
        report.steps
    );
    Ok(report)
}

/// Evaluate one follower against one source; returns how many publications
/// the follower gained
fn propagate_edge(
    catalog: &mut Catalog,
    source: ListId,
    follower: ListId,
    report: &mut PropagationReport,
) -> Result<usize> {
    let target = catalog.list(follower)?;
    let criteria = target.criteria.clone();
    let scope = catalog.scope(target.mapping, None);

    let predicate = match compile_filter(&scope, &criteria) {
        Ok(predicate) => predicate,
        Err(error) => {
            tracing::warn!(
                "Skipping follower {} of list {}: criteria {:?} do not compile: {}",
                follower,
                source,
                criteria,
                error
            );
            report.skipped.push(PropagationSkip {
                list: follower,
                criteria,
                kind: error.kind(),
                error: error.to_string(),
            });
            return Ok(0);
        }
    };

    let members = &catalog.list(source)?.publications;
    let mut matching = Vec::new();
    for id in members {
        if target.contains(*id) {
            continue;
        }
        if predicate.matches(catalog.publication(*id)?) {
            matching.push(*id);
        }
    }

    let gained = catalog.add_publications(follower, matching)?;
    report
        .additions
        .extend(gained.iter().map(|publication| Addition {
            list: follower,
            publication: *publication,
        }));
    Ok(gained.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use litmap_core::model::{NewPublication, ReviewerId};

    fn catalog_with_publications(years: &[u16]) -> (Catalog, ListId, Vec<PublicationId>) {
        let mut catalog = Catalog::new();
        let mapping = catalog.create_mapping("TDD", ReviewerId(1));
        let source = catalog.create_list(mapping, ReviewerId(1), "All").unwrap();
        let publications = years
            .iter()
            .enumerate()
            .map(|(i, year)| {
                catalog.add_publication(NewPublication::new(
                    format!("10.1/{}", i),
                    format!("Paper {}", i),
                    *year,
                ))
            })
            .collect();
        (catalog, source, publications)
    }

    #[test]
    fn test_no_followers() {
        let (mut catalog, source, _) = catalog_with_publications(&[2020]);
        let report = propagate(&mut catalog, source, &PropagationConfig::default()).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.steps, 0);
    }

    #[test]
    fn test_follower_gains_matching() {
        let (mut catalog, source, pubs) = catalog_with_publications(&[2018, 2021]);
        let view = catalog
            .create_view(source, ReviewerId(1), "Recent", "(year__gte=2020)")
            .unwrap();
        catalog.add_publications(source, pubs.clone()).unwrap();

        let report = propagate(&mut catalog, source, &PropagationConfig::default()).unwrap();
        assert_eq!(report.added_to(view), vec![pubs[1]]);
        assert!(!report.truncated);
    }

    #[test]
    fn test_broken_criteria_skipped() {
        let (mut catalog, source, pubs) = catalog_with_publications(&[2020]);
        let broken = catalog
            .create_view(source, ReviewerId(1), "Broken", "(year=2020")
            .unwrap();
        let fine = catalog.create_view(source, ReviewerId(1), "Fine", "").unwrap();
        catalog.add_publications(source, pubs.clone()).unwrap();

        let report = propagate(&mut catalog, source, &PropagationConfig::default()).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].list, broken);
        assert_eq!(report.skipped[0].kind, FilterErrorKind::Syntax);
        assert_eq!(report.added_to(fine), pubs);
        assert!(catalog.list(broken).unwrap().is_empty());
    }

    #[test]
    fn test_missing_list() {
        let mut catalog = Catalog::new();
        assert!(propagate(&mut catalog, ListId(1), &PropagationConfig::default()).is_err());
    }
}
