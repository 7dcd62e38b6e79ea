//! Litmap engine
//!
//! Entry point for callers rendering list pages: filtering never fails on
//! bad filter text. The caller gets the list unfiltered together with a
//! report it can show next to the filter box.

use crate::config::EngineConfig;
use crate::error::Result;
use litmap_compiler::{compile_filter, CompileError, FilterErrorKind};
use litmap_core::model::{ListId, MappingId, Publication, ReviewerId};
use litmap_runtime::{ListService, PropagationReport, RuntimeError};
use serde::{Deserialize, Serialize};

/// Why a filter could not be applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterReport {
    pub kind: FilterErrorKind,
    /// Message meant for the person who typed the filter
    pub message: String,
}

impl FilterReport {
    pub fn new(text: &str, error: &CompileError) -> Self {
        let kind = error.kind();
        let message = match kind {
            FilterErrorKind::Syntax => format!(
                "The filter text: {} has syntax errors. Please double check.",
                text
            ),
            _ => error.to_string(),
        };
        Self { kind, message }
    }
}

/// Publications shown for a filter request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOutcome {
    pub filter_text: String,
    pub publications: Vec<Publication>,
    /// Set when the filter was ignored
    pub error: Option<FilterReport>,
}

impl FilterOutcome {
    pub fn is_filtered(&self) -> bool {
        self.error.is_none()
    }
}

/// Litmap engine
pub struct LitmapEngine {
    service: ListService,
    config: EngineConfig,
}

impl LitmapEngine {
    pub(crate) fn new(service: ListService, config: EngineConfig) -> Self {
        Self { service, config }
    }

    /// List service backing this engine
    pub fn service(&self) -> &ListService {
        &self.service
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Filter a list in the configured default order, seeing every review value
    pub async fn filter(&self, list: ListId, text: &str) -> Result<FilterOutcome> {
        self.filter_ordered(list, text, &self.config.default_order, None)
            .await
    }

    /// Filter a list in the given order
    ///
    /// With a `reviewer`, review-field conditions only see shared values and
    /// that reviewer's own. Filter errors are reported in the outcome.
    /// Missing lists and invalid order keys are returned as errors.
    pub async fn filter_ordered(
        &self,
        list: ListId,
        text: &str,
        order: &str,
        reviewer: Option<ReviewerId>,
    ) -> Result<FilterOutcome> {
        match self
            .service
            .filter_list(list, text, Some(order), reviewer)
            .await
        {
            Ok(publications) => Ok(FilterOutcome {
                filter_text: text.to_string(),
                publications,
                error: None,
            }),
            Err(RuntimeError::Filter(error)) => {
                let report = FilterReport::new(text, &error);
                tracing::debug!(
                    "Ignoring filter {:?} on list {}: {}",
                    text,
                    list,
                    error
                );
                let publications = self
                    .service
                    .filter_list(list, "", Some(order), reviewer)
                    .await?;
                Ok(FilterOutcome {
                    filter_text: text.to_string(),
                    publications,
                    error: Some(report),
                })
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Check filter text against a mapping without running it
    pub async fn check_filter(
        &self,
        mapping: MappingId,
        text: &str,
        reviewer: Option<ReviewerId>,
    ) -> Option<FilterReport> {
        let catalog = self.service.read().await;
        compile_filter(&catalog.scope(mapping, reviewer), text)
            .err()
            .map(|error| FilterReport::new(text, &error))
    }

    /// Create an automated list after checking its criteria
    ///
    /// Criteria that do not compile are rejected here, so a saved view is
    /// never skipped by later propagation passes.
    pub async fn create_view(
        &self,
        source: ListId,
        owner: ReviewerId,
        name: &str,
        criteria: &str,
    ) -> Result<(ListId, PropagationReport)> {
        match self
            .service
            .create_checked_view(source, owner, name, criteria)
            .await
        {
            Err(RuntimeError::Filter(error)) => {
                tracing::info!("Rejected view '{}' on list {}: {}", name, source, error);
                Err(error.into())
            }
            result => Ok(result?),
        }
    }
}
