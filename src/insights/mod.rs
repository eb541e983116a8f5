//! Narrative insights, ranked disease risks and a recommendation for a week.
//!
//! Two strategies produce the same [`InsightBundle`] schema:
//!
//! - [`RemoteStrategy`] asks a text-generation collaborator for a strict JSON
//!   answer and validates it against the [`Disease`] taxonomy.
//! - [`FallbackStrategy`] computes everything from fixed formulas, with no
//!   network access.
//!
//! [`InsightGenerator`] is the single call site: it tries the remote strategy
//! once and, on any failure, answers synchronously from the fallback. Callers
//! always get a complete bundle plus an [`InsightSource`] recording which
//! strategy produced it.

pub mod client;
pub mod disease;
pub mod fallback;
pub mod remote;

pub use client::{ChatCompletionsClient, TextGenerator};
pub use disease::{rank, Disease, DiseaseRisk};
pub use fallback::FallbackStrategy;
pub use remote::RemoteStrategy;

use crate::core::{InsightError, PatientProfile, SymptomState};
use crate::weekly::trend::TrendAggregates;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Maximum number of narrative insight sentences in a bundle.
pub const MAX_INSIGHTS: usize = 2;

/// Everything a strategy may draw on.
#[derive(Debug, Clone, Copy)]
pub struct InsightRequest<'a> {
    pub profile: &'a PatientProfile,
    /// Today's symptom state, for flags the weekly aggregates do not carry.
    pub symptoms: &'a SymptomState,
    pub aggregates: &'a TrendAggregates,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightBundle {
    pub insights: Vec<String>,
    pub disease_risks: Vec<DiseaseRisk>,
    pub recommendation: String,
}

/// Which strategy produced a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSource {
    Remote,
    Fallback,
}

impl fmt::Display for InsightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightSource::Remote => f.write_str("remote"),
            InsightSource::Fallback => f.write_str("fallback"),
        }
    }
}

#[async_trait]
pub trait InsightStrategy: Send + Sync {
    fn source(&self) -> InsightSource;

    async fn generate(&self, request: &InsightRequest<'_>) -> Result<InsightBundle, InsightError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedInsights {
    pub bundle: InsightBundle,
    pub source: InsightSource,
}

pub struct InsightGenerator {
    remote: Option<Box<dyn InsightStrategy>>,
    fallback: FallbackStrategy,
}

impl InsightGenerator {
    /// Fallback only; never touches the network.
    pub fn offline() -> Self {
        Self {
            remote: None,
            fallback: FallbackStrategy,
        }
    }

    pub fn with_remote(remote: Box<dyn InsightStrategy>) -> Self {
        Self {
            remote: Some(remote),
            fallback: FallbackStrategy,
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn generate(&self, request: &InsightRequest<'_>) -> GeneratedInsights {
        if let Some(remote) = &self.remote {
            match remote.generate(request).await {
                Ok(bundle) => {
                    debug!("Remote insight generation succeeded");
                    return GeneratedInsights {
                        bundle,
                        source: remote.source(),
                    };
                }
                Err(err) => {
                    warn!(
                        kind = err.kind(),
                        error = %err,
                        "Remote insights failed, using fallback"
                    );
                }
            }
        }

        GeneratedInsights {
            bundle: self.fallback.build(request),
            source: InsightSource::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{aggregates_fixture, StubTextGenerator};
    use std::time::Duration;

    #[tokio::test]
    async fn test_offline_generator_uses_fallback() {
        let aggregates = aggregates_fixture(120.0, &[]);
        let profile = PatientProfile::default();
        let symptoms = SymptomState::default();
        let request = InsightRequest {
            profile: &profile,
            symptoms: &symptoms,
            aggregates: &aggregates,
        };

        let generated = InsightGenerator::offline().generate(&request).await;

        assert_eq!(generated.source, InsightSource::Fallback);
        assert_eq!(generated.bundle, FallbackStrategy.build(&request));
    }

    #[tokio::test]
    async fn test_remote_failure_routes_to_fallback() {
        let aggregates = aggregates_fixture(180.0, &[93.0]);
        let profile = PatientProfile::default();
        let symptoms = SymptomState::default();
        let request = InsightRequest {
            profile: &profile,
            symptoms: &symptoms,
            aggregates: &aggregates,
        };
        let remote = RemoteStrategy::new(
            StubTextGenerator::failing(InsightError::collaborator(Some(500), "boom")),
            Duration::from_secs(1),
        );

        let generated = InsightGenerator::with_remote(Box::new(remote))
            .generate(&request)
            .await;

        assert_eq!(generated.source, InsightSource::Fallback);
        assert_eq!(generated.bundle.disease_risks.len(), 8);
    }

    #[test]
    fn test_source_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&InsightSource::Fallback).unwrap(),
            "\"fallback\""
        );
    }
}
