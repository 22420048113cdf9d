//! Similarity network
//!
//! Scores every unordered pair of a catalog and keeps the pairs the profile
//! admits as weighted links for the graph view.

use crate::engine::AffinityEngine;
use affinity_core::Catalog;
use serde::Serialize;
use tracing::{debug, instrument};

/// Score that maps to full link strength
pub const DEFAULT_STRENGTH_SCALE: f64 = 20.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SimilarityLink {
    pub source: String,
    pub target: String,
    pub score: f64,
    /// `score / strength_scale`, capped at 1.0
    pub strength: f64,
}

/// Links between every admitted pair, `source < target` by name
#[instrument(skip(engine, catalog), fields(institutions = catalog.len()))]
pub fn similarity_links(
    engine: &AffinityEngine,
    catalog: &Catalog,
    strength_scale: f64,
) -> Vec<SimilarityLink> {
    let institutions: Vec<_> = catalog.iter().collect();
    let mut links = Vec::new();

    for (i, source) in institutions.iter().enumerate() {
        for target in &institutions[i + 1..] {
            let score = engine.assess(source, target).score;
            if engine.admits(score) {
                links.push(SimilarityLink {
                    source: source.name.clone(),
                    target: target.name.clone(),
                    score,
                    strength: (score / strength_scale).min(1.0),
                });
            }
        }
    }

    debug!(links = links.len(), "built similarity network");
    links
}
