//! Composite similarity engine
//!
//! Runs the factor scorers over a reference/candidate pair in a fixed order,
//! sums their contributions and admits the candidate when the score clears
//! the profile's threshold.

use crate::explain::{Assessment, Connection};
use crate::factors::{
    geographic_distance, geographic_proximity, program_overlap, ranking_proximity,
    selectivity_proximity, specialization_overlap, student_body_proximity, type_match,
};
use crate::profile::Profile;
use affinity_core::{Catalog, Institution, Result};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Engine that scores candidates against a reference institution
#[derive(Debug, Clone, Default)]
pub struct AffinityEngine {
    profile: Profile,
}

impl AffinityEngine {
    /// Create a new engine with the given profile
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    /// Create an engine after validating the profile
    ///
    /// # Errors
    /// Fails with `InvalidConfig` if the profile does not validate.
    pub fn try_new(profile: Profile) -> Result<Self> {
        profile.validate()?;
        Ok(Self::new(profile))
    }

    /// Get a reference to the profile
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Full breakdown of one pair, without applying the threshold
    ///
    /// Factors are evaluated as programs, specializations, ranking,
    /// students, selectivity, type, then the optional geography bonus.
    #[instrument(level = "trace", skip_all, fields(candidate = %candidate.name))]
    pub fn assess(&self, reference: &Institution, candidate: &Institution) -> Assessment {
        let profile = &self.profile;
        let distance = geographic_distance(reference, candidate);

        let explanations: Vec<_> = [
            program_overlap(reference, candidate, profile.programs, profile.max_set_len),
            specialization_overlap(
                reference,
                candidate,
                profile.specializations,
                profile.max_set_len,
            ),
            ranking_proximity(reference, candidate, &profile.ranking),
            student_body_proximity(reference, candidate, &profile.students),
            selectivity_proximity(reference, candidate, &profile.selectivity),
            type_match(reference, candidate, profile.type_match),
            profile
                .geography
                .as_ref()
                .zip(distance)
                .and_then(|(window, d)| geographic_proximity(d, window)),
        ]
        .into_iter()
        .flatten()
        .collect();

        let score = explanations.iter().fold(0.0, |acc, e| acc + e.contribution);

        Assessment {
            score,
            explanations,
            distance,
        }
    }

    /// Score one pair and admit it if the score is strictly above the threshold
    ///
    /// An institution is never connected to itself.
    pub fn score_pair(
        &self,
        reference: &Institution,
        candidate: &Institution,
    ) -> Option<Connection> {
        if reference.name == candidate.name {
            return None;
        }

        let assessment = self.assess(reference, candidate);
        self.admits(assessment.score)
            .then(|| Connection::from_assessment(candidate.name.clone(), assessment))
    }

    /// Whether a score clears the admission threshold
    #[inline]
    pub fn admits(&self, score: f64) -> bool {
        score > self.profile.admission_threshold
    }

    /// All admitted candidates of the named reference, in catalog order
    ///
    /// # Errors
    /// Fails with `ReferenceNotFound` if the catalog has no such institution.
    #[instrument(skip(self, catalog), fields(candidates = catalog.len()))]
    pub fn connections(&self, catalog: &Catalog, reference: &str) -> Result<Vec<Connection>> {
        let reference = catalog.reference(reference)?;

        #[cfg(feature = "parallel")]
        let connections: Vec<Connection> = catalog
            .iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .filter_map(|candidate| self.score_pair(reference, candidate))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let connections: Vec<Connection> = catalog
            .iter()
            .filter_map(|candidate| self.score_pair(reference, candidate))
            .collect();

        debug!(
            admitted = connections.len(),
            threshold = self.profile.admission_threshold,
            "scored candidates"
        );
        Ok(connections)
    }
}
