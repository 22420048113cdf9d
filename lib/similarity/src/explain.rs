//! Explainability for affinity results
//!
//! Provides the output structures that explain how a composite score was
//! reached: one [`Explanation`] per factor that fired, in evaluation order.

use crate::theme::ThemeSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One dimension of similarity, in evaluation order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Programs,
    Specializations,
    Ranking,
    Students,
    Selectivity,
    TypeMatch,
    Geography,
}

impl Factor {
    pub fn name(self) -> &'static str {
        match self {
            Factor::Programs => "programs",
            Factor::Specializations => "specializations",
            Factor::Ranking => "ranking",
            Factor::Students => "students",
            Factor::Selectivity => "selectivity",
            Factor::TypeMatch => "type_match",
            Factor::Geography => "geography",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single factor contribution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Explanation {
    pub factor: Factor,
    /// Weighted contribution to the composite score, always positive
    pub contribution: f64,
    /// Human-readable line for the explanation trail
    pub text: String,
    /// Names that made the factor fire (shared programs, specializations, type)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched: Vec<String>,
    #[serde(default)]
    pub themes: ThemeSet,
}

impl Explanation {
    pub fn new(factor: Factor, contribution: f64, text: String) -> Self {
        Self {
            factor,
            contribution,
            text,
            matched: Vec::new(),
            themes: ThemeSet::empty(),
        }
    }

    /// Attach the names behind the contribution and tag their themes
    pub fn with_matched(mut self, matched: Vec<String>) -> Self {
        self.themes = ThemeSet::classify_all(matched.iter().map(String::as_str));
        self.matched = matched;
        self
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Unthresholded breakdown of one reference/candidate pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assessment {
    pub score: f64,
    pub explanations: Vec<Explanation>,
    /// Degree-space distance, `None` when either side lacks coordinates
    pub distance: Option<f64>,
}

/// An admitted candidate of a reference institution
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Connection {
    pub candidate: String,
    pub score: f64,
    pub explanations: Vec<Explanation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Connection {
    pub fn from_assessment(candidate: impl Into<String>, assessment: Assessment) -> Self {
        Self {
            candidate: candidate.into(),
            score: assessment.score,
            explanations: assessment.explanations,
            distance: assessment.distance,
        }
    }

    /// Explanation lines in evaluation order
    pub fn explanation_trail(&self) -> impl Iterator<Item = &str> {
        self.explanations.iter().map(|e| e.text.as_str())
    }

    /// Union of the themes of every explanation
    pub fn themes(&self) -> ThemeSet {
        self.explanations
            .iter()
            .fold(ThemeSet::empty(), |set, e| set.union(e.themes))
    }

    pub fn contribution(&self, factor: Factor) -> Option<f64> {
        self.explanations
            .iter()
            .find(|e| e.factor == factor)
            .map(|e| e.contribution)
    }

    /// The factor with the largest contribution
    pub fn top_factor(&self) -> Option<Factor> {
        self.explanations
            .iter()
            .max_by(|a, b| a.contribution.total_cmp(&b.contribution))
            .map(|e| e.factor)
    }
}

/// Summary statistics for a set of connections
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConnectionStats {
    /// Number of candidates considered
    pub candidates_count: usize,
    /// Number of connections admitted
    pub results_count: usize,
    pub avg_score: f64,
    pub best_score: f64,
    pub lowest_score: f64,
    /// Factor that contributed most to the best connection
    pub top_contributing_factor: Option<Factor>,
}

impl ConnectionStats {
    /// Compute stats from connections ranked by score
    pub fn compute(ranked: &[Connection], candidates_count: usize) -> Self {
        let (Some(best), Some(lowest)) = (ranked.first(), ranked.last()) else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                lowest_score: 0.0,
                top_contributing_factor: None,
            };
        };

        let avg_score = ranked.iter().map(|c| c.score).sum::<f64>() / ranked.len() as f64;

        Self {
            candidates_count,
            results_count: ranked.len(),
            avg_score,
            best_score: best.score,
            lowest_score: lowest.score,
            top_contributing_factor: best.top_factor(),
        }
    }
}
