//! # Affinity Insights
//!
//! Dataset-wide views that need no reference institution: leaderboards over
//! the enriched records, the collaboration network's degrees, the dataset's
//! own cluster table and a coverage summary.

pub mod coverage;
pub mod leaderboard;

pub use coverage::Coverage;
pub use leaderboard::{
    cluster_table, collaboration_degrees, digital_leaders, digital_score, employment_leaders,
    international_leaders, living_cost_leaders, research_leaders, research_score,
    sustainability_leaders, sustainability_score, ClusterPreview, CollaborationDegree,
    DigitalStanding, Leaderboards, LivingCostStanding, ResearchStanding, Standing,
    SustainabilityStanding, DEFAULT_CLUSTER_PREVIEW,
};
