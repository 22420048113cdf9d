//! # Affinity
//!
//! Multi-factor similarity and clustering for art and design schools.
//!
//! Given a catalog of institutions and one reference institution, Affinity
//! scores every other institution across up to seven factors, keeps the ones
//! above the profile's threshold, explains each score and groups the results
//! into media, design and fine-arts clusters.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! affinity connections --dataset schools.json --reference "HfK Bremen"
//! affinity network --dataset schools.json --profile clustering
//! affinity leaderboards --dataset schools.json --top 5
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use affinity::prelude::*;
//!
//! let catalog: Catalog = [
//!     Institution::new("HfK Bremen", "Art Academy")
//!         .with_coordinates(53.08, 8.80)
//!         .with_program(Program::new("Digital Media")),
//!     Institution::new("HFBK Hamburg", "Art Academy")
//!         .with_coordinates(53.57, 10.03)
//!         .with_program(Program::new("Digital Media")),
//! ]
//! .into_iter()
//! .collect();
//!
//! let engine = AffinityEngine::new(Profile::general());
//! let ranked = rank_by_score(engine.connections(&catalog, "HfK Bremen")?);
//! let clusters = cluster_by_theme(&ranked);
//! assert_eq!(clusters[0].theme, Theme::Media);
//! assert_eq!(clusters[0].len(), 1);
//! # Ok::<(), affinity::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! - `affinity-core` - Institution records, the catalog and the dataset file
//! - `affinity-similarity` - Profiles, factor scorers, the engine, ranking and clusters
//! - `affinity-insights` - Leaderboards and coverage over a whole dataset
//!
//! ## Features
//!
//! - **Two scoring profiles**: `general` and `clustering`, or any validated custom profile
//! - **Explainable scores**: Every contribution carries a human-readable line
//! - **Spatial view**: Nearest admitted institutions by coordinate distance
//! - **Parallel scoring**: Optional `parallel` feature backed by rayon

// Re-export core types
pub use affinity_core::{
    Catalog, Collaboration, Coordinates, Dataset, Error, Institution, Program, Result,
};

// Re-export the engine
pub use affinity_similarity::{
    cluster_by_theme, rank_by_distance, rank_by_score, similarity_links, top_n, AffinityEngine,
    Connection, ConnectionStats, Explanation, Factor, PresetName, Profile, ProfileError,
    SimilarityLink, Theme, ThemeCluster, ThemeSet, DEFAULT_STRENGTH_SCALE,
};

// Re-export insights
pub use affinity_insights::{Coverage, Leaderboards};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        cluster_by_theme, rank_by_distance, rank_by_score, top_n, AffinityEngine, Catalog,
        Connection, ConnectionStats, Coverage, Dataset, Error, Factor, Institution, Leaderboards,
        PresetName, Profile, Program, Result, Theme,
    };
}

/// Individual factor scorers
pub mod factors {
    pub use affinity_similarity::factors::*;
}
