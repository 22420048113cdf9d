//! # Affinity Similarity
//!
//! A multi-factor similarity engine for institution records.
//!
//! This crate scores every institution of a catalog against a reference
//! institution and derives the secondary views the graph visualization needs.
//!
//! ## Features
//!
//! - **Profiles**: One weight per factor plus windows and an admission threshold,
//!   with `general` and `clustering` presets
//! - **Factor scorers**: Programs, specializations, ranking, student body,
//!   selectivity, type and geography
//! - **Explainability**: Ordered per-factor contributions with theme tags
//! - **Ranking**: By score and, independently, by geographic distance
//! - **Thematic clusters**: Media, design and fine-arts buckets
//!
//! ## Example
//!
//! ```rust
//! use affinity_core::{Catalog, Institution, Program};
//! use affinity_similarity::{rank_by_score, AffinityEngine, Profile};
//!
//! let catalog: Catalog = [
//!     Institution::new("HfK Bremen", "Art Academy")
//!         .with_national_rank(10)
//!         .with_program(Program::new("Fine Art")),
//!     Institution::new("Kunsthochschule Kassel", "Art Academy")
//!         .with_national_rank(15)
//!         .with_program(Program::new("Fine Art")),
//! ]
//! .into_iter()
//! .collect();
//!
//! let engine = AffinityEngine::new(Profile::general());
//! let ranked = rank_by_score(engine.connections(&catalog, "HfK Bremen").unwrap());
//! assert_eq!(ranked[0].candidate, "Kunsthochschule Kassel");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Profile   │────>│   Engine    │────>│ Connections │
//! │  (weights)  │     │  (factors)  │     │ (explained) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                          ┌─────────────────────┼─────────────────────┐
//!                          │                     │                     │
//!                   ┌─────────────┐       ┌─────────────┐       ┌─────────────┐
//!                   │   Ranking   │       │  Clusters   │       │    Stats    │
//!                   │(score, geo) │       │  (themes)   │       │             │
//!                   └─────────────┘       └─────────────┘       └─────────────┘
//! ```

pub mod cluster;
pub mod engine;
pub mod explain;
pub mod factors;
pub mod network;
pub mod profile;
pub mod rank;
pub mod theme;

pub use cluster::{cluster_by_theme, ThemeCluster};
pub use engine::AffinityEngine;
pub use explain::{Assessment, Connection, ConnectionStats, Explanation, Factor};
pub use network::{similarity_links, SimilarityLink, DEFAULT_STRENGTH_SCALE};
pub use profile::{PresetName, Profile, ProfileError, RatioGate, Window};
pub use rank::{rank_by_distance, rank_by_score, top_n};
pub use theme::{Theme, ThemeSet};
