//! # Affinity Core
//!
//! Data model for the affinity engine.
//!
//! This crate provides the read-only records every other crate consumes:
//!
//! - [`Institution`] - One school with its programs and optional statistics
//! - [`Catalog`] - Institutions keyed by unique name, iterated in name order
//! - [`Dataset`] - A catalog plus collaboration list and cluster table
//!
//! ## Example
//!
//! ```rust
//! use affinity_core::{Catalog, Institution, Program};
//!
//! let catalog: Catalog = [
//!     Institution::new("HfK Bremen", "Art Academy")
//!         .with_national_rank(10)
//!         .with_program(Program::new("Fine Art")),
//!     Institution::new("UdK Berlin", "University"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let reference = catalog.reference("HfK Bremen").unwrap();
//! assert_eq!(reference.ranking.national, Some(10));
//! ```

pub mod catalog;
pub mod dataset;
pub mod error;
pub mod institution;

pub use catalog::Catalog;
pub use dataset::{Collaboration, Dataset, Relationships, SimilarityMatrix};
pub use error::{Error, Result};
pub use institution::{
    Coordinates, DigitalInfrastructure, EmploymentOutcomes, FinancialData, Institution,
    InternationalProfile, Program, Ranking, ResearchInnovation, Stats, Sustainability,
};
