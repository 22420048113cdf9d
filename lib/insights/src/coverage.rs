// Simple counts of how much of a catalog carries the enriched fields

use affinity_core::Catalog;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Coverage {
    pub institutions: usize,
    /// National rank plus at least one student-body statistic
    pub with_profile_data: usize,
    pub with_coordinates: usize,
    pub with_programs: usize,
}

impl Coverage {
    pub fn compute(catalog: &Catalog) -> Self {
        catalog.iter().fold(
            Self {
                institutions: catalog.len(),
                ..Self::default()
            },
            |mut acc, inst| {
                acc.with_profile_data += usize::from(inst.has_profile_data());
                acc.with_coordinates += usize::from(inst.coordinates.is_some());
                acc.with_programs += usize::from(!inst.programs.is_empty());
                acc
            },
        )
    }

    /// Share of institutions with profile data, 0.0 for an empty catalog
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.institutions == 0 {
            return 0.0;
        }
        self.with_profile_data as f64 / self.institutions as f64
    }
}
