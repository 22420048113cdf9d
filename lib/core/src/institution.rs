//! Institution record model
//!
//! The normalized in-memory shape of one school as read by the scorers and
//! leaderboards. Every field that may be missing from a dataset is an
//! `Option`; consumers treat `None` as "not applicable", never as zero.

use serde::{Deserialize, Serialize};

/// Geographic position in degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[inline]
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ranking {
    /// National rank, lower is better
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    /// Enrolled students. Signed so that malformed input survives loading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<i64>,
    /// Share of accepted applicants in `[0, 1]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founded: Option<i32>,
}

/// A study program offered by exactly one institution
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Program {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
}

impl Program {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            degree: None,
            specializations: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_specializations<I, S>(mut self, specializations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specializations
            .extend(specializations.into_iter().map(Into::into));
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmploymentOutcomes {
    pub employment_rate_1_year: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinancialData {
    /// Monthly living costs in the institution's city
    pub living_costs_city: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InternationalProfile {
    pub international_students_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sustainability {
    pub renewable_energy_percentage: f64,
    #[serde(alias = "carbon_neutral_target_year")]
    pub carbon_neutral_target: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchInnovation {
    pub research_projects_active: u32,
    pub research_funding_millions: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DigitalInfrastructure {
    pub digital_fabrication_labs: u32,
    pub vr_ar_facilities: u32,
    pub tech_equipment_budget_per_student: f64,
}

/// One school record
///
/// `name` is the catalog key and must be unique within a catalog. Records
/// loaded from a keyed map always take the key as their name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Institution {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub ranking: Ranking,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub programs: Vec<Program>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_outcomes: Option<EmploymentOutcomes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_data: Option<FinancialData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub international_profile: Option<InternationalProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability: Option<Sustainability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_innovation: Option<ResearchInnovation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_infrastructure: Option<DigitalInfrastructure>,
}

impl Institution {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lat, lng));
        self
    }

    #[inline]
    #[must_use]
    pub fn with_national_rank(mut self, rank: u32) -> Self {
        self.ranking.national = Some(rank);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_students(mut self, students: i64) -> Self {
        self.stats.students = Some(students);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_acceptance_rate(mut self, rate: f64) -> Self {
        self.stats.acceptance_rate = Some(rate);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_program(mut self, program: Program) -> Self {
        self.programs.push(program);
        self
    }

    /// Program names in declaration order
    pub fn program_names(&self) -> impl Iterator<Item = &str> {
        self.programs.iter().map(|p| p.name.as_str())
    }

    /// Specializations across all programs, duplicates included
    pub fn specializations(&self) -> impl Iterator<Item = &str> {
        self.programs
            .iter()
            .flat_map(|p| p.specializations.iter().map(String::as_str))
    }

    /// True when both national ranking and student statistics are present
    pub fn has_profile_data(&self) -> bool {
        self.ranking.national.is_some()
            && (self.stats.students.is_some() || self.stats.acceptance_rate.is_some())
    }
}
