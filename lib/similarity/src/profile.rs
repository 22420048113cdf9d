//! Scoring profiles
//!
//! A profile holds every tunable of the composite score: one weight per
//! factor, the proximity windows, the optional geography bonus and the
//! admission threshold. The two views of the visualization are named presets
//! of the same structure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear proximity term
///
/// Contributes `((span - |delta|) / span) * weight` while `|delta| <= span`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Window {
    pub span: f64,
    pub weight: f64,
}

impl Window {
    #[inline]
    #[must_use]
    pub const fn new(span: f64, weight: f64) -> Self {
        Self { span, weight }
    }

    /// Closeness in `[0, 1]` for a difference, `None` outside the window
    #[inline]
    pub fn closeness(&self, delta: f64) -> Option<f64> {
        let delta = delta.abs();
        if delta <= self.span {
            Some((self.span - delta) / self.span)
        } else {
            None
        }
    }

    fn validate(&self, factor: &'static str) -> Result<(), ProfileError> {
        if !self.span.is_finite() || self.span <= 0.0 {
            return Err(ProfileError::InvalidSpan(factor));
        }
        check_weight(factor, self.weight)
    }
}

/// Ratio term
///
/// Contributes `ratio * weight` when `ratio > min_ratio`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RatioGate {
    pub min_ratio: f64,
    pub weight: f64,
}

impl RatioGate {
    #[inline]
    #[must_use]
    pub const fn new(min_ratio: f64, weight: f64) -> Self {
        Self { min_ratio, weight }
    }

    fn validate(&self, factor: &'static str) -> Result<(), ProfileError> {
        if !(0.0..1.0).contains(&self.min_ratio) {
            return Err(ProfileError::InvalidRatio(factor));
        }
        check_weight(factor, self.weight)
    }
}

fn check_weight(factor: &'static str, weight: f64) -> Result<(), ProfileError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(ProfileError::InvalidWeight(factor));
    }
    Ok(())
}

/// Weights and thresholds of the composite similarity score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    /// Weight per shared program name
    pub programs: f64,
    /// Weight per shared specialization
    pub specializations: f64,
    /// Window over the national rank difference
    pub ranking: Window,
    /// Gate over the student body size ratio
    pub students: RatioGate,
    /// Window over the acceptance rate difference
    pub selectivity: Window,
    /// Bonus when both institutions share a type
    pub type_match: f64,
    /// Proximity bonus over the degree-space distance, folded into the score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geography: Option<Window>,
    /// A candidate is admitted only if its score is strictly greater
    pub admission_threshold: f64,
    /// Upper bound on distinct program names and specializations considered
    /// per institution
    pub max_set_len: usize,
}

pub const DEFAULT_MAX_SET_LEN: usize = 1024;

impl Default for Profile {
    fn default() -> Self {
        Self::general()
    }
}

impl Profile {
    /// The "top connections" view
    pub fn general() -> Self {
        Self {
            programs: 3.0,
            specializations: 2.0,
            ranking: Window::new(20.0, 1.5),
            students: RatioGate::new(0.4, 1.0),
            selectivity: Window::new(0.3, 1.2),
            type_match: 2.0,
            geography: None,
            admission_threshold: 1.0,
            max_set_len: DEFAULT_MAX_SET_LEN,
        }
    }

    /// The "3D clustering" view
    ///
    /// Heavier specialization weight, a tighter ranking window, an
    /// acceptance-rate bonus and a geography bonus within 5 degrees.
    pub fn clustering() -> Self {
        Self {
            programs: 3.0,
            specializations: 4.0,
            ranking: Window::new(10.0, 1.5),
            students: RatioGate::new(0.5, 1.0),
            selectivity: Window::new(0.2, 1.0),
            type_match: 2.0,
            geography: Some(Window::new(5.0, 1.0)),
            admission_threshold: 3.0,
            max_set_len: DEFAULT_MAX_SET_LEN,
        }
    }

    pub fn preset(name: PresetName) -> Self {
        match name {
            PresetName::General => Self::general(),
            PresetName::Clustering => Self::clustering(),
        }
    }

    /// Validate the profile
    /// - weights are finite and non-negative
    /// - window spans are finite and positive
    /// - gate ratios lie in `[0, 1)`
    /// - the threshold is finite and the set bound non-zero
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_weight("programs", self.programs)?;
        check_weight("specializations", self.specializations)?;
        self.ranking.validate("ranking")?;
        self.students.validate("students")?;
        self.selectivity.validate("selectivity")?;
        check_weight("type_match", self.type_match)?;
        if let Some(geography) = &self.geography {
            geography.validate("geography")?;
        }
        if !self.admission_threshold.is_finite() {
            return Err(ProfileError::InvalidThreshold);
        }
        if self.max_set_len == 0 {
            return Err(ProfileError::ZeroSetLen);
        }
        Ok(())
    }

    /// Sets the admission threshold.
    ///
    /// # Errors
    /// Fails if the threshold is not finite.
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, ProfileError> {
        self.admission_threshold = threshold;
        self.validate()?;
        Ok(self)
    }

    /// Sets the per-program and per-specialization weights.
    pub fn with_overlap_weights(
        mut self,
        programs: f64,
        specializations: f64,
    ) -> Result<Self, ProfileError> {
        self.programs = programs;
        self.specializations = specializations;
        self.validate()?;
        Ok(self)
    }

    /// Sets the type match bonus.
    pub fn with_type_match(mut self, weight: f64) -> Result<Self, ProfileError> {
        self.type_match = weight;
        self.validate()?;
        Ok(self)
    }

    /// Sets or clears the geography bonus.
    pub fn with_geography(mut self, geography: Option<Window>) -> Result<Self, ProfileError> {
        self.geography = geography;
        self.validate()?;
        Ok(self)
    }

    /// Sets the bound on distinct names considered per institution.
    pub fn with_max_set_len(mut self, max_set_len: usize) -> Result<Self, ProfileError> {
        self.max_set_len = max_set_len;
        self.validate()?;
        Ok(self)
    }
}

/// Names of the built-in presets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    #[default]
    General,
    Clustering,
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetName::General => f.write_str("general"),
            PresetName::Clustering => f.write_str("clustering"),
        }
    }
}

impl FromStr for PresetName {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(PresetName::General),
            "clustering" | "3d" => Ok(PresetName::Clustering),
            _ => Err(ProfileError::UnknownPreset(s.to_string())),
        }
    }
}

/// Errors that can occur during profile validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("Factor '{0}' has a negative or non-finite weight")]
    InvalidWeight(&'static str),

    #[error("Factor '{0}' needs a positive, finite window span")]
    InvalidSpan(&'static str),

    #[error("Factor '{0}' needs a minimum ratio within [0, 1)")]
    InvalidRatio(&'static str),

    #[error("Admission threshold must be finite")]
    InvalidThreshold,

    #[error("Maximum set length must be positive")]
    ZeroSetLen,

    #[error("Unknown profile preset '{0}'")]
    UnknownPreset(String),
}

impl From<ProfileError> for affinity_core::Error {
    fn from(err: ProfileError) -> Self {
        affinity_core::Error::InvalidConfig(err.to_string())
    }
}
