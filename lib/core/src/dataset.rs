//! Dataset snapshot
//!
//! Everything a caller hands to the engine and the leaderboards at once:
//! the institution catalog plus the collaboration list and the pre-computed
//! cluster table that ship alongside it.

use crate::{Catalog, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// One academic partnership `(inst_a, inst_b, strength)`
///
/// Serialized as a three-element JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaboration(pub String, pub String, pub f64);

impl Collaboration {
    #[inline]
    #[must_use]
    pub fn new(a: impl Into<String>, b: impl Into<String>, strength: f64) -> Self {
        Self(a.into(), b.into(), strength)
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.0, &self.1)
    }

    pub fn strength(&self) -> f64 {
        self.2
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationships {
    #[serde(default)]
    pub academic_collaborations: Vec<Collaboration>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    /// Pre-computed cluster table, cluster name to member names
    #[serde(default)]
    pub program_overlap: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub universities: Catalog,
    #[serde(default)]
    pub relationships: Relationships,
    #[serde(default)]
    pub similarity_matrix: SimilarityMatrix,
}

impl Dataset {
    #[inline]
    #[must_use]
    pub fn new(universities: Catalog) -> Self {
        Self {
            universities,
            ..Self::default()
        }
    }

    /// Parse a JSON snapshot
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON snapshot from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn collaborations(&self) -> &[Collaboration] {
        &self.relationships.academic_collaborations
    }

    pub fn cluster_table(&self) -> &BTreeMap<String, Vec<String>> {
        &self.similarity_matrix.program_overlap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot() {
        let json = r#"{
            "universities": {
                "HfK Bremen": {"type": "Art Academy", "city": "Bremen"},
                "UdK Berlin": {"type": "University", "city": "Berlin"}
            },
            "relationships": {
                "academic_collaborations": [["HfK Bremen", "UdK Berlin", 0.8]]
            },
            "similarity_matrix": {
                "program_overlap": {"fine_arts_focus": ["HfK Bremen", "UdK Berlin"]}
            }
        }"#;

        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.universities.len(), 2);
        assert_eq!(dataset.collaborations().len(), 1);
        assert_eq!(dataset.collaborations()[0].endpoints(), ("HfK Bremen", "UdK Berlin"));
        assert!((dataset.collaborations()[0].strength() - 0.8).abs() < 1e-12);
        assert_eq!(dataset.cluster_table()["fine_arts_focus"].len(), 2);
    }

    #[test]
    fn test_optional_sections_default_empty() {
        let dataset = Dataset::from_json_str(r#"{"universities": {}}"#).unwrap();
        assert!(dataset.universities.is_empty());
        assert!(dataset.collaborations().is_empty());
        assert!(dataset.cluster_table().is_empty());
    }

    #[test]
    fn test_malformed_snapshot_is_error() {
        assert!(matches!(
            Dataset::from_json_str(r#"{"universities": []}"#),
            Err(crate::Error::Serialization(_))
        ));
    }
}
