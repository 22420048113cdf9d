use crate::{Error, Institution, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Institutions keyed by unique name
///
/// Iteration is ordered by name so every derived view is reproducible.
/// Deserializes from a JSON object `{ name: record }`; the key is the
/// record's identity and overrides any `name` field it carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Institution>", into = "BTreeMap<String, Institution>")]
pub struct Catalog {
    institutions: BTreeMap<String, Institution>,
}

impl Catalog {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its own name, returning the record it replaced
    pub fn insert(&mut self, institution: Institution) -> Option<Institution> {
        self.institutions
            .insert(institution.name.clone(), institution)
    }

    pub fn get(&self, name: &str) -> Option<&Institution> {
        self.institutions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.institutions.contains_key(name)
    }

    /// Look up the reference institution of a computation
    ///
    /// # Errors
    /// Fails with [`Error::ReferenceNotFound`] if no record carries the name.
    pub fn reference(&self, name: &str) -> Result<&Institution> {
        self.get(name)
            .ok_or_else(|| Error::ReferenceNotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Institution> {
        self.institutions.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.institutions.keys().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.institutions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.institutions.is_empty()
    }
}

impl From<BTreeMap<String, Institution>> for Catalog {
    fn from(mut institutions: BTreeMap<String, Institution>) -> Self {
        for (key, institution) in &mut institutions {
            institution.name.clone_from(key);
        }
        Self { institutions }
    }
}

impl From<Catalog> for BTreeMap<String, Institution> {
    fn from(catalog: Catalog) -> Self {
        catalog.institutions
    }
}

impl FromIterator<Institution> for Catalog {
    fn from_iter<I: IntoIterator<Item = Institution>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for institution in iter {
            catalog.insert(institution);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Institution;
    type IntoIter = std::collections::btree_map::Values<'a, String, Institution>;

    fn into_iter(self) -> Self::IntoIter {
        self.institutions.values()
    }
}
