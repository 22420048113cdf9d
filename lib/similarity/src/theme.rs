//! Thematic tags
//!
//! Scorers tag each explanation with the themes of the names that made the
//! factor fire, so clustering is a set membership test rather than a search
//! over formatted text.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Media,
    Design,
    FineArts,
}

impl Theme {
    /// All themes in reporting order
    pub const ALL: [Theme; 3] = [Theme::Media, Theme::Design, Theme::FineArts];

    /// Case-sensitive keywords that place a name in this theme
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Theme::Media => &["Media", "Digital", "Interactive"],
            Theme::Design => &["Design"],
            Theme::FineArts => &["Art", "Fine"],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Media => "media cluster",
            Theme::Design => "design cluster",
            Theme::FineArts => "fine-arts cluster",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Theme::Media => 0b001,
            Theme::Design => 0b010,
            Theme::FineArts => 0b100,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A set of themes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ThemeSet(u8);

impl ThemeSet {
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Themes whose keywords occur in `text`
    pub fn classify(text: &str) -> Self {
        Theme::ALL
            .into_iter()
            .filter(|theme| theme.keywords().iter().any(|kw| text.contains(kw)))
            .collect()
    }

    /// Union of the themes of every name
    pub fn classify_all<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names
            .into_iter()
            .fold(Self::empty(), |set, name| set.union(Self::classify(name)))
    }

    #[inline]
    pub fn insert(&mut self, theme: Theme) {
        self.0 |= theme.bit();
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, theme: Theme) -> bool {
        self.0 & theme.bit() != 0
    }

    #[inline]
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Theme> + '_ {
        Theme::ALL.into_iter().filter(|theme| self.contains(*theme))
    }
}

impl FromIterator<Theme> for ThemeSet {
    fn from_iter<I: IntoIterator<Item = Theme>>(iter: I) -> Self {
        let mut set = Self::empty();
        for theme in iter {
            set.insert(theme);
        }
        set
    }
}

impl Serialize for ThemeSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for ThemeSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Theme>::deserialize(deserializer).map(|themes| themes.into_iter().collect())
    }
}
