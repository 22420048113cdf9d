//! Thematic clustering of connections
//!
//! Buckets are independent filters over the theme tags of each connection:
//! a connection can land in none, one or several of them.

use crate::explain::Connection;
use crate::rank::top_n;
use crate::theme::Theme;
use serde::Serialize;

/// Connections sharing one theme, in input order
#[derive(Debug, Clone, Serialize)]
pub struct ThemeCluster<'a> {
    pub theme: Theme,
    pub members: Vec<&'a Connection>,
}

impl<'a> ThemeCluster<'a> {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The first `n` members for display
    pub fn preview(&self, n: usize) -> &[&'a Connection] {
        top_n(&self.members, n)
    }
}

/// One cluster per theme, in [`Theme::ALL`] order
pub fn cluster_by_theme(connections: &[Connection]) -> Vec<ThemeCluster<'_>> {
    Theme::ALL
        .into_iter()
        .map(|theme| ThemeCluster {
            theme,
            members: connections
                .iter()
                .filter(|c| c.themes().contains(theme))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explain::{Explanation, Factor};

    fn conn(name: &str, score: f64, matched: &[&str]) -> Connection {
        let explanation = Explanation::new(
            Factor::Specializations,
            score,
            format!("Shared specializations: {} (+{:.1})", matched.len(), score),
        )
        .with_matched(matched.iter().map(|s| s.to_string()).collect());

        Connection {
            candidate: name.to_string(),
            score,
            explanations: vec![explanation],
            distance: None,
        }
    }

    #[test]
    fn test_design_membership_without_program_overlap() {
        let connections = vec![conn("Offenbach", 8.0, &["Product Design", "Typography"])];
        let clusters = cluster_by_theme(&connections);

        let design = clusters.iter().find(|c| c.theme == Theme::Design).unwrap();
        assert_eq!(design.len(), 1);
        assert_eq!(connections[0].contribution(Factor::Programs), None);
    }

    #[test]
    fn test_buckets_overlap() {
        let connections = vec![
            conn("A", 9.0, &["Digital Design"]),
            conn("B", 6.0, &["Painting"]),
            conn("C", 4.0, &["Fine Art", "Interactive Media"]),
        ];
        let clusters = cluster_by_theme(&connections);

        assert_eq!(clusters.len(), 3);
        let media: Vec<_> = clusters[0].members.iter().map(|c| c.candidate.as_str()).collect();
        let design: Vec<_> = clusters[1].members.iter().map(|c| c.candidate.as_str()).collect();
        let arts: Vec<_> = clusters[2].members.iter().map(|c| c.candidate.as_str()).collect();
        assert_eq!(media, vec!["A", "C"]);
        assert_eq!(design, vec!["A"]);
        assert_eq!(arts, vec!["C"]);
    }

    #[test]
    fn test_preview_caps_members() {
        let connections: Vec<_> = (0..7)
            .map(|i| conn(&format!("School {i}"), 10.0 - i as f64, &["Media Art"]))
            .collect();
        let clusters = cluster_by_theme(&connections);

        assert_eq!(clusters[0].len(), 7);
        assert_eq!(clusters[0].preview(5).len(), 5);
        assert_eq!(clusters[0].preview(5)[0].candidate, "School 0");
    }

    #[test]
    fn test_untagged_connection_in_no_bucket() {
        let connections = vec![conn("Film School", 3.0, &["Cinematography"])];
        assert!(cluster_by_theme(&connections).iter().all(ThemeCluster::is_empty));
    }
}
