//! Factor scorers
//!
//! Each scorer compares one dimension of two institutions and returns the
//! weighted contribution as an [`Explanation`]. `None` means the factor does
//! not apply (a field is missing on either side) or contributes nothing.
//! Every scorer is symmetric in its two arguments.

use crate::explain::{Explanation, Factor};
use crate::profile::{RatioGate, Window};
use affinity_core::Institution;
use ahash::AHashSet;

/// Collect up to `limit` distinct names
fn bounded_set<'a>(names: impl Iterator<Item = &'a str>, limit: usize) -> AHashSet<&'a str> {
    let mut set = AHashSet::new();
    for name in names {
        if set.len() >= limit {
            break;
        }
        set.insert(name);
    }
    set
}

/// Intersection of two name sets, sorted for a stable explanation
fn shared_names(a: &AHashSet<&str>, b: &AHashSet<&str>) -> Vec<String> {
    let mut shared: Vec<String> = a.intersection(b).map(|s| s.to_string()).collect();
    shared.sort_unstable();
    shared
}

/// Shared program names, exact string match
pub fn program_overlap(
    reference: &Institution,
    candidate: &Institution,
    weight: f64,
    max_set_len: usize,
) -> Option<Explanation> {
    let ours = bounded_set(reference.program_names(), max_set_len);
    let theirs = bounded_set(candidate.program_names(), max_set_len);
    let shared = shared_names(&ours, &theirs);

    let contribution = shared.len() as f64 * weight;
    if contribution <= 0.0 {
        return None;
    }

    let text = format!("Shared programs: {} (+{:.1})", shared.len(), contribution);
    Some(Explanation::new(Factor::Programs, contribution, text).with_matched(shared))
}

/// Shared specializations, unioned across all programs of each side
pub fn specialization_overlap(
    reference: &Institution,
    candidate: &Institution,
    weight: f64,
    max_set_len: usize,
) -> Option<Explanation> {
    let ours = bounded_set(reference.specializations(), max_set_len);
    let theirs = bounded_set(candidate.specializations(), max_set_len);
    let shared = shared_names(&ours, &theirs);

    let contribution = shared.len() as f64 * weight;
    if contribution <= 0.0 {
        return None;
    }

    let text = format!("Shared specializations: {} (+{:.1})", shared.len(), contribution);
    Some(Explanation::new(Factor::Specializations, contribution, text).with_matched(shared))
}

/// Closeness of the national ranks
pub fn ranking_proximity(
    reference: &Institution,
    candidate: &Institution,
    window: &Window,
) -> Option<Explanation> {
    let (a, b) = (reference.ranking.national?, candidate.ranking.national?);
    let delta = (i64::from(a) - i64::from(b)).abs() as f64;
    let closeness = window.closeness(delta)?;

    let contribution = closeness * window.weight;
    if contribution <= 0.0 {
        return None;
    }

    let text = format!("Ranking similarity: {:.2} (+{:.2})", closeness, contribution);
    Some(Explanation::new(Factor::Ranking, contribution, text))
}

/// Ratio of the smaller to the larger student body
///
/// Non-positive counts are treated as missing.
pub fn student_body_proximity(
    reference: &Institution,
    candidate: &Institution,
    gate: &RatioGate,
) -> Option<Explanation> {
    let (a, b) = (reference.stats.students?, candidate.stats.students?);
    if a <= 0 || b <= 0 {
        return None;
    }

    let ratio = a.min(b) as f64 / a.max(b) as f64;
    if ratio <= gate.min_ratio {
        return None;
    }

    let contribution = ratio * gate.weight;
    if contribution <= 0.0 {
        return None;
    }

    let text = format!("Student body similarity: {:.2} (+{:.2})", ratio, contribution);
    Some(Explanation::new(Factor::Students, contribution, text))
}

/// Closeness of the acceptance rates
pub fn selectivity_proximity(
    reference: &Institution,
    candidate: &Institution,
    window: &Window,
) -> Option<Explanation> {
    let (a, b) = (reference.stats.acceptance_rate?, candidate.stats.acceptance_rate?);
    if !a.is_finite() || !b.is_finite() {
        return None;
    }

    let closeness = window.closeness(a - b)?;
    let contribution = closeness * window.weight;
    if contribution <= 0.0 {
        return None;
    }

    let text = format!("Selectivity similarity: {:.2} (+{:.2})", closeness, contribution);
    Some(Explanation::new(Factor::Selectivity, contribution, text))
}

/// Bonus for an identical, non-empty type label
pub fn type_match(
    reference: &Institution,
    candidate: &Institution,
    weight: f64,
) -> Option<Explanation> {
    if reference.kind.is_empty() || reference.kind != candidate.kind || weight <= 0.0 {
        return None;
    }

    let text = format!("Same type ({}) (+{:.1})", reference.kind, weight);
    Some(
        Explanation::new(Factor::TypeMatch, weight, text)
            .with_matched(vec![reference.kind.clone()]),
    )
}

/// Plain Euclidean distance in degree space
///
/// Not a great-circle distance. `None` when either side lacks coordinates or
/// the result is not finite.
pub fn geographic_distance(reference: &Institution, candidate: &Institution) -> Option<f64> {
    let (a, b) = (reference.coordinates?, candidate.coordinates?);
    let distance = (a.lat - b.lat).hypot(a.lng - b.lng);
    distance.is_finite().then_some(distance)
}

/// Proximity bonus for a distance inside the window
pub fn geographic_proximity(distance: f64, window: &Window) -> Option<Explanation> {
    let closeness = window.closeness(distance)?;
    let contribution = closeness * window.weight;
    if contribution <= 0.0 {
        return None;
    }

    let text = format!("Geographic proximity: {:.2} (+{:.2})", distance, contribution);
    Some(Explanation::new(Factor::Geography, contribution, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use affinity_core::Program;

    fn with_programs(name: &str, programs: &[&str]) -> Institution {
        programs
            .iter()
            .fold(Institution::new(name, "Art Academy"), |inst, p| {
                inst.with_program(Program::new(*p))
            })
    }

    #[test]
    fn test_program_overlap_scales_linearly() {
        let a = with_programs("A", &["Fine Art", "Design", "Film", "Photography", "Sculpture"]);
        let b = with_programs("B", &["Fine Art", "Design", "Music"]);
        let c = with_programs("C", &["Fine Art", "Design", "Film", "Photography"]);

        let two = program_overlap(&a, &b, 3.0, 64).unwrap();
        let four = program_overlap(&a, &c, 3.0, 64).unwrap();
        assert_eq!(two.contribution, 6.0);
        assert_eq!(four.contribution, 12.0);
        assert_eq!(two.text, "Shared programs: 2 (+6.0)");
        assert_eq!(two.matched, vec!["Design".to_string(), "Fine Art".to_string()]);
    }

    #[test]
    fn test_program_overlap_none_when_disjoint() {
        let a = with_programs("A", &["Fine Art"]);
        let b = with_programs("B", &["Film"]);
        assert!(program_overlap(&a, &b, 3.0, 64).is_none());
    }

    #[test]
    fn test_duplicate_specializations_collapse() {
        let a = Institution::new("A", "University")
            .with_program(Program::new("Design").with_specializations(["UX Design", "Typography"]))
            .with_program(Program::new("Media").with_specializations(["UX Design"]));
        let b = Institution::new("B", "University")
            .with_program(Program::new("Design").with_specializations(["UX Design", "UX Design"]));

        let explanation = specialization_overlap(&a, &b, 2.0, 64).unwrap();
        assert_eq!(explanation.contribution, 2.0);
        assert!(explanation.themes.contains(Theme::Design));
    }

    #[test]
    fn test_set_len_bound() {
        let a = with_programs("A", &["P1", "P2", "P3"]);
        let b = with_programs("B", &["P1", "P2", "P3"]);
        assert_eq!(program_overlap(&a, &b, 1.0, 2).unwrap().contribution, 2.0);
    }

    #[test]
    fn test_ranking_proximity_window() {
        let window = Window::new(20.0, 1.5);
        let a = Institution::new("A", "").with_national_rank(10);
        let rank = |r| Institution::new("B", "").with_national_rank(r);

        let same = ranking_proximity(&a, &rank(10), &window).unwrap();
        assert_eq!(same.contribution, 1.5);

        let near = ranking_proximity(&a, &rank(15), &window).unwrap();
        assert!((near.contribution - 1.125).abs() < 1e-12);

        assert!(ranking_proximity(&a, &rank(31), &window).is_none());
        // exactly at the edge of the window contributes nothing
        assert!(ranking_proximity(&a, &rank(30), &window).is_none());
    }

    #[test]
    fn test_ranking_strictly_decreasing() {
        let window = Window::new(20.0, 1.5);
        let a = Institution::new("A", "").with_national_rank(50);
        let contributions: Vec<f64> = (0..20)
            .map(|d| {
                let b = Institution::new("B", "").with_national_rank(50 + d);
                ranking_proximity(&a, &b, &window).unwrap().contribution
            })
            .collect();
        assert!(contributions.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_ranking_requires_both() {
        let window = Window::new(20.0, 1.5);
        let a = Institution::new("A", "").with_national_rank(1);
        let b = Institution::new("B", "");
        assert!(ranking_proximity(&a, &b, &window).is_none());
        assert!(ranking_proximity(&b, &a, &window).is_none());
    }

    #[test]
    fn test_student_body_gate() {
        let gate = RatioGate::new(0.4, 1.0);
        let a = Institution::new("A", "").with_students(500);

        let students = |n| Institution::new("B", "").with_students(n);

        let close = student_body_proximity(&a, &students(600), &gate).unwrap();
        assert!((close.contribution - 500.0 / 600.0).abs() < 1e-12);

        assert!(student_body_proximity(&a, &students(2000), &gate).is_none());
    }

    #[test]
    fn test_student_body_non_positive_is_ignored() {
        let gate = RatioGate::new(0.4, 1.0);
        let a = Institution::new("A", "").with_students(-500);
        let b = Institution::new("B", "").with_students(-600);
        assert!(student_body_proximity(&a, &b, &gate).is_none());
        let zero = Institution::new("C", "").with_students(0);
        assert!(student_body_proximity(&zero, &zero, &gate).is_none());
    }

    #[test]
    fn test_selectivity_window() {
        let window = Window::new(0.3, 1.2);
        let a = Institution::new("A", "").with_acceptance_rate(0.2);

        let rate = |r| Institution::new("B", "").with_acceptance_rate(r);

        let close = selectivity_proximity(&a, &rate(0.35), &window).unwrap();
        assert!((close.contribution - 0.6).abs() < 1e-9);

        assert!(selectivity_proximity(&a, &rate(0.9), &window).is_none());
    }

    #[test]
    fn test_zero_acceptance_rate_is_a_value() {
        let window = Window::new(0.3, 1.2);
        let a = Institution::new("A", "").with_acceptance_rate(0.0);
        let b = Institution::new("B", "").with_acceptance_rate(0.0);
        assert_eq!(selectivity_proximity(&a, &b, &window).unwrap().contribution, 1.2);
    }

    #[test]
    fn test_type_match() {
        let a = Institution::new("A", "Art Academy");
        let b = Institution::new("B", "Art Academy");
        let c = Institution::new("C", "University");

        let matched = type_match(&a, &b, 2.0).unwrap();
        assert_eq!(matched.text, "Same type (Art Academy) (+2.0)");
        assert!(matched.themes.contains(Theme::FineArts));
        assert!(type_match(&a, &c, 2.0).is_none());
        assert!(type_match(&Institution::new("D", ""), &Institution::new("E", ""), 2.0).is_none());
    }

    #[test]
    fn test_geographic_distance() {
        let a = Institution::new("A", "").with_coordinates(50.0, 8.0);
        let b = Institution::new("B", "").with_coordinates(53.0, 12.0);
        assert!((geographic_distance(&a, &b).unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(geographic_distance(&a, &b), geographic_distance(&b, &a));
        assert!(geographic_distance(&a, &Institution::new("C", "")).is_none());

        let broken = Institution::new("D", "").with_coordinates(f64::NAN, 8.0);
        assert!(geographic_distance(&a, &broken).is_none());
    }

    #[test]
    fn test_geographic_proximity_bonus() {
        let window = Window::new(5.0, 1.0);
        let bonus = geographic_proximity(2.0, &window).unwrap();
        assert!((bonus.contribution - 0.6).abs() < 1e-12);
        assert_eq!(bonus.text, "Geographic proximity: 2.00 (+0.60)");
        assert!(geographic_proximity(5.0, &window).is_none());
        assert!(geographic_proximity(7.5, &window).is_none());
    }
}
