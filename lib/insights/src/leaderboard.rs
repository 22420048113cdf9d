//! Aggregate leaderboards
//!
//! Rank the whole catalog by single-institution metrics. No reference
//! institution is involved. Institutions missing the nested record a board
//! needs are skipped, as are non-finite metric values.

use affinity_core::{Catalog, Collaboration, Dataset, Institution};
use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// An institution and the metric it is ranked by
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Standing {
    pub institution: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LivingCostStanding {
    pub institution: String,
    pub city: String,
    pub monthly_cost: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SustainabilityStanding {
    pub institution: String,
    pub score: f64,
    pub carbon_neutral_target: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResearchStanding {
    pub institution: String,
    pub score: f64,
    pub active_projects: u32,
    pub funding_millions: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DigitalStanding {
    pub institution: String,
    pub score: f64,
    pub fab_labs: u32,
    pub vr_ar_facilities: u32,
    pub budget_per_student: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CollaborationDegree {
    pub institution: String,
    pub collaborations: usize,
}

/// A pre-computed cluster, passed through with a capped preview
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClusterPreview {
    pub name: String,
    pub total: usize,
    pub preview: Vec<String>,
    /// Members not shown in the preview
    pub remaining: usize,
}

/// Members shown per pre-computed cluster
pub const DEFAULT_CLUSTER_PREVIEW: usize = 3;

#[derive(Clone, Copy)]
enum Direction {
    Ascending,
    Descending,
}

/// Collect `(metric, row)` pairs for every applicable institution and sort
/// them, ties broken by institution name
fn rank_rows<T, F>(catalog: &Catalog, direction: Direction, mut row: F) -> Vec<T>
where
    F: FnMut(&Institution) -> Option<(f64, T)>,
{
    let mut rows: Vec<(OrderedFloat<f64>, &str, T)> = catalog
        .iter()
        .filter_map(|inst| {
            row(inst)
                .filter(|(metric, _)| metric.is_finite())
                .map(|(metric, r)| (OrderedFloat(metric), inst.name.as_str(), r))
        })
        .collect();

    rows.sort_by(|(ma, na, _), (mb, nb, _)| {
        let by_metric: Ordering = match direction {
            Direction::Ascending => ma.cmp(mb),
            Direction::Descending => mb.cmp(ma),
        };
        by_metric.then_with(|| na.cmp(nb))
    });

    rows.into_iter().map(|(_, _, r)| r).collect()
}

fn standing(inst: &Institution, value: f64) -> Standing {
    Standing {
        institution: inst.name.clone(),
        value,
    }
}

/// One-year employment rate, highest first
pub fn employment_leaders(catalog: &Catalog) -> Vec<Standing> {
    rank_rows(catalog, Direction::Descending, |inst| {
        let rate = inst.employment_outcomes.as_ref()?.employment_rate_1_year;
        Some((rate, standing(inst, rate)))
    })
}

/// Monthly living costs of the city, cheapest first
pub fn living_cost_leaders(catalog: &Catalog) -> Vec<LivingCostStanding> {
    rank_rows(catalog, Direction::Ascending, |inst| {
        let cost = inst.financial_data.as_ref()?.living_costs_city;
        Some((
            cost,
            LivingCostStanding {
                institution: inst.name.clone(),
                city: inst.city.clone(),
                monthly_cost: cost,
            },
        ))
    })
}

/// Share of international students, highest first
pub fn international_leaders(catalog: &Catalog) -> Vec<Standing> {
    rank_rows(catalog, Direction::Descending, |inst| {
        let share = inst
            .international_profile
            .as_ref()?
            .international_students_percentage;
        Some((share, standing(inst, share)))
    })
}

/// `renewable * 0.6 + (2040 - target) / 20 * 0.4`
pub fn sustainability_score(renewable_energy_percentage: f64, carbon_neutral_target: i32) -> f64 {
    renewable_energy_percentage * 0.6 + (2040.0 - f64::from(carbon_neutral_target)) / 20.0 * 0.4
}

/// `projects * 0.3 + funding * 0.7`
pub fn research_score(active_projects: u32, funding_millions: f64) -> f64 {
    f64::from(active_projects) * 0.3 + funding_millions * 0.7
}

/// `labs * 10 + vr_ar * 5 + budget * 0.01`
pub fn digital_score(fab_labs: u32, vr_ar_facilities: u32, budget_per_student: f64) -> f64 {
    f64::from(fab_labs) * 10.0 + f64::from(vr_ar_facilities) * 5.0 + budget_per_student * 0.01
}

pub fn sustainability_leaders(catalog: &Catalog) -> Vec<SustainabilityStanding> {
    rank_rows(catalog, Direction::Descending, |inst| {
        let s = inst.sustainability.as_ref()?;
        let score = sustainability_score(s.renewable_energy_percentage, s.carbon_neutral_target);
        Some((
            score,
            SustainabilityStanding {
                institution: inst.name.clone(),
                score,
                carbon_neutral_target: s.carbon_neutral_target,
            },
        ))
    })
}

pub fn research_leaders(catalog: &Catalog) -> Vec<ResearchStanding> {
    rank_rows(catalog, Direction::Descending, |inst| {
        let r = inst.research_innovation.as_ref()?;
        let score = research_score(r.research_projects_active, r.research_funding_millions);
        Some((
            score,
            ResearchStanding {
                institution: inst.name.clone(),
                score,
                active_projects: r.research_projects_active,
                funding_millions: r.research_funding_millions,
            },
        ))
    })
}

pub fn digital_leaders(catalog: &Catalog) -> Vec<DigitalStanding> {
    rank_rows(catalog, Direction::Descending, |inst| {
        let d = inst.digital_infrastructure.as_ref()?;
        let score = digital_score(
            d.digital_fabrication_labs,
            d.vr_ar_facilities,
            d.tech_equipment_budget_per_student,
        );
        Some((
            score,
            DigitalStanding {
                institution: inst.name.clone(),
                score,
                fab_labs: d.digital_fabrication_labs,
                vr_ar_facilities: d.vr_ar_facilities,
                budget_per_student: d.tech_equipment_budget_per_student,
            },
        ))
    })
}

/// Number of partnerships per institution, most connected first
///
/// The strength of a partnership does not count. Names need not be in the
/// catalog.
pub fn collaboration_degrees(collaborations: &[Collaboration]) -> Vec<CollaborationDegree> {
    let mut counts: AHashMap<&str, usize> = AHashMap::new();
    for collaboration in collaborations {
        let (a, b) = collaboration.endpoints();
        *counts.entry(a).or_insert(0) += 1;
        *counts.entry(b).or_insert(0) += 1;
    }

    let mut degrees: Vec<CollaborationDegree> = counts
        .into_iter()
        .map(|(name, collaborations)| CollaborationDegree {
            institution: name.to_string(),
            collaborations,
        })
        .collect();
    degrees.sort_by(|a, b| {
        b.collaborations
            .cmp(&a.collaborations)
            .then_with(|| a.institution.cmp(&b.institution))
    });
    degrees
}

/// The dataset's own cluster table, unchanged, with `preview` members each
pub fn cluster_table(table: &BTreeMap<String, Vec<String>>, preview: usize) -> Vec<ClusterPreview> {
    table
        .iter()
        .map(|(name, members)| {
            let shown = preview.min(members.len());
            ClusterPreview {
                name: name.clone(),
                total: members.len(),
                preview: members[..shown].to_vec(),
                remaining: members.len() - shown,
            }
        })
        .collect()
}

/// Every leaderboard of a dataset
#[derive(Debug, Clone, Serialize)]
pub struct Leaderboards {
    pub employment: Vec<Standing>,
    pub living_costs: Vec<LivingCostStanding>,
    pub international: Vec<Standing>,
    pub sustainability: Vec<SustainabilityStanding>,
    pub research: Vec<ResearchStanding>,
    pub digital: Vec<DigitalStanding>,
    /// Total partnerships in the collaboration network
    pub partnerships: usize,
    pub collaboration: Vec<CollaborationDegree>,
    pub clusters: Vec<ClusterPreview>,
}

impl Leaderboards {
    pub fn compute(dataset: &Dataset) -> Self {
        Self::compute_with_preview(dataset, DEFAULT_CLUSTER_PREVIEW)
    }

    #[instrument(skip_all, fields(institutions = dataset.universities.len()))]
    pub fn compute_with_preview(dataset: &Dataset, cluster_preview: usize) -> Self {
        let catalog = &dataset.universities;
        let boards = Self {
            employment: employment_leaders(catalog),
            living_costs: living_cost_leaders(catalog),
            international: international_leaders(catalog),
            sustainability: sustainability_leaders(catalog),
            research: research_leaders(catalog),
            digital: digital_leaders(catalog),
            partnerships: dataset.collaborations().len(),
            collaboration: collaboration_degrees(dataset.collaborations()),
            clusters: cluster_table(dataset.cluster_table(), cluster_preview),
        };
        debug!(
            employment = boards.employment.len(),
            collaboration = boards.collaboration.len(),
            "computed leaderboards"
        );
        boards
    }

    /// Truncate every board to its first `n` rows
    pub fn truncate(&mut self, n: usize) {
        self.employment.truncate(n);
        self.living_costs.truncate(n);
        self.international.truncate(n);
        self.sustainability.truncate(n);
        self.research.truncate(n);
        self.digital.truncate(n);
        self.collaboration.truncate(n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affinity_core::{
        DigitalInfrastructure, EmploymentOutcomes, FinancialData, InternationalProfile,
        ResearchInnovation, Sustainability,
    };

    fn with_employment(name: &str, rate: f64) -> Institution {
        let mut inst = Institution::new(name, "University");
        inst.employment_outcomes = Some(EmploymentOutcomes {
            employment_rate_1_year: rate,
        });
        inst
    }

    fn sustainability(renewable: f64, target: i32) -> Option<Sustainability> {
        Some(Sustainability {
            renewable_energy_percentage: renewable,
            carbon_neutral_target: target,
        })
    }

    fn research(projects: u32, funding: f64) -> Option<ResearchInnovation> {
        Some(ResearchInnovation {
            research_projects_active: projects,
            research_funding_millions: funding,
        })
    }

    fn names<T>(rows: &[T], name: impl Fn(&T) -> &str) -> Vec<&str> {
        rows.iter().map(name).collect()
    }

    #[test]
    fn test_employment_descending_skips_missing() {
        let catalog: Catalog = [
            with_employment("A", 0.7),
            with_employment("B", 0.9),
            Institution::new("C", "University"),
            with_employment("D", 0.7),
        ]
        .into_iter()
        .collect();

        let board = employment_leaders(&catalog);
        assert_eq!(names(&board, |s| &s.institution), vec!["B", "A", "D"]);
    }

    #[test]
    fn test_non_finite_metric_skipped() {
        let catalog: Catalog = [with_employment("A", f64::NAN), with_employment("B", 0.5)]
            .into_iter()
            .collect();
        assert_eq!(employment_leaders(&catalog).len(), 1);
    }

    #[test]
    fn test_living_costs_ascending_with_city() {
        let mut cheap = Institution::new("Leipzig HGB", "Art Academy");
        cheap.city = "Leipzig".into();
        cheap.financial_data = Some(FinancialData { living_costs_city: 850.0 });
        let mut dear = Institution::new("AdBK Munich", "Art Academy");
        dear.city = "Munich".into();
        dear.financial_data = Some(FinancialData { living_costs_city: 1400.0 });

        let catalog: Catalog = [dear, cheap].into_iter().collect();
        let board = living_cost_leaders(&catalog);
        assert_eq!(board[0].city, "Leipzig");
        assert_eq!(board[1].monthly_cost, 1400.0);
    }

    #[test]
    fn test_international_descending() {
        let mut a = Institution::new("A", "University");
        a.international_profile = Some(InternationalProfile {
            international_students_percentage: 0.12,
        });
        let mut b = Institution::new("B", "University");
        b.international_profile = Some(InternationalProfile {
            international_students_percentage: 0.31,
        });

        let catalog: Catalog = [a, b].into_iter().collect();
        assert_eq!(names(&international_leaders(&catalog), |s| &s.institution), vec!["B", "A"]);
    }

    #[test]
    fn test_composite_formulas() {
        assert!((sustainability_score(0.8, 2030) - (0.48 + 0.2)).abs() < 1e-12);
        assert!((research_score(10, 2.0) - 4.4).abs() < 1e-12);
        assert!((digital_score(2, 3, 1500.0) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_target_year_does_not_overflow() {
        let mut far = Institution::new("Far", "University");
        far.sustainability = sustainability(0.1, i32::MIN);
        let mut late = Institution::new("Late", "University");
        late.sustainability = sustainability(0.1, i32::MAX);
        let catalog: Catalog = [far, late].into_iter().collect();

        let board = sustainability_leaders(&catalog);
        assert_eq!(names(&board, |s| &s.institution), vec!["Far", "Late"]);
        assert!(board.iter().all(|row| row.score.is_finite()));
    }

    #[test]
    fn test_composite_boards() {
        let mut a = Institution::new("A", "University");
        a.sustainability = sustainability(0.5, 2045);
        a.research_innovation = research(40, 1.0);
        a.digital_infrastructure = Some(DigitalInfrastructure {
            digital_fabrication_labs: 1,
            vr_ar_facilities: 0,
            tech_equipment_budget_per_student: 100.0,
        });
        let mut b = Institution::new("B", "University");
        b.sustainability = sustainability(0.9, 2030);
        b.research_innovation = research(5, 3.5);
        b.digital_infrastructure = Some(DigitalInfrastructure {
            digital_fabrication_labs: 3,
            vr_ar_facilities: 2,
            tech_equipment_budget_per_student: 900.0,
        });
        let catalog: Catalog = [a, b].into_iter().collect();

        let sustainability = sustainability_leaders(&catalog);
        assert_eq!(sustainability[0].institution, "B");
        assert_eq!(sustainability[0].carbon_neutral_target, 2030);
        // a target past 2040 lowers the score
        assert!(sustainability[1].score < 0.3);

        let research = research_leaders(&catalog);
        assert_eq!(research[0].institution, "A");
        assert_eq!(research[0].active_projects, 40);

        let digital = digital_leaders(&catalog);
        assert_eq!(digital[0].institution, "B");
        assert!((digital[0].score - 49.0).abs() < 1e-12);
    }

    #[test]
    fn test_collaboration_degrees_ignore_strength() {
        let collaborations = vec![
            Collaboration::new("UdK Berlin", "HfK Bremen", 0.9),
            Collaboration::new("UdK Berlin", "HFBK Hamburg", 0.1),
            Collaboration::new("HFBK Hamburg", "HfK Bremen", 0.5),
            Collaboration::new("UdK Berlin", "Weimar", 0.2),
        ];

        let degrees = collaboration_degrees(&collaborations);
        assert_eq!(
            degrees[0],
            CollaborationDegree {
                institution: "UdK Berlin".into(),
                collaborations: 3,
            }
        );
        assert_eq!(
            names(&degrees, |d| &d.institution),
            vec!["UdK Berlin", "HFBK Hamburg", "HfK Bremen", "Weimar"]
        );
    }

    #[test]
    fn test_cluster_table_passthrough() {
        let mut table = BTreeMap::new();
        table.insert(
            "digital_media_focus".to_string(),
            vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
        );
        table.insert("film_focus".to_string(), vec!["E".to_string()]);

        let clusters = cluster_table(&table, 3);
        assert_eq!(clusters[0].name, "digital_media_focus");
        assert_eq!(clusters[0].total, 4);
        assert_eq!(clusters[0].preview, vec!["A", "B", "C"]);
        assert_eq!(clusters[0].remaining, 1);
        assert_eq!(clusters[1].remaining, 0);
    }

    #[test]
    fn test_leaderboards_compute_and_truncate() {
        let mut dataset = Dataset::new(
            [with_employment("A", 0.7), with_employment("B", 0.8), with_employment("C", 0.9)]
                .into_iter()
                .collect(),
        );
        dataset
            .relationships
            .academic_collaborations
            .push(Collaboration::new("A", "B", 1.0));

        let mut boards = Leaderboards::compute(&dataset);
        assert_eq!(boards.employment.len(), 3);
        assert_eq!(boards.partnerships, 1);
        assert!(boards.living_costs.is_empty());

        boards.truncate(2);
        assert_eq!(names(&boards.employment, |s| &s.institution), vec!["C", "B"]);
    }
}
