use std::fmt;

use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Filter inputs: launch site selection and payload range
// ---------------------------------------------------------------------------

pub const ALL_SITES_LABEL: &str = "All Sites";

/// Which launch site the dashboard is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES_LABEL}"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Inclusive payload mass interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    /// Build a range; bounds given in the wrong order are swapped.
    pub fn new(low: f64, high: f64) -> Self {
        if low <= high {
            PayloadRange { low, high }
        } else {
            PayloadRange { low: high, high: low }
        }
    }

    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}

/// Every non-negative payload.
impl Default for PayloadRange {
    fn default() -> Self {
        PayloadRange::new(0.0, f64::INFINITY)
    }
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Indices of launches from the selected site (every row for `All`).
pub fn filter_by_site(dataset: &LaunchDataset, selection: &SiteSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(&rec.launch_site))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of launches from the selected site whose payload lies in `range`.
pub fn filter_records(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    log::debug!("initial rows: {}", dataset.len());

    let by_site = filter_by_site(dataset, selection);
    log::debug!("rows after site filtering ({selection}): {}", by_site.len());

    let in_range: Vec<usize> = by_site
        .into_iter()
        .filter(|&i| range.contains(dataset.records[i].payload_mass_kg))
        .collect();
    log::debug!(
        "rows after payload filtering [{}, {}]: {}",
        range.low,
        range.high,
        in_range.len()
    );

    in_range
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Success / failure tallies over a set of launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeCounts {
    pub success: usize,
    pub failure: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.success + self.failure
    }
}

/// Count outcomes over the given row indices.
pub fn count_outcomes(dataset: &LaunchDataset, indices: &[usize]) -> OutcomeCounts {
    indices
        .iter()
        .fold(OutcomeCounts::default(), |mut counts, &i| {
            if dataset.records[i].outcome.is_success() {
                counts.success += 1;
            } else {
                counts.failure += 1;
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn selection_display() {
        assert_eq!(SiteSelection::All.to_string(), "All Sites");
        assert_eq!(SiteSelection::Site("KSC LC-39A".into()).to_string(), "KSC LC-39A");
        assert!(SiteSelection::All.matches("anything"));
    }

    #[test]
    fn range_swaps_reversed_bounds() {
        let r = PayloadRange::new(5000.0, 1000.0);
        assert_eq!((r.low, r.high), (1000.0, 5000.0));
    }

    #[test]
    fn range_is_inclusive() {
        let r = PayloadRange::new(500.0, 2490.0);
        assert!(r.contains(500.0));
        assert!(r.contains(2490.0));
        assert!(!r.contains(499.9));
        assert!(!r.contains(2490.1));
    }

    #[test]
    fn default_range_admits_any_payload() {
        let r = PayloadRange::default();
        assert!(r.contains(0.0));
        assert!(r.contains(15_600.0));
        assert!(!r.contains(-1.0));
    }

    #[test]
    fn all_sites_keeps_every_row() {
        let ds = sample_dataset();
        assert_eq!(filter_by_site(&ds, &SiteSelection::All).len(), ds.len());
    }

    #[test]
    fn single_site() {
        let ds = sample_dataset();
        let rows = filter_by_site(&ds, &SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(rows, vec![4, 5, 6]);
    }

    #[test]
    fn unknown_site_is_empty() {
        let ds = sample_dataset();
        assert!(filter_by_site(&ds, &SiteSelection::Site("Boca Chica".into())).is_empty());
    }

    #[test]
    fn site_and_payload() {
        let ds = sample_dataset();
        let rows = filter_records(
            &ds,
            &SiteSelection::Site("CCAFS LC-40".into()),
            PayloadRange::new(500.0, 5000.0),
        );
        assert_eq!(rows, vec![1, 3]);

        let rows = filter_records(&ds, &SiteSelection::All, PayloadRange::new(9600.0, 10000.0));
        assert_eq!(rows, vec![7, 8]);
    }

    #[test]
    fn counts() {
        let ds = sample_dataset();
        let all = filter_by_site(&ds, &SiteSelection::All);
        assert_eq!(
            count_outcomes(&ds, &all),
            OutcomeCounts { success: 4, failure: 5 }
        );

        let ksc = filter_by_site(&ds, &SiteSelection::Site("KSC LC-39A".into()));
        let c = count_outcomes(&ds, &ksc);
        assert_eq!((c.success, c.failure, c.total()), (2, 1, 3));

        assert_eq!(count_outcomes(&ds, &[]), OutcomeCounts::default());
    }
}
