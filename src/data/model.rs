use std::collections::BTreeSet;
use std::fmt;

use super::DatasetError;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value, used as the y coordinate of the scatter chart.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl TryFrom<i64> for Outcome {
    type Error = DatasetError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(DatasetError::InvalidClass(other.to_string())),
        }
    }
}

impl TryFrom<f64> for Outcome {
    type Error = DatasetError;

    /// Pandas happily writes `class` as a float column (`1.0`).
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Outcome::Failure)
        } else if value == 1.0 {
            Ok(Outcome::Success)
        } else {
            Err(DatasetError::InvalidClass(value.to_string()))
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub flight_number: Option<u32>,
    pub launch_site: String,
    pub outcome: Outcome,
    pub payload_mass_kg: f64,
    pub booster_version: Option<String>,
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed column indices.
///
/// Built once and never mutated afterwards; loading another file replaces
/// the whole dataset.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches, in file order.
    pub records: Vec<LaunchRecord>,
    /// Unique launch sites in order of first appearance.
    pub launch_sites: Vec<String>,
    /// Sorted unique booster version categories.
    pub booster_categories: Vec<String>,
    pub min_payload: f64,
    pub max_payload: f64,
}

impl LaunchDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut launch_sites: Vec<String> = Vec::new();
        let mut categories: BTreeSet<String> = BTreeSet::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for rec in &records {
            if !launch_sites.contains(&rec.launch_site) {
                launch_sites.push(rec.launch_site.clone());
            }
            categories.insert(rec.booster_version_category.clone());
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
        }

        if records.is_empty() {
            min_payload = 0.0;
            max_payload = 0.0;
        }

        LaunchDataset {
            records,
            launch_sites,
            booster_categories: categories.into_iter().collect(),
            min_payload,
            max_payload,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(site: &str, payload: f64, category: &str, outcome: Outcome) -> LaunchRecord {
        LaunchRecord {
            flight_number: None,
            launch_site: site.to_string(),
            outcome,
            payload_mass_kg: payload,
            booster_version: None,
            booster_version_category: category.to_string(),
        }
    }

    /// A small table shaped like the real launch data.
    pub(crate) fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("CCAFS LC-40", 0.0, "v1.0", Outcome::Failure),
            record("CCAFS LC-40", 525.0, "v1.0", Outcome::Failure),
            record("VAFB SLC-4E", 500.0, "v1.1", Outcome::Failure),
            record("CCAFS LC-40", 3170.0, "v1.1", Outcome::Success),
            record("KSC LC-39A", 2490.0, "FT", Outcome::Success),
            record("KSC LC-39A", 5300.0, "FT", Outcome::Success),
            record("KSC LC-39A", 6070.0, "FT", Outcome::Failure),
            record("CCAFS SLC-40", 9600.0, "B5", Outcome::Success),
            record("VAFB SLC-4E", 9600.0, "B4", Outcome::Failure),
        ])
    }

    #[test]
    fn sites_keep_first_appearance_order() {
        let ds = sample_dataset();
        assert_eq!(
            ds.launch_sites,
            vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        let ds = sample_dataset();
        assert_eq!(ds.booster_categories, vec!["B4", "B5", "FT", "v1.0", "v1.1"]);
    }

    #[test]
    fn payload_bounds() {
        let ds = sample_dataset();
        assert_eq!(ds.min_payload, 0.0);
        assert_eq!(ds.max_payload, 9600.0);
        assert_eq!(ds.len(), 9);
    }

    #[test]
    fn empty_dataset_has_zero_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!((ds.min_payload, ds.max_payload), (0.0, 0.0));
        assert!(ds.launch_sites.is_empty());
    }

    #[test]
    fn outcome_from_class_values() {
        assert_eq!(Outcome::try_from(1_i64).unwrap(), Outcome::Success);
        assert_eq!(Outcome::try_from(0.0_f64).unwrap(), Outcome::Failure);
        assert!(matches!(
            Outcome::try_from(2_i64),
            Err(DatasetError::InvalidClass(v)) if v == "2"
        ));
        assert!(Outcome::try_from(0.5_f64).is_err());
        assert_eq!(Outcome::Success.class(), 1);
    }
}
