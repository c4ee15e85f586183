use std::collections::BTreeMap;

use crate::data::filter::{
    count_outcomes, filter_by_site, filter_records, PayloadRange, SiteSelection,
};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Chart descriptions
//
// Plain data computed whenever an input changes; the UI layer only draws
// these and never touches the dataset directly.
// ---------------------------------------------------------------------------

pub const SCATTER_TITLE: &str = "Payload Mass vs. Launch Success by Booster Version";
pub const NO_DATA_TITLE: &str = "No Data Available";
pub const PAYLOAD_AXIS_LABEL: &str = "Payload Mass (kg)";
pub const OUTCOME_AXIS_LABEL: &str = "Launch Outcome";

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: usize,
    /// Share of the total in `0.0..=1.0`; zero when the total is zero.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieFigure {
    pub title: String,
    /// Always `[Success, Failure]`.
    pub slices: Vec<PieSlice>,
}

impl PieFigure {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// Success vs. failure for the selected site, or for every launch when all
/// sites are selected.
pub fn pie_figure(dataset: &LaunchDataset, selection: &SiteSelection) -> PieFigure {
    let title = match selection {
        SiteSelection::All => "All Launches".to_string(),
        SiteSelection::Site(site) => format!("Successful launches for {site}"),
    };

    let rows = filter_by_site(dataset, selection);
    let counts = count_outcomes(dataset, &rows);
    let total = counts.total();
    let fraction = |v: usize| {
        if total == 0 {
            0.0
        } else {
            v as f64 / total as f64
        }
    };

    PieFigure {
        title,
        slices: vec![
            PieSlice {
                label: "Success",
                value: counts.success,
                fraction: fraction(counts.success),
            },
            PieSlice {
                label: "Failure",
                value: counts.failure,
                fraction: fraction(counts.failure),
            },
        ],
    }
}

/// One marker on the scatter chart, with the details shown on hover.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Row index into the dataset.
    pub row: usize,
    pub payload_mass_kg: f64,
    pub class: u8,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
    pub launch_site: String,
}

/// All points sharing one booster version category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Sorted by category; empty when no launch passed the filters.
    pub series: Vec<ScatterSeries>,
}

impl ScatterFigure {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Row indices of every plotted launch, in dataset order.
    pub fn rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.row))
            .collect();
        rows.sort_unstable();
        rows
    }
}

/// Payload mass against outcome for the selected site and payload range,
/// grouped by booster version category.
pub fn scatter_figure(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> ScatterFigure {
    let rows = filter_records(dataset, selection, range);

    if rows.is_empty() {
        log::debug!("no data to plot");
        return ScatterFigure {
            title: NO_DATA_TITLE,
            x_label: PAYLOAD_AXIS_LABEL,
            y_label: OUTCOME_AXIS_LABEL,
            series: Vec::new(),
        };
    }

    let mut grouped: BTreeMap<&str, Vec<ScatterPoint>> = BTreeMap::new();
    for row in rows {
        let rec = &dataset.records[row];
        grouped
            .entry(rec.booster_version_category.as_str())
            .or_default()
            .push(ScatterPoint {
                row,
                payload_mass_kg: rec.payload_mass_kg,
                class: rec.outcome.class(),
                flight_number: rec.flight_number,
                booster_version: rec.booster_version.clone(),
                launch_site: rec.launch_site.clone(),
            });
    }

    let figure = ScatterFigure {
        title: SCATTER_TITLE,
        x_label: PAYLOAD_AXIS_LABEL,
        y_label: OUTCOME_AXIS_LABEL,
        series: grouped
            .into_iter()
            .map(|(category, points)| ScatterSeries {
                category: category.to_string(),
                points,
            })
            .collect(),
    };
    log::debug!(
        "scatter figure: {} points in {} series",
        figure.point_count(),
        figure.series.len()
    );
    figure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn pie_for_all_sites() {
        let ds = sample_dataset();
        let fig = pie_figure(&ds, &SiteSelection::All);
        assert_eq!(fig.title, "All Launches");
        assert_eq!(fig.slices[0].label, "Success");
        assert_eq!(fig.slices[0].value, 4);
        assert_eq!(fig.slices[1].label, "Failure");
        assert_eq!(fig.slices[1].value, 5);
        assert_eq!(fig.total(), 9);
        let sum: f64 = fig.slices.iter().map(|s| s.fraction).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pie_for_one_site() {
        let ds = sample_dataset();
        let fig = pie_figure(&ds, &SiteSelection::Site("VAFB SLC-4E".into()));
        assert_eq!(fig.title, "Successful launches for VAFB SLC-4E");
        assert_eq!(fig.slices[0].value, 0);
        assert_eq!(fig.slices[1].value, 2);
        assert_eq!(fig.slices[1].fraction, 1.0);
    }

    #[test]
    fn pie_for_unknown_site_has_zero_fractions() {
        let ds = sample_dataset();
        let fig = pie_figure(&ds, &SiteSelection::Site("Boca Chica".into()));
        assert_eq!(fig.total(), 0);
        assert!(fig.slices.iter().all(|s| s.fraction == 0.0));
    }

    #[test]
    fn scatter_groups_by_category() {
        let ds = sample_dataset();
        let fig = scatter_figure(&ds, &SiteSelection::All, PayloadRange::new(0.0, 10000.0));
        assert_eq!(fig.title, SCATTER_TITLE);
        assert_eq!(fig.x_label, "Payload Mass (kg)");
        assert_eq!(fig.y_label, "Launch Outcome");
        let categories: Vec<&str> = fig.series.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["B4", "B5", "FT", "v1.0", "v1.1"]);
        assert_eq!(fig.point_count(), 9);
        assert_eq!(fig.rows(), (0..9).collect::<Vec<_>>());

        let ft = &fig.series[2];
        assert_eq!(
            ft.points.iter().map(|p| (p.payload_mass_kg, p.class)).collect::<Vec<_>>(),
            vec![(2490.0, 1), (5300.0, 1), (6070.0, 0)]
        );
    }

    #[test]
    fn scatter_respects_site_and_range() {
        let ds = sample_dataset();
        let fig = scatter_figure(
            &ds,
            &SiteSelection::Site("KSC LC-39A".into()),
            PayloadRange::new(3000.0, 6000.0),
        );
        assert_eq!(fig.rows(), vec![5]);
        assert_eq!(fig.series[0].points[0].launch_site, "KSC LC-39A");
    }

    #[test]
    fn scatter_without_matches() {
        let ds = sample_dataset();
        let fig = scatter_figure(
            &ds,
            &SiteSelection::Site("VAFB SLC-4E".into()),
            PayloadRange::new(1000.0, 2000.0),
        );
        assert!(fig.is_empty());
        assert_eq!(fig.title, "No Data Available");
        assert_eq!(fig.x_label, PAYLOAD_AXIS_LABEL);
    }
}
