use crate::color::ColorMap;
use crate::data::filter::{PayloadRange, SiteSelection, ALL_SITES_LABEL};
use crate::data::model::LaunchDataset;
use crate::figure::{pie_figure, scatter_figure, PieFigure, ScatterFigure};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Bounds and granularity of the payload range slider (kg).
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 10_000.0;
pub const SLIDER_STEP: f64 = 1_000.0;

/// The full UI state, independent of rendering.
///
/// Inputs are only changed through the setters below, which recompute the
/// figures that depend on them.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    dataset: Option<LaunchDataset>,

    site: SiteSelection,
    payload_range: PayloadRange,

    /// Text typed into the site dropdown's search box.
    pub site_search: String,

    pie: Option<PieFigure>,
    scatter: Option<ScatterFigure>,

    /// Colours for booster version categories.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset, reset the inputs and recompute both charts.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.site = SiteSelection::All;
        self.payload_range = PayloadRange::new(dataset.min_payload, dataset.max_payload);
        self.site_search.clear();
        self.color_map = ColorMap::new(&dataset.booster_categories);
        self.dataset = Some(dataset);
        self.status_message = None;

        self.update_pie();
        self.update_scatter();
    }

    pub fn dataset(&self) -> Option<&LaunchDataset> {
        self.dataset.as_ref()
    }

    pub fn site(&self) -> &SiteSelection {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn pie(&self) -> Option<&PieFigure> {
        self.pie.as_ref()
    }

    pub fn scatter(&self) -> Option<&ScatterFigure> {
        self.scatter.as_ref()
    }

    /// Change the launch site; both charts depend on it.
    pub fn select_site(&mut self, site: SiteSelection) {
        if self.site == site {
            return;
        }
        log::debug!("site selected: {site}");
        self.site = site;
        self.update_pie();
        self.update_scatter();
    }

    /// Change the payload range; only the scatter chart depends on it.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.payload_range == range {
            return;
        }
        self.payload_range = range;
        self.update_scatter();
    }

    /// Dropdown entries: "All Sites" first, then every site in the order it
    /// first appears in the data, narrowed by the search text.
    pub fn site_options(&self) -> Vec<(String, SiteSelection)> {
        let needle = self.site_search.trim().to_lowercase();
        let sites = self
            .dataset
            .iter()
            .flat_map(|ds| ds.launch_sites.iter())
            .map(|s| (s.clone(), SiteSelection::Site(s.clone())));

        std::iter::once((ALL_SITES_LABEL.to_string(), SiteSelection::All))
            .chain(sites)
            .filter(|(label, _)| needle.is_empty() || label.to_lowercase().contains(&needle))
            .collect()
    }

    fn update_pie(&mut self) {
        self.pie = self
            .dataset
            .as_ref()
            .map(|ds| pie_figure(ds, &self.site));
    }

    fn update_scatter(&mut self) {
        self.scatter = self
            .dataset
            .as_ref()
            .map(|ds| scatter_figure(ds, &self.site, self.payload_range));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        state
    }

    #[test]
    fn empty_state_has_no_figures() {
        let state = AppState::default();
        assert!(state.dataset().is_none());
        assert!(state.pie().is_none());
        assert!(state.scatter().is_none());
        assert_eq!(state.site_options().len(), 1);
    }

    #[test]
    fn loading_resets_inputs_to_data_bounds() {
        let mut state = loaded();
        assert_eq!(state.dataset().map(|ds| ds.len()), Some(9));
        assert_eq!(state.site(), &SiteSelection::All);
        assert_eq!(state.payload_range(), PayloadRange::new(0.0, 9600.0));
        assert_eq!(state.pie().unwrap().title, "All Launches");
        assert_eq!(state.scatter().unwrap().point_count(), 9);

        state.select_site(SiteSelection::Site("KSC LC-39A".into()));
        state.set_dataset(sample_dataset());
        assert_eq!(state.site(), &SiteSelection::All);
    }

    #[test]
    fn site_change_updates_both_figures() {
        let mut state = loaded();
        state.select_site(SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(state.pie().unwrap().title, "Successful launches for KSC LC-39A");
        assert_eq!(state.scatter().unwrap().rows(), vec![4, 5, 6]);
    }

    #[test]
    fn range_change_updates_scatter_only() {
        let mut state = loaded();
        let pie_before = state.pie().cloned();
        state.set_payload_range(PayloadRange::new(5000.0, 7000.0));
        assert_eq!(state.pie().cloned(), pie_before);
        assert_eq!(state.scatter().unwrap().rows(), vec![5, 6]);

        state.set_payload_range(PayloadRange::new(7000.0, 8000.0));
        assert!(state.scatter().unwrap().is_empty());
    }

    #[test]
    fn options_start_with_all_sites() {
        let state = loaded();
        let labels: Vec<String> = state.site_options().into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            labels,
            vec!["All Sites", "CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
    }

    #[test]
    fn options_filtered_by_search() {
        let mut state = loaded();
        state.site_search = "ccafs".into();
        let options = state.site_options();
        assert_eq!(options.len(), 2);
        assert!(options
            .iter()
            .all(|(_, sel)| matches!(sel, SiteSelection::Site(s) if s.starts_with("CCAFS"))));
    }
}
