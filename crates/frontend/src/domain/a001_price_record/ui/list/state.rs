use contracts::domain::a001_price_record::dto::{
    ExportFilter, FilterOptions, PriceRecord, SearchForm, SearchQuery, LATEST_LIMIT,
};
use leptos::prelude::*;

/// Row limits offered by the search form.
pub const LIMIT_CHOICES: [u32; 3] = [100, 500, 1000];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriceListState {
    pub records: Vec<PriceRecord>,
    /// Count reported by the backend, may exceed `records.len()`.
    pub count: u64,
    pub options: FilterOptions,
    pub form: SearchForm,
    /// Query behind the rows on screen; `None` for the latest-records listing.
    pub applied: Option<SearchQuery>,
    pub is_loading: bool,
    pub is_loaded: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Province,
    Variety,
    Market,
    DateFrom,
    DateTo,
    Limit,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PriceListAction {
    Mount,
    Refresh,
    Edit(FormField, String),
    Search,
    Reset,
    OptionsLoaded(FilterOptions),
    Loaded { records: Vec<PriceRecord>, count: u64 },
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PriceListEffect {
    /// Dropdown options plus the latest records.
    Bootstrap,
    FetchLatest(u32),
    Search(SearchQuery),
}

impl PriceListState {
    /// Filter the CSV export should use for the rows on screen.
    pub fn export_filter(&self) -> ExportFilter {
        self.applied
            .as_ref()
            .map(SearchQuery::export_filter)
            .unwrap_or_default()
    }

    /// Dropdown values of a select field; empty for free-text fields.
    pub fn options_for(&self, field: FormField) -> &[String] {
        match field {
            FormField::Province => &self.options.provinces,
            FormField::Variety => &self.options.varieties,
            FormField::Market => &self.options.markets,
            _ => &[],
        }
    }

    fn reload(&self) -> PriceListEffect {
        match &self.applied {
            Some(query) => PriceListEffect::Search(query.clone()),
            None => PriceListEffect::FetchLatest(LATEST_LIMIT),
        }
    }
}

pub fn reduce(state: &mut PriceListState, action: PriceListAction) -> Option<PriceListEffect> {
    match action {
        PriceListAction::Mount => {
            state.is_loading = true;
            Some(PriceListEffect::Bootstrap)
        }
        PriceListAction::Refresh => {
            state.is_loading = true;
            Some(state.reload())
        }
        PriceListAction::Edit(field, value) => {
            let form = &mut state.form;
            match field {
                FormField::Province => form.province = value,
                FormField::Variety => form.variety = value,
                FormField::Market => form.market = value,
                FormField::DateFrom => form.date_from = value,
                FormField::DateTo => form.date_to = value,
                FormField::Limit => form.limit = value.trim().parse().ok(),
            }
            None
        }
        PriceListAction::Search => {
            let query = SearchQuery::from_form(&state.form);
            state.applied = Some(query.clone());
            state.is_loading = true;
            Some(PriceListEffect::Search(query))
        }
        PriceListAction::Reset => {
            state.form = SearchForm::default();
            state.applied = None;
            state.is_loading = true;
            Some(PriceListEffect::FetchLatest(LATEST_LIMIT))
        }
        PriceListAction::OptionsLoaded(options) => {
            state.options = options;
            None
        }
        PriceListAction::Loaded { records, count } => {
            state.records = records;
            state.count = count;
            state.is_loading = false;
            state.is_loaded = true;
            None
        }
        PriceListAction::Failed => {
            // Rows on screen stay as they were
            state.is_loading = false;
            None
        }
    }
}

pub fn create_state() -> RwSignal<PriceListState> {
    RwSignal::new(PriceListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(variety: &str) -> PriceRecord {
        PriceRecord {
            variety_name: variety.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mount_bootstraps() {
        let mut state = PriceListState::default();
        assert_eq!(
            reduce(&mut state, PriceListAction::Mount),
            Some(PriceListEffect::Bootstrap)
        );
        assert!(state.is_loading);
    }

    #[test]
    fn test_search_uses_form_and_is_remembered() {
        let mut state = PriceListState::default();
        reduce(
            &mut state,
            PriceListAction::Edit(FormField::Province, "山东".to_string()),
        );
        reduce(&mut state, PriceListAction::Edit(FormField::Market, " ".to_string()));
        reduce(&mut state, PriceListAction::Edit(FormField::Limit, "500".to_string()));

        let effect = reduce(&mut state, PriceListAction::Search);
        let expected = SearchQuery {
            province: Some("山东".to_string()),
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(effect, Some(PriceListEffect::Search(expected.clone())));
        assert_eq!(state.export_filter().province.as_deref(), Some("山东"));
        assert_eq!(state.export_filter().market, None);

        // Refresh repeats the applied search
        assert_eq!(
            reduce(&mut state, PriceListAction::Refresh),
            Some(PriceListEffect::Search(expected))
        );
    }

    #[test]
    fn test_reset_returns_to_latest() {
        let mut state = PriceListState::default();
        reduce(
            &mut state,
            PriceListAction::Edit(FormField::Variety, "白菜".to_string()),
        );
        reduce(&mut state, PriceListAction::Search);
        let effect = reduce(&mut state, PriceListAction::Reset);
        assert_eq!(effect, Some(PriceListEffect::FetchLatest(LATEST_LIMIT)));
        assert_eq!(state.form, SearchForm::default());
        assert_eq!(state.export_filter(), ExportFilter::default());
    }

    #[test]
    fn test_failure_keeps_previous_rows() {
        let mut state = PriceListState::default();
        reduce(
            &mut state,
            PriceListAction::Loaded {
                records: vec![record("黄瓜"), record("西红柿")],
                count: 2,
            },
        );
        reduce(&mut state, PriceListAction::Refresh);
        assert!(state.is_loading);
        reduce(&mut state, PriceListAction::Failed);
        assert!(!state.is_loading);
        assert_eq!(state.records.len(), 2);
        assert_eq!(state.count, 2);
    }

    #[test]
    fn test_empty_result_is_loaded() {
        let mut state = PriceListState::default();
        reduce(
            &mut state,
            PriceListAction::Loaded {
                records: Vec::new(),
                count: 0,
            },
        );
        assert!(state.is_loaded);
        assert!(state.records.is_empty());
    }

    #[test]
    fn test_options_for_fields() {
        let mut state = PriceListState::default();
        reduce(
            &mut state,
            PriceListAction::OptionsLoaded(FilterOptions {
                provinces: vec!["山东".to_string()],
                varieties: vec!["白菜".to_string(), "黄瓜".to_string()],
                markets: Vec::new(),
            }),
        );
        assert_eq!(state.options_for(FormField::Province), ["山东".to_string()]);
        assert_eq!(state.options_for(FormField::Variety).len(), 2);
        assert!(state.options_for(FormField::Market).is_empty());
        assert!(state.options_for(FormField::DateFrom).is_empty());
    }

    #[test]
    fn test_invalid_limit_is_dropped() {
        let mut state = PriceListState::default();
        reduce(&mut state, PriceListAction::Edit(FormField::Limit, "abc".to_string()));
        assert_eq!(state.form.limit, None);
    }
}
