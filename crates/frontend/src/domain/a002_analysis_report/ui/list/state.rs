use contracts::domain::a002_analysis_report::dto::{
    AnalysisReport, ReportPageQuery, ReportStats, ReportType,
};
use contracts::shared::api_response::Page;
use contracts::shared::pagination::{PageCommand, PageCursor};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "a002_analysis_report_list_state_v1";

#[derive(Clone, Debug, PartialEq)]
pub struct ReportListState {
    pub cursor: PageCursor,
    pub report_type: ReportType,
    pub items: Vec<AnalysisReport>,
    pub stats: Option<ReportStats>,
    /// Report shown in the detail modal.
    pub selected: Option<AnalysisReport>,
    pub is_loading: bool,
    pub is_loaded: bool,
}

impl ReportListState {
    pub fn new(page_size: u32, report_type: ReportType) -> Self {
        Self {
            cursor: PageCursor::new(page_size),
            report_type,
            items: Vec::new(),
            stats: None,
            selected: None,
            is_loading: false,
            is_loaded: false,
        }
    }

    pub fn query(&self) -> ReportPageQuery {
        ReportPageQuery {
            limit: self.cursor.page_size(),
            page: self.cursor.current_page(),
            report_type: self.report_type,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReportListAction {
    Mount,
    Refresh,
    SetType(ReportType),
    Navigate(PageCommand),
    /// A page arrived for `query`; only now are its page and type committed.
    Loaded {
        query: ReportPageQuery,
        page: Page<AnalysisReport>,
    },
    Failed,
    StatsLoaded(ReportStats),
    Open(usize),
    CloseDetail,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReportListEffect {
    Fetch(ReportPageQuery),
    /// Page plus the per-type counters.
    FetchWithStats(ReportPageQuery),
}

pub fn reduce(state: &mut ReportListState, action: ReportListAction) -> Option<ReportListEffect> {
    match action {
        ReportListAction::Mount | ReportListAction::Refresh => {
            state.is_loading = true;
            Some(ReportListEffect::FetchWithStats(state.query()))
        }
        ReportListAction::SetType(report_type) => {
            if report_type == state.report_type {
                return None;
            }
            state.is_loading = true;
            Some(ReportListEffect::Fetch(ReportPageQuery {
                page: 1,
                report_type,
                ..state.query()
            }))
        }
        ReportListAction::Navigate(command) => match state.cursor.peek(command) {
            Ok(page) if page == state.cursor.current_page() => None,
            Ok(page) => {
                state.is_loading = true;
                Some(ReportListEffect::Fetch(ReportPageQuery {
                    page,
                    ..state.query()
                }))
            }
            Err(e) => {
                log::warn!("page navigation rejected: {}", e);
                None
            }
        },
        ReportListAction::Loaded { query, page } => {
            if query.report_type != state.report_type {
                state.report_type = query.report_type;
                state.cursor.reset();
            }
            state
                .cursor
                .sync(page.page, page.total, page.total_pages);
            state.items = page.items;
            state.is_loading = false;
            state.is_loaded = true;
            None
        }
        ReportListAction::Failed => {
            state.is_loading = false;
            None
        }
        ReportListAction::StatsLoaded(stats) => {
            state.stats = Some(stats);
            None
        }
        ReportListAction::Open(index) => {
            state.selected = state.items.get(index).cloned();
            None
        }
        ReportListAction::CloseDetail => {
            state.selected = None;
            None
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedListState {
    #[serde(default)]
    report_type: ReportType,
}

/// Report type chosen in a previous session.
pub fn load_report_type() -> ReportType {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten())
        .and_then(|raw| serde_json::from_str::<PersistedListState>(&raw).ok())
        .map(|p| p.report_type)
        .unwrap_or_default()
}

pub fn save_report_type(report_type: ReportType) {
    let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
        return;
    };
    if let Ok(raw) = serde_json::to_string(&PersistedListState { report_type }) {
        let _ = storage.set_item(STORAGE_KEY, &raw);
    }
}

pub fn create_state(page_size: u32) -> RwSignal<ReportListState> {
    RwSignal::new(ReportListState::new(page_size, load_report_type()))
}
