use contracts::dashboards::d400_overview::dto::SystemStats;
use contracts::domain::a001_price_record::dto::ExportFilter;
use leptos::prelude::Effect;
use leptos::prelude::*;
use std::fmt;
use std::str::FromStr;
use web_sys::window;

/// Разделы приложения (пункты боковой навигации).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Overview,
    Trends,
    MarketDashboard,
    PriceData,
    Reports,
    CrawlerControl,
    Settings,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Overview,
        Section::Trends,
        Section::MarketDashboard,
        Section::PriceData,
        Section::Reports,
        Section::CrawlerControl,
        Section::Settings,
    ];

    /// Value of the `?active=` query parameter.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Overview => "dashboard",
            Section::Trends => "trends",
            Section::MarketDashboard => "market-dashboard",
            Section::PriceData => "price-data",
            Section::Reports => "reports",
            Section::CrawlerControl => "crawler-control",
            Section::Settings => "settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Overview => "数据概览",
            Section::Trends => "趋势仪表板",
            Section::MarketDashboard => "市场仪表盘",
            Section::PriceData => "价格数据",
            Section::Reports => "分析报告",
            Section::CrawlerControl => "爬虫控制",
            Section::Settings => "系统设置",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Overview => "dashboard",
            Section::Trends => "trending-up",
            Section::MarketDashboard => "bar-chart",
            Section::PriceData => "table",
            Section::Reports => "file-text",
            Section::CrawlerControl => "spider",
            Section::Settings => "settings",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or_else(|| format!("unknown section: {}", s))
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Section>,
    pub left_open: RwSignal<bool>,
    /// Последний ответ `/api/stats`.
    pub stats: RwSignal<Option<SystemStats>>,
    /// Requests in flight, drives the loading indicator.
    pub in_flight: RwSignal<u32>,
    /// Bumped by "refresh current section"; views reload when it changes.
    pub refresh_tick: RwSignal<u64>,
    /// Filters of the last price search, reused by the header export.
    pub export_filter: RwSignal<ExportFilter>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Section::default()),
            left_open: RwSignal::new(true),
            stats: RwSignal::new(None),
            in_flight: RwSignal::new(0),
            refresh_tick: RwSignal::new(0),
            export_filter: RwSignal::new(ExportFilter::default()),
        }
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: std::collections::HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active") {
            match active_key.parse::<Section>() {
                Ok(section) => self.active.set(section),
                Err(e) => log::warn!("{}", e),
            }
        }

        let this = *self;
        Effect::new(move |_| {
            let active_key = this.active.get().key();
            let query_string = serde_qs::to_string(&std::collections::HashMap::from([(
                "active", active_key,
            )]))
            .unwrap_or_default();

            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn navigate(&self, section: Section) {
        log::debug!("navigate: {}", section);
        self.active.set(section);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }

    pub fn request_refresh(&self) {
        self.refresh_tick.update(|t| *t = t.wrapping_add(1));
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.get() > 0
    }

    /// Marks a request as started until the guard is dropped.
    pub fn begin_loading(&self) -> LoadingGuard {
        self.in_flight.update(|n| *n += 1);
        LoadingGuard {
            in_flight: self.in_flight,
        }
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LoadingGuard {
    in_flight: RwSignal<u32>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let _ = self.in_flight.try_update(|n| *n = n.saturating_sub(1));
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext context not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_keys_round_trip() {
        for section in Section::ALL {
            assert_eq!(section.key().parse::<Section>(), Ok(section));
        }
        assert_eq!("market-dashboard".parse(), Ok(Section::MarketDashboard));
        assert!("unknown".parse::<Section>().is_err());
        assert_eq!(Section::default(), Section::Overview);
        assert_eq!(Section::Reports.title(), "分析报告");
    }
}
