//! Section registry: единственное место маппинга Section → View

use crate::dashboards::d400_overview::ui::OverviewDashboard;
use crate::dashboards::d401_price_trends::ui::PriceTrendsDashboard;
use crate::dashboards::d402_market_dashboard::ui::MarketDashboardPage;
use crate::domain::a001_price_record::ui::list::PriceRecordList;
use crate::domain::a002_analysis_report::ui::list::AnalysisReportList;
use crate::layout::global_context::Section;
use crate::system::crawler_control::ui::CrawlerControlPage;
use crate::system::settings::ui::SettingsPage;
use leptos::prelude::*;

/// Рендерит содержимое раздела.
///
/// Each call builds a fresh view, so per-view state (list cursors, chart
/// selections) starts over when the user switches sections.
pub fn render_section(section: Section) -> AnyView {
    match section {
        Section::Overview => view! { <OverviewDashboard /> }.into_any(),
        Section::Trends => view! { <PriceTrendsDashboard /> }.into_any(),
        Section::MarketDashboard => view! { <MarketDashboardPage /> }.into_any(),
        Section::PriceData => view! { <PriceRecordList /> }.into_any(),
        Section::Reports => view! { <AnalysisReportList /> }.into_any(),
        Section::CrawlerControl => view! { <CrawlerControlPage /> }.into_any(),
        Section::Settings => view! { <SettingsPage /> }.into_any(),
    }
}
