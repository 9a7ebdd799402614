use crate::app_shell::refresh_system_stats;
use crate::dashboards::d400_overview::api;
use crate::dashboards::d402_market_dashboard::api as market_api;
use crate::layout::global_context::use_global_context;
use crate::shared::components::chart::LineChart;
use crate::shared::components::{EmptyState, StatCard};
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d402_market_dashboard::dto::{
    price_index_series, DashboardPreview, Headline, SeriesSet,
};
use contracts::domain::a002_analysis_report::dto::{ReportStats, ReportType};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Обзор: карточки статистики, счётчики отчётов и превью рыночного дашборда
#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let ctx = use_global_context();
    let notifications = use_notifications();

    let report_stats = RwSignal::new(None::<ReportStats>);
    let preview = RwSignal::new(None::<DashboardPreview>);
    let index_series = RwSignal::new(SeriesSet::default());

    Effect::new(move |_| {
        ctx.refresh_tick.track();

        refresh_system_stats(ctx, notifications, true);

        spawn_local(async move {
            let _loading = ctx.begin_loading();
            match api::fetch_report_stats().await {
                Ok(stats) => report_stats.set(Some(stats)),
                Err(e) => notifications.api_error("加载报告统计失败", &e),
            }
        });

        spawn_local(async move {
            let _loading = ctx.begin_loading();
            match market_api::fetch_dashboard().await {
                Ok((data, _summary)) => {
                    preview.set(Some(DashboardPreview::from_dashboard(&data)));
                    index_series.set(price_index_series(&data.price_index_trend));
                }
                Err(e) => notifications.api_error("加载仪表盘预览失败", &e),
            }
        });
    });

    let stat_cards = move || {
        ctx.stats.get().map(|stats| {
            stats
                .cards()
                .into_iter()
                .map(|card| view! { <StatCard label=card.title value=card.value /> })
                .collect_view()
        })
    };

    let last_update = move || {
        ctx.stats
            .get()
            .map(|s| s.data_stats.last_update_text().to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let report_counts = move || {
        let stats = report_stats.get().unwrap_or_default();
        ReportType::ALL
            .into_iter()
            .map(|t| {
                let label = if t == ReportType::All { "报告总数" } else { t.label() };
                view! { <StatCard label=label value=stats.count_for(t).to_string() /> }
            })
            .collect_view()
    };

    view! {
        <PageFrame page_id="d400_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"数据概览"</h1>
                </div>
                <div class="page__header-right">
                    <span class="page__meta">"最后更新: " {last_update}</span>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-grid">{stat_cards}</div>

                <h3 class="section-title">"分析报告"</h3>
                <div class="stat-grid">{report_counts}</div>

                <h3 class="section-title">"市场动态"</h3>
                {move || match preview.get() {
                    Some(p) => view! { <PreviewCards preview=p /> }.into_any(),
                    None => view! { <EmptyState /> }.into_any(),
                }}

                <LineChart data=index_series title="农产品批发价格指数".to_string() />
            </div>
        </PageFrame>
    }
}

/// Headline cards of the market dashboard, shared with the market page.
#[component]
pub fn PreviewCards(preview: DashboardPreview) -> impl IntoView {
    let headline = |label: &'static str, h: Option<Headline>| {
        let (value, change) = match h {
            Some(h) => (h.value, h.change),
            None => ("-".to_string(), None),
        };
        view! { <StatCard label=label value=value change=change /> }
    };

    view! {
        <div class="stat-grid">
            {headline("200指数", preview.price_index)}
            {headline("蔬菜均价", preview.vegetables)}
            {headline("水果均价", preview.fruits)}
            {headline("肉类均价", preview.meat)}
            <StatCard label="数据区间" value=preview.date_range />
            <StatCard label="日报数量" value=preview.total_reports />
        </div>
    }
}
