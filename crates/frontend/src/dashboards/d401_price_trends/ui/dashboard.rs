use crate::dashboards::d401_price_trends::api;
use crate::domain::a001_price_record::api as records_api;
use crate::layout::global_context::use_global_context;
use crate::shared::components::chart::{BarChart, LineChart};
use crate::shared::components::StatCard;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d401_price_trends::dto::{
    TrendsData, TrendsQuery, DEFAULT_TREND_DAYS, TREND_RANGE_OPTIONS,
};
use contracts::domain::a001_price_record::dto::{CoverageCounts, LATEST_LIMIT};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Тренды цен и отчётов за выбранный период
#[component]
pub fn PriceTrendsDashboard() -> impl IntoView {
    let ctx = use_global_context();
    let notifications = use_notifications();

    let days = RwSignal::new(DEFAULT_TREND_DAYS.to_string());
    let data = RwSignal::new(None::<TrendsData>);
    let coverage = RwSignal::new(CoverageCounts::default());
    let loading = RwSignal::new(false);

    Effect::new(move |_| {
        ctx.refresh_tick.track();
        let days = days.get().parse::<u32>().unwrap_or(DEFAULT_TREND_DAYS);
        loading.set(true);
        spawn_local(async move {
            let _loading = ctx.begin_loading();
            match api::fetch_trends(TrendsQuery { days }).await {
                Ok(trends) => data.set(Some(trends)),
                Err(e) => notifications.api_error("加载趋势数据失败", &e),
            }
            loading.set(false);
        });
    });

    // Активность рынков по последним записям
    Effect::new(move |_| {
        ctx.refresh_tick.track();
        spawn_local(async move {
            let _loading = ctx.begin_loading();
            match records_api::fetch_latest(LATEST_LIMIT).await {
                Ok((records, _)) => coverage.set(CoverageCounts::from_records(&records)),
                Err(e) => log::warn!("activity data unavailable: {}", e),
            }
        });
    });

    let metrics = Signal::derive(move || data.get().map(|d| d.key_metrics).unwrap_or_default());
    let price_series = Signal::derive(move || data.get().map(|d| d.price_series()).unwrap_or_default());
    let type_bars = Signal::derive(move || {
        data.get()
            .map(|d| d.report_trends.type_bars())
            .unwrap_or_default()
    });
    let daily_bars = Signal::derive(move || {
        data.get()
            .map(|d| d.report_trends.daily_bars())
            .unwrap_or_default()
    });
    let chart_title = Signal::derive(move || {
        data.get()
            .map(|d| d.chart_title())
            .unwrap_or_else(|| "价格趋势".to_string())
    });

    view! {
        <PageFrame page_id="d401_price_trends--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"趋势仪表板"</h1>
                </div>
                <div class="page__header-right">
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <Label>"时间范围"</Label>
                        <Select value=days>
                            {TREND_RANGE_OPTIONS
                                .into_iter()
                                .map(|(value, label)| view! { <option value={value.to_string()}>{label}</option> })
                                .collect_view()}
                        </Select>
                        <Show when=move || loading.get()>
                            <span class="spinner"></span>
                        </Show>
                    </Flex>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard label="平均价格" value=Signal::derive(move || metrics.get().avg_price_text()) />
                    <StatCard label="最高价格" value=Signal::derive(move || metrics.get().max_price_text()) />
                    <StatCard label="最低价格" value=Signal::derive(move || metrics.get().min_price_text()) />
                    <StatCard
                        label="价格变化"
                        value=Signal::derive(move || {
                            if metrics.get().price_change().is_some() { String::new() } else { "-".to_string() }
                        })
                        change=Signal::derive(move || metrics.get().price_change())
                    />
                    <StatCard
                        label="报告数量"
                        value=Signal::derive(move || metrics.get().total_reports_text())
                        subtitle=Signal::derive(move || Some(metrics.get().report_types_text()))
                    />
                </div>

                <LineChart data=price_series title=chart_title />

                <div class="chart-row">
                    <BarChart data=type_bars color="#17a2b8" title="报告类型分布".to_string() />
                    <BarChart data=daily_bars color="#28a745" title="每日报告数量".to_string() />
                </div>

                <h3 class="section-title">"市场活跃度"</h3>
                <div class="stat-grid">
                    <StatCard label="活跃市场" value=Signal::derive(move || coverage.get().markets.to_string()) />
                    <StatCard label="交易品种" value=Signal::derive(move || coverage.get().varieties.to_string()) />
                    <StatCard label="覆盖省份" value=Signal::derive(move || coverage.get().provinces.to_string()) />
                </div>

                <div class="page__meta">
                    "数据更新时间: "
                    {move || data.get().map(|d| d.last_update).unwrap_or_else(|| "-".to_string())}
                </div>
            </div>
        </PageFrame>
    }
}
