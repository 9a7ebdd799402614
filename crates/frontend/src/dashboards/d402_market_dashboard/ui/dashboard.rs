use crate::dashboards::d400_overview::ui::PreviewCards;
use crate::dashboards::d402_market_dashboard::api;
use crate::layout::global_context::use_global_context;
use crate::shared::components::chart::{BarChart, LineChart};
use crate::shared::components::EmptyState;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::dashboards::d402_market_dashboard::dto::{
    category_series, latest_product_prices, latest_volatility, price_index_series, CategoryView,
    DashboardPanel, DashboardPreview, DashboardSummary, MarketDashboard, VolatilityEntry,
    VOLATILITY_TOP_N,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Рыночный дашборд: индексы, категории, ключевые продукты, волатильность
#[component]
pub fn MarketDashboardPage() -> impl IntoView {
    let ctx = use_global_context();
    let notifications = use_notifications();

    let data = RwSignal::new(None::<MarketDashboard>);
    let summary = RwSignal::new(DashboardSummary::default());
    let category_view = RwSignal::new(CategoryView::All.to_string());
    let loading = RwSignal::new(false);

    // Полная загрузка; `announce` показывает уведомление об успехе
    let load_all = move |announce: bool| {
        loading.set(true);
        spawn_local(async move {
            let _loading = ctx.begin_loading();
            match api::fetch_dashboard().await {
                Ok((fresh, fresh_summary)) => {
                    data.set(Some(fresh));
                    summary.set(fresh_summary);
                    if announce {
                        notifications.success("仪表盘数据已刷新");
                    }
                }
                Err(e) => notifications.api_error("加载仪表盘数据失败", &e),
            }
            loading.set(false);
        });
    };

    let refresh_panel = Callback::new(move |panel: DashboardPanel| {
        spawn_local(async move {
            let _loading = ctx.begin_loading();
            match api::fetch_dashboard().await {
                Ok((fresh, _)) => {
                    data.update(|current| match current {
                        Some(existing) => panel.merge_into(existing, fresh),
                        None => *current = Some(fresh),
                    });
                    notifications.success(format!("{}已刷新", panel.label()));
                }
                Err(e) => notifications.api_error(&format!("刷新{}失败", panel.label()), &e),
            }
        });
    });

    Effect::new(move |prev: Option<u64>| {
        let tick = ctx.refresh_tick.get();
        // Header refresh announces itself; the initial load does not
        load_all(prev.is_some());
        tick
    });

    let preview = Signal::derive(move || data.get().map(|d| DashboardPreview::from_dashboard(&d)));
    let index_series = Signal::derive(move || {
        data.get()
            .map(|d| price_index_series(&d.price_index_trend))
            .unwrap_or_default()
    });
    let category_chart = Signal::derive(move || {
        let view = category_view.get().parse::<CategoryView>().unwrap_or_default();
        data.get()
            .map(|d| category_series(&d.category_price_trends, view))
            .unwrap_or_default()
    });
    let product_bars = Signal::derive(move || {
        data.get()
            .map(|d| latest_product_prices(&d.key_products_trends))
            .unwrap_or_default()
    });
    let gainers = Signal::derive(move || {
        data.get()
            .map(|d| latest_volatility(&d.volatility_analysis.top_gainers, VOLATILITY_TOP_N))
            .unwrap_or_default()
    });
    let losers = Signal::derive(move || {
        data.get()
            .map(|d| latest_volatility(&d.volatility_analysis.top_losers, VOLATILITY_TOP_N))
            .unwrap_or_default()
    });

    view! {
        <PageFrame page_id="d402_market_dashboard--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"市场仪表盘"</h1>
                    <span class="page__subtitle">
                        {move || summary.with(|s| format!("{} · 共 {} 份报告", s.date_range.display(), s.total_reports))}
                    </span>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| load_all(true)
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " 刷新全部"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || match preview.get() {
                    Some(p) => view! { <PreviewCards preview=p /> }.into_any(),
                    None => view! { <EmptyState /> }.into_any(),
                }}

                <DashboardPanelFrame title="价格指数走势" panel=DashboardPanel::PriceIndex on_refresh=refresh_panel>
                    <LineChart data=index_series />
                </DashboardPanelFrame>

                <DashboardPanelFrame title="分类价格走势" panel=DashboardPanel::Categories on_refresh=refresh_panel>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <Label>"商品类别"</Label>
                        <Select value=category_view>
                            {CategoryView::options()
                                .into_iter()
                                .map(|(value, label)| view! { <option value={value.to_string()}>{label}</option> })
                                .collect_view()}
                        </Select>
                    </Flex>
                    <LineChart data=category_chart />
                </DashboardPanelFrame>

                <DashboardPanelFrame title="重点产品最新价格" panel=DashboardPanel::Products on_refresh=refresh_panel>
                    <BarChart data=product_bars color="#6f42c1" />
                </DashboardPanelFrame>

                <DashboardPanelFrame title="价格波动 TOP5" panel=DashboardPanel::Volatility on_refresh=refresh_panel>
                    <div class="volatility">
                        <VolatilityList title="涨幅最大" entries=gainers />
                        <VolatilityList title="跌幅最大" entries=losers />
                    </div>
                </DashboardPanelFrame>

                <MarketSummaryPanel data=data />
            </div>
        </PageFrame>
    }
}

#[component]
fn DashboardPanelFrame(
    title: &'static str,
    panel: DashboardPanel,
    on_refresh: Callback<DashboardPanel>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="dashboard-panel">
            <div class="dashboard-panel__header">
                <h3 class="dashboard-panel__title">{title}</h3>
                <button
                    class="top-header__icon-btn"
                    title="刷新"
                    on:click=move |_| on_refresh.run(panel)
                >
                    {icon("refresh")}
                </button>
            </div>
            <div class="dashboard-panel__body">{children()}</div>
        </div>
    }
}

#[component]
fn VolatilityList(title: &'static str, #[prop(into)] entries: Signal<Vec<VolatilityEntry>>) -> impl IntoView {
    view! {
        <div class="volatility__list">
            <h4>{title}</h4>
            {move || {
                let items = entries.get();
                if items.is_empty() {
                    return view! { <EmptyState /> }.into_any();
                }
                view! {
                    <ul>
                        {items
                            .into_iter()
                            .map(|e| {
                                let class = format!(
                                    "volatility__rate {}",
                                    contracts::shared::text::change_class(e.change_rate)
                                );
                                view! {
                                    <li>
                                        <span class="volatility__product">{e.product.clone()}</span>
                                        <span class=class>{e.change_text()}</span>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                .into_any()
            }}
        </div>
    }
}

#[component]
fn MarketSummaryPanel(data: RwSignal<Option<MarketDashboard>>) -> impl IntoView {
    view! {
        <div class="dashboard-panel">
            <div class="dashboard-panel__header">
                <h3 class="dashboard-panel__title">"市场概况"</h3>
            </div>
            <div class="dashboard-panel__body">
                {move || {
                    let Some(d) = data.get() else {
                        return view! { <EmptyState /> }.into_any();
                    };
                    let summary = d.market_summary;
                    let sections = summary
                        .latest_conclusions
                        .sections()
                        .into_iter()
                        .map(|(heading, text)| {
                            view! {
                                <div class="conclusion">
                                    <strong>{heading}</strong>
                                    <p>{text.to_string()}</p>
                                </div>
                            }
                        })
                        .collect_view();
                    view! {
                        <div class="market-summary">
                            <p>"最新日期: " {summary.latest_date.clone()}</p>
                            <p>"报告总数: " {summary.total_reports.to_string()}</p>
                            <p>"数据区间: " {summary.date_range.display()}</p>
                            {sections}
                        </div>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}
