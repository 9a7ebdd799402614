pub mod state;

use self::state::{
    create_state, reduce, save_report_type, ReportListAction, ReportListEffect, ReportListState,
};
use super::details::ReportDetailModal;
use crate::domain::a002_analysis_report::api;
use crate::layout::global_context::{use_global_context, AppGlobalContext};
use crate::shared::components::{EmptyState, LoadingState, PaginationControls};
use crate::shared::config::use_config;
use crate::shared::icons::icon;
use crate::shared::notifications::{use_notifications, NotificationService};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a002_analysis_report::dto::{AnalysisReport, ReportType};
use contracts::shared::pagination::PageCommand;
use contracts::shared::text::or_dash;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn apply(state: RwSignal<ReportListState>, action: ReportListAction) {
    state.update(|s| {
        reduce(s, action);
    });
}

fn run_effect(
    state: RwSignal<ReportListState>,
    effect: ReportListEffect,
    ctx: AppGlobalContext,
    notifications: NotificationService,
) {
    let (query, with_stats) = match effect {
        ReportListEffect::Fetch(q) => (q, false),
        ReportListEffect::FetchWithStats(q) => (q, true),
    };
    spawn_local(async move {
        let _loading = ctx.begin_loading();
        match api::fetch_page(&query).await {
            Ok(page) => {
                log::info!(
                    "reports loaded: type={} page={} rows={} total={}",
                    query.report_type,
                    page.page,
                    page.items.len(),
                    page.total
                );
                save_report_type(query.report_type);
                apply(state, ReportListAction::Loaded { query, page });
            }
            Err(e) => {
                notifications.api_error("加载报告失败", &e);
                apply(state, ReportListAction::Failed);
            }
        }
        if with_stats {
            match api::fetch_report_stats().await {
                Ok(stats) => apply(state, ReportListAction::StatsLoaded(stats)),
                Err(e) => log::error!("report stats failed: {}", e),
            }
        }
    });
}

/// Аналитические отчёты: фильтр по типу, постраничный список, карточка отчёта
#[component]
pub fn AnalysisReportList() -> impl IntoView {
    let ctx = use_global_context();
    let notifications = use_notifications();
    let config = use_config();
    let state = create_state(config.config.get_untracked().report_page_size);

    let dispatch = move |action: ReportListAction| {
        let effect = state.try_update(|s| reduce(s, action)).flatten();
        if let Some(effect) = effect {
            run_effect(state, effect, ctx, notifications);
        }
    };

    Effect::new(move |prev: Option<u64>| {
        let tick = ctx.refresh_tick.get();
        untrack(|| {
            dispatch(if prev.is_none() {
                ReportListAction::Mount
            } else {
                ReportListAction::Refresh
            })
        });
        tick
    });

    let report_type = RwSignal::new(state.with_untracked(|s| s.report_type.to_string()));
    Effect::new(move |_| {
        let Ok(selected) = report_type.get().parse::<ReportType>() else {
            return;
        };
        untrack(|| dispatch(ReportListAction::SetType(selected)));
    });
    // A failed switch leaves the committed type; put the selector back on it
    Effect::new(move |_| {
        let (committed, loading) = state.with(|s| (s.report_type, s.is_loading));
        if loading {
            return;
        }
        let committed = committed.to_string();
        if report_type.get_untracked() != committed {
            report_type.set(committed);
        }
    });

    let on_command = Callback::new(move |cmd: PageCommand| dispatch(ReportListAction::Navigate(cmd)));
    let on_open = Callback::new(move |index: usize| dispatch(ReportListAction::Open(index)));
    let on_close = Callback::new(move |_: ()| dispatch(ReportListAction::CloseDetail));

    let on_export_all = move |_| match api::export_all() {
        Ok(()) => notifications.success("导出已开始"),
        Err(e) => {
            log::error!("reports export failed: {}", e);
            notifications.error(format!("导出失败: {}", e));
        }
    };

    let cursor = Signal::derive(move || state.with(|s| s.cursor));
    let selected = Signal::derive(move || state.with(|s| s.selected.clone()));

    let type_label = move |t: ReportType| match state.with(|s| s.stats.as_ref().map(|st| st.count_for(t))) {
        Some(n) => format!("{} ({})", t.label(), n),
        None => t.label().to_string(),
    };

    view! {
        <PageFrame page_id="a002_analysis_report--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"分析报告"</h1>
                    <span class="page__subtitle">
                        {move || format!("共 {} 篇", state.with(|s| s.cursor.total_items()))}
                    </span>
                </div>
                <div class="page__header-right">
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <Label>"报告类型"</Label>
                        <Select value=report_type>
                            {move || {
                                ReportType::ALL
                                    .into_iter()
                                    .map(|t| view! { <option value={t.to_string()}>{type_label(t)}</option> })
                                    .collect_view()
                            }}
                        </Select>
                        <Button appearance=ButtonAppearance::Secondary on_click=on_export_all>
                            {icon("download")}
                            " 导出全部"
                        </Button>
                    </Flex>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    let (items, loading, loaded) =
                        state.with(|s| (s.items.clone(), s.is_loading, s.is_loaded));
                    if items.is_empty() {
                        if loading || !loaded {
                            return view! { <LoadingState /> }.into_any();
                        }
                        return view! { <EmptyState text="暂无报告" /> }.into_any();
                    }
                    view! { <ReportTable items=items on_open=on_open /> }.into_any()
                }}

                <PaginationControls cursor=cursor on_command=on_command />
            </div>

            <ReportDetailModal report=selected on_close=on_close />
        </PageFrame>
    }
}

#[component]
fn ReportTable(items: Vec<AnalysisReport>, on_open: Callback<usize>) -> impl IntoView {
    view! {
        <div class="table-wrapper">
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=300.0>"标题"</TableHeaderCell>
                        <TableHeaderCell>"类型"</TableHeaderCell>
                        <TableHeaderCell>"日期"</TableHeaderCell>
                        <TableHeaderCell>"来源"</TableHeaderCell>
                        <TableHeaderCell>"爬取时间"</TableHeaderCell>
                        <TableHeaderCell>"操作"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {items
                        .into_iter()
                        .enumerate()
                        .map(|(index, r)| {
                            let title = r.title.clone();
                            let display_title = r.display_title();
                            let type_name = or_dash(&[r.type_name.as_str()]).to_string();
                            let date = r.display_date().to_string();
                            let source = or_dash(&[r.source.as_str()]).to_string();
                            let crawl_time = or_dash(&[r.crawl_time.as_str()]).to_string();
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <span title=title>{display_title}</span>
                                    </TableCell>
                                    <TableCell>{type_name}</TableCell>
                                    <TableCell>{date}</TableCell>
                                    <TableCell>{source}</TableCell>
                                    <TableCell>{crawl_time}</TableCell>
                                    <TableCell>
                                        <Button
                                            size=ButtonSize::Small
                                            on_click=move |_| on_open.run(index)
                                        >
                                            "查看"
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        })
                        .collect_view()}
                </TableBody>
            </Table>
        </div>
    }
}
