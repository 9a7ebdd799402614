pub mod state;

use self::state::{
    create_state, reduce, FormField, PriceListAction, PriceListEffect, PriceListState,
    LIMIT_CHOICES,
};
use crate::domain::a001_price_record::api;
use crate::layout::global_context::{use_global_context, AppGlobalContext};
use crate::shared::components::{EmptyState, LoadingState};
use crate::shared::icons::icon;
use crate::shared::notifications::{use_notifications, NotificationService};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a001_price_record::dto::{ExportFilter, PriceRecord, LATEST_LIMIT};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn apply(state: RwSignal<PriceListState>, action: PriceListAction) {
    state.update(|s| {
        reduce(s, action);
    });
}

fn run_effect(
    state: RwSignal<PriceListState>,
    effect: PriceListEffect,
    ctx: AppGlobalContext,
    notifications: NotificationService,
) {
    spawn_local(async move {
        let _loading = ctx.begin_loading();
        let result = match effect {
            PriceListEffect::Bootstrap => {
                match api::fetch_filter_options().await {
                    Ok(options) => apply(state, PriceListAction::OptionsLoaded(options)),
                    Err(e) => notifications.api_error("加载筛选选项失败", &e),
                }
                api::fetch_latest(LATEST_LIMIT).await
            }
            PriceListEffect::FetchLatest(limit) => api::fetch_latest(limit).await,
            PriceListEffect::Search(query) => api::search(&query).await,
        };
        match result {
            Ok((records, count)) => {
                log::info!("price records loaded: {} rows, count {}", records.len(), count);
                apply(state, PriceListAction::Loaded { records, count });
            }
            Err(e) => {
                notifications.api_error("加载价格数据失败", &e);
                apply(state, PriceListAction::Failed);
            }
        }
    });
}

/// Ценовые записи: фильтры, таблица, выгрузка CSV
#[component]
pub fn PriceRecordList() -> impl IntoView {
    let ctx = use_global_context();
    let notifications = use_notifications();
    let state = create_state();

    let dispatch = move |action: PriceListAction| {
        let effect = state.try_update(|s| reduce(s, action)).flatten();
        if let Some(effect) = effect {
            run_effect(state, effect, ctx, notifications);
        }
    };

    // Поля формы
    let province = RwSignal::new(String::new());
    let variety = RwSignal::new(String::new());
    let market = RwSignal::new(String::new());
    let date_from = RwSignal::new(String::new());
    let date_to = RwSignal::new(String::new());
    let limit = RwSignal::new(String::new());

    for (field, signal) in [
        (FormField::Province, province),
        (FormField::Variety, variety),
        (FormField::Market, market),
        (FormField::DateFrom, date_from),
        (FormField::DateTo, date_to),
        (FormField::Limit, limit),
    ] {
        Effect::new(move |_| {
            let value = signal.get();
            apply(state, PriceListAction::Edit(field, value));
        });
    }

    Effect::new(move |prev: Option<u64>| {
        let tick = ctx.refresh_tick.get();
        untrack(|| {
            if prev.is_none() {
                dispatch(PriceListAction::Mount);
            } else {
                dispatch(PriceListAction::Refresh);
            }
        });
        tick
    });

    // The header export follows the rows on screen
    Effect::new(move |_| {
        let filter = state.with(|s| s.export_filter());
        ctx.export_filter.set(filter);
    });
    on_cleanup(move || ctx.export_filter.set(ExportFilter::default()));

    let on_search = move |_| dispatch(PriceListAction::Search);

    let on_reset = move |_| {
        for signal in [province, variety, market, date_from, date_to, limit] {
            signal.set(String::new());
        }
        dispatch(PriceListAction::Reset);
    };

    let on_export = move |_| {
        let filter = state.with_untracked(|s| s.export_filter());
        match api::export_csv(&filter) {
            Ok(()) => notifications.success("导出已开始"),
            Err(e) => {
                log::error!("price export failed: {}", e);
                notifications.error(format!("导出失败: {}", e));
            }
        }
    };

    let options_of = move |field: FormField| {
        move || {
            state
                .with(|s| s.options_for(field).to_vec())
                .into_iter()
                .map(|v| {
                    let value = v.clone();
                    view! { <option value=value>{v}</option> }
                })
                .collect_view()
        }
    };

    view! {
        <PageFrame page_id="a001_price_record--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"价格数据"</h1>
                    <span class="page__subtitle">
                        {move || format!("共 {} 条记录", state.with(|s| s.count))}
                    </span>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=on_export>
                        {icon("download")}
                        " 导出CSV"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::End>
                        <div class="form__group">
                            <Label>"省份"</Label>
                            <Select value=province>
                                <option value="">"全部省份"</option>
                                {options_of(FormField::Province)}
                            </Select>
                        </div>
                        <div class="form__group">
                            <Label>"品种"</Label>
                            <Select value=variety>
                                <option value="">"全部品种"</option>
                                {options_of(FormField::Variety)}
                            </Select>
                        </div>
                        <div class="form__group">
                            <Label>"市场"</Label>
                            <Select value=market>
                                <option value="">"全部市场"</option>
                                {options_of(FormField::Market)}
                            </Select>
                        </div>
                        <div class="form__group">
                            <Label>"开始日期"</Label>
                            <Input value=date_from input_type=InputType::Date />
                        </div>
                        <div class="form__group">
                            <Label>"结束日期"</Label>
                            <Input value=date_to input_type=InputType::Date />
                        </div>
                        <div class="form__group">
                            <Label>"条数"</Label>
                            <Select value=limit>
                                <option value="">"默认"</option>
                                {LIMIT_CHOICES
                                    .iter()
                                    .map(|n| view! { <option value={n.to_string()}>{n.to_string()}</option> })
                                    .collect_view()}
                            </Select>
                        </div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=on_search
                            disabled=Signal::derive(move || state.with(|s| s.is_loading))
                        >
                            {icon("search")}
                            " 搜索"
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=on_reset>
                            {icon("x")}
                            " 重置"
                        </Button>
                    </Flex>
                </div>

                {move || {
                    let (records, loading, loaded) =
                        state.with(|s| (s.records.clone(), s.is_loading, s.is_loaded));
                    if records.is_empty() {
                        if loading || !loaded {
                            return view! { <LoadingState /> }.into_any();
                        }
                        return view! { <EmptyState /> }.into_any();
                    }
                    view! { <PriceTable records=records /> }.into_any()
                }}
            </div>
        </PageFrame>
    }
}

#[component]
fn PriceTable(records: Vec<PriceRecord>) -> impl IntoView {
    view! {
        <div class="table-wrapper">
            <Table>
                <TableHeader>
                    <TableRow>
                        {PriceRecord::headers()
                            .into_iter()
                            .map(|h| view! { <TableHeaderCell>{h}</TableHeaderCell> })
                            .collect_view()}
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {records
                        .into_iter()
                        .map(|rec| {
                            let cells = rec.cells();
                            view! {
                                <TableRow>
                                    {cells
                                        .into_iter()
                                        .map(|cell| view! { <TableCell>{cell}</TableCell> })
                                        .collect_view()}
                                </TableRow>
                            }
                        })
                        .collect_view()}
                </TableBody>
            </Table>
        </div>
    }
}
