use crate::app_shell::refresh_system_stats;
use crate::layout::global_context::use_global_context;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::crawler_control::api;
use contracts::system::crawler::dto::{CrawlMode, CrawlerKind, CrawlerStatus};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Delay before the stats refresh that follows a start/stop.
const STATS_REFRESH_DELAY_MS: u32 = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CrawlerCommand {
    Start,
    Stop,
}

/// Управление парсерами: цены и аналитические отчёты
#[component]
pub fn CrawlerControlPage() -> impl IntoView {
    view! {
        <PageFrame page_id="crawler_control--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"爬虫控制"</h1>
                </div>
            </div>
            <div class="page__content crawler-grid">
                {CrawlerKind::ALL
                    .into_iter()
                    .map(|kind| view! { <CrawlerPanel kind=kind /> })
                    .collect_view()}
            </div>
        </PageFrame>
    }
}

#[component]
fn CrawlerPanel(kind: CrawlerKind) -> impl IntoView {
    let ctx = use_global_context();
    let notifications = use_notifications();

    let status = RwSignal::new(None::<CrawlerStatus>);
    let busy = RwSignal::new(false);
    let crawl_mode = RwSignal::new("full".to_string());

    let load_status = move || {
        spawn_local(async move {
            let _loading = ctx.begin_loading();
            match api::status(kind).await {
                Ok(s) => status.set(Some(s)),
                Err(e) => notifications.api_error(&format!("获取{}状态失败", kind.label()), &e),
            }
        });
    };

    Effect::new(move |_| {
        ctx.refresh_tick.track();
        load_status();
    });

    let run_command = move |command: CrawlerCommand| {
        busy.set(true);
        spawn_local(async move {
            let result = {
                let _loading = ctx.begin_loading();
                match command {
                    CrawlerCommand::Start => api::start(kind).await,
                    CrawlerCommand::Stop => api::stop(kind).await,
                }
            };
            busy.set(false);
            match result {
                Ok(message) => {
                    log::info!("{:?} {:?}: {}", kind, command, message);
                    let fallback = match command {
                        CrawlerCommand::Start => "爬虫已启动",
                        CrawlerCommand::Stop => "爬虫已停止",
                    };
                    notifications.success(if message.is_empty() {
                        fallback.to_string()
                    } else {
                        message
                    });
                    load_status();
                    TimeoutFuture::new(STATS_REFRESH_DELAY_MS).await;
                    refresh_system_stats(ctx, notifications, false);
                }
                Err(e) => {
                    let context = match command {
                        CrawlerCommand::Start => "启动爬虫失败",
                        CrawlerCommand::Stop => "停止爬虫失败",
                    };
                    notifications.api_error(context, &e);
                }
            }
        });
    };

    let crawl_once = move |_| {
        let mode = if crawl_mode.get_untracked() == "quick" {
            CrawlMode::Quick
        } else {
            CrawlMode::Full
        };
        busy.set(true);
        spawn_local(async move {
            let result = {
                let _loading = ctx.begin_loading();
                api::crawl_once(mode).await
            };
            busy.set(false);
            match result {
                Ok(message) => {
                    notifications.success(if message.is_empty() {
                        format!("{}完成", mode.label())
                    } else {
                        message
                    });
                    load_status();
                }
                Err(e) => notifications.api_error("单次爬取失败", &e),
            }
        });
    };

    let is_running = move || status.with(|s| s.as_ref().is_some_and(|s| s.is_running));
    let disabled = Signal::derive(move || busy.get());

    view! {
        <div class="dashboard-panel crawler-panel">
            <div class="dashboard-panel__header">
                <h3 class="dashboard-panel__title">{icon("spider")} " " {kind.label()}</h3>
                <span class=move || {
                    if is_running() { "badge badge--success" } else { "badge badge--muted" }
                }>
                    {move || status.with(|s| s.as_ref().map(|s| s.status_text().to_string()).unwrap_or_else(|| "-".to_string()))}
                </span>
            </div>

            <div class="dashboard-panel__body">
                <dl class="crawler-panel__facts">
                    <dt>"运行时间"</dt>
                    <dd>{move || status.with(|s| s.as_ref().map(|s| s.running_time_text()).unwrap_or_else(|| "-".to_string()))}</dd>
                    <dt>"已爬取"</dt>
                    <dd>{move || status.with(|s| s.as_ref().map(|s| s.crawled_count.to_string()).unwrap_or_else(|| "-".to_string()))}</dd>
                    <dt>"错误数"</dt>
                    <dd>{move || status.with(|s| s.as_ref().map(|s| s.error_count.to_string()).unwrap_or_else(|| "-".to_string()))}</dd>
                </dl>

                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| run_command(CrawlerCommand::Start)
                        disabled=disabled
                    >
                        {icon("play")}
                        " 启动"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| run_command(CrawlerCommand::Stop)
                        disabled=disabled
                    >
                        {icon("stop")}
                        " 停止"
                    </Button>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| load_status()>
                        {icon("refresh")}
                        " 状态"
                    </Button>
                </Flex>

                {(kind == CrawlerKind::Report)
                    .then(|| {
                        view! {
                            <div class="crawler-panel__once">
                                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                                    <Label>"单次爬取"</Label>
                                    <Select value=crawl_mode>
                                        <option value="full">{CrawlMode::Full.label()}</option>
                                        <option value="quick">{CrawlMode::Quick.label()}</option>
                                    </Select>
                                    <Button on_click=crawl_once disabled=disabled>
                                        "立即爬取"
                                    </Button>
                                </Flex>
                            </div>
                        }
                    })}
            </div>
        </div>
    }
}
