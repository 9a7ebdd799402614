use crate::shared::config::{use_config, AppConfig};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::crawler_control::api::status as crawler_status;
use crate::system::settings::api;
use contracts::system::crawler::dto::{CrawlerConfig, CrawlerKind};
use contracts::system::health::HealthStatus;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use thaw::*;

/// Настройки: клиентская конфигурация, конфигурация парсера, проверка backend
#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <PageFrame page_id="settings--system" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"系统设置"</h1>
                </div>
            </div>
            <div class="page__content settings-grid">
                <ClientConfigForm />
                <CrawlerConfigForm />
                <HealthCheck />
            </div>
        </PageFrame>
    }
}

#[component]
fn ClientConfigForm() -> impl IntoView {
    let store = use_config();
    let notifications = use_notifications();

    let api_base = RwSignal::new(String::new());
    let refresh_secs = RwSignal::new(String::new());
    let page_size = RwSignal::new(String::new());
    let notification_ms = RwSignal::new(String::new());

    let fill = move |config: &AppConfig| {
        api_base.set(config.api_base.clone());
        refresh_secs.set(config.refresh_interval_secs.to_string());
        page_size.set(config.report_page_size.to_string());
        notification_ms.set(config.notification_ms.to_string());
    };
    fill(&store.config.get_untracked());

    let on_apply = move |_| {
        let parsed = AppConfig::from_form(
            &api_base.get_untracked(),
            &refresh_secs.get_untracked(),
            &page_size.get_untracked(),
            &notification_ms.get_untracked(),
        );
        match parsed.and_then(|config| store.apply(config)) {
            Ok(()) => notifications.success("设置已保存"),
            Err(e) => notifications.error(e),
        }
    };

    let on_reset = move |_| {
        store.reset();
        fill(&store.config.get_untracked());
        notifications.info("已恢复默认设置");
    };

    view! {
        <div class="dashboard-panel">
            <div class="dashboard-panel__header">
                <h3 class="dashboard-panel__title">{icon("settings")} " 客户端设置"</h3>
            </div>
            <div class="dashboard-panel__body form">
                <div class="form__group">
                    <Label>"API 地址"</Label>
                    <Input value=api_base placeholder="/api" />
                </div>
                <div class="form__group">
                    <Label>"统计刷新间隔 (秒)"</Label>
                    <Input value=refresh_secs input_type=InputType::Number />
                </div>
                <div class="form__group">
                    <Label>"每页报告数"</Label>
                    <Input value=page_size input_type=InputType::Number />
                </div>
                <div class="form__group">
                    <Label>"通知显示时长 (毫秒)"</Label>
                    <Input value=notification_ms input_type=InputType::Number />
                </div>
                <Flex gap=FlexGap::Small>
                    <Button appearance=ButtonAppearance::Primary on_click=on_apply>"保存"</Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=on_reset>"恢复默认"</Button>
                </Flex>
            </div>
        </div>
    }
}

#[component]
fn CrawlerConfigForm() -> impl IntoView {
    let notifications = use_notifications();

    let defaults = CrawlerConfig::default();
    let enabled = RwSignal::new(defaults.enabled);
    let interval = RwSignal::new(defaults.interval_minutes.to_string());
    let provinces = RwSignal::new(String::new());
    let saving = RwSignal::new(false);

    // Текущая конфигурация приходит вместе со статусом парсера цен
    spawn_local(async move {
        match crawler_status(CrawlerKind::Price).await {
            Ok(status) => {
                if let Some(config) = status.crawler_config() {
                    enabled.set(config.enabled);
                    interval.set(config.interval_minutes.to_string());
                    provinces.set(config.provinces_text());
                }
            }
            Err(e) => log::warn!("crawler config prefill failed: {}", e),
        }
    });

    let on_save = move |_| {
        let config = match CrawlerConfig::from_form(
            enabled.get_untracked(),
            &interval.get_untracked(),
            &provinces.get_untracked(),
        ) {
            Ok(c) => c,
            Err(e) => {
                notifications.error(e);
                return;
            }
        };
        saving.set(true);
        spawn_local(async move {
            match api::save_crawler_config(&config).await {
                Ok(message) if message.is_empty() => notifications.success("配置已保存"),
                Ok(message) => notifications.success(message),
                Err(e) => notifications.api_error("保存爬虫配置失败", &e),
            }
            saving.set(false);
        });
    };

    view! {
        <div class="dashboard-panel">
            <div class="dashboard-panel__header">
                <h3 class="dashboard-panel__title">{icon("spider")} " 爬虫配置"</h3>
            </div>
            <div class="dashboard-panel__body form">
                <Checkbox checked=enabled label="启用定时爬取" />
                <div class="form__group">
                    <Label>"爬取间隔 (分钟)"</Label>
                    <Input value=interval input_type=InputType::Number />
                </div>
                <div class="form__group">
                    <Label>"省份 (逗号分隔，留空表示全部)"</Label>
                    <Input value=provinces placeholder="北京, 上海" />
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=on_save
                    disabled=Signal::derive(move || saving.get())
                >
                    "保存配置"
                </Button>
            </div>
        </div>
    }
}

#[component]
fn HealthCheck() -> impl IntoView {
    let notifications = use_notifications();
    let health = RwSignal::new(None::<HealthStatus>);
    let checking = RwSignal::new(false);

    let on_check = move |_| {
        checking.set(true);
        spawn_local(async move {
            match api::check_health().await {
                Ok(h) => {
                    if h.is_healthy() {
                        notifications.success("服务运行正常");
                    } else {
                        notifications.error(format!("服务状态异常: {}", h.status));
                    }
                    health.set(Some(h));
                }
                Err(e) => {
                    health.set(None);
                    notifications.api_error("健康检查失败", &e);
                }
            }
            checking.set(false);
        });
    };

    view! {
        <div class="dashboard-panel">
            <div class="dashboard-panel__header">
                <h3 class="dashboard-panel__title">{icon("heart-pulse")} " 服务状态"</h3>
            </div>
            <div class="dashboard-panel__body">
                {move || {
                    health
                        .get()
                        .map(|h| {
                            let class = if h.is_healthy() { "badge badge--success" } else { "badge badge--danger" };
                            view! {
                                <dl class="crawler-panel__facts">
                                    <dt>"状态"</dt>
                                    <dd><span class=class>{h.status.clone()}</span></dd>
                                    <dt>"版本"</dt>
                                    <dd>{h.version.clone()}</dd>
                                    <dt>"时间"</dt>
                                    <dd>{format_datetime(&h.timestamp)}</dd>
                                </dl>
                            }
                        })
                }}
                <Button on_click=on_check disabled=Signal::derive(move || checking.get())>
                    "检查服务"
                </Button>
            </div>
        </div>
    }
}
