//! Application Shell - корневые компоненты приложения
//!
//! - `AppShell` - Shell + notifications
//! - `MainLayout` - sidebar + active section, periodic stats refresh

use crate::dashboards::d400_overview::api;
use crate::layout::global_context::{use_global_context, AppGlobalContext};
use crate::layout::left::Sidebar;
use crate::layout::registry::render_section;
use crate::layout::Shell;
use crate::shared::config::use_config;
use crate::shared::notifications::{use_notifications, NotificationHost, NotificationService};
use crate::shared::polling::use_polling;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Reloads `/api/stats` into the global context.
///
/// A failure keeps the previous stats. `notify_failure` is off for
/// background polling so an unreachable backend does not flood the screen.
pub fn refresh_system_stats(
    ctx: AppGlobalContext,
    notifications: NotificationService,
    notify_failure: bool,
) {
    spawn_local(async move {
        let _loading = ctx.begin_loading();
        match api::fetch_stats().await {
            Ok(stats) => ctx.stats.set(Some(stats)),
            Err(e) if notify_failure => notifications.api_error("加载统计数据失败", &e),
            Err(e) => log::warn!("stats refresh failed: {}", e),
        }
    });
}

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_global_context();
    let notifications = use_notifications();
    let config = use_config();

    ctx.init_router_integration();

    refresh_system_stats(ctx, notifications, true);

    let polling = use_polling(config.config.get_untracked().refresh_interval_ms(), move || {
        refresh_system_stats(ctx, notifications, false);
    });

    // Интервал меняется из настроек без перезагрузки
    Effect::new(move |_| {
        polling.set_period(config.config.get().refresh_interval_ms());
    });

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    {move || render_section(ctx.active.get())}
                }
                .into_any()
            }
        />
    }
}

#[component]
pub fn AppShell() -> impl IntoView {
    view! {
        <MainLayout />
        <NotificationHost />
    }
}
