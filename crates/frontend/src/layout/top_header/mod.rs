//! TopHeader component - application top bar.
//!
//! Contains:
//! - Sidebar toggle and application title
//! - Current section title and loading indicator
//! - "Refresh" and "Export" for the current section

use crate::domain::a001_price_record::api::export_csv;
use crate::domain::a002_analysis_report::api::export_all;
use crate::layout::global_context::{use_global_context, Section};
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let notifications = use_notifications();

    let toggle_sidebar = move |_| {
        ctx.toggle_left();
    };

    let refresh = move |_| {
        log::info!("refresh requested for {}", ctx.active.get_untracked());
        ctx.request_refresh();
    };

    let export = move |_| {
        let result = match ctx.active.get_untracked() {
            Section::Reports => export_all(),
            _ => export_csv(&ctx.export_filter.get_untracked()),
        };
        match result {
            Ok(()) => notifications.success("导出已开始"),
            Err(e) => {
                log::error!("export failed: {}", e);
                notifications.error(format!("导出失败: {}", e));
            }
        }
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "隐藏导航" } else { "显示导航" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">"农产品市场价格监测"</span>
                <span class="top-header__section">{move || ctx.active.get().title()}</span>
            </div>

            <div class="top-header__actions">
                <Show when=move || ctx.is_loading()>
                    <span class="top-header__loading">
                        <span class="spinner"></span>
                        "加载中..."
                    </span>
                </Show>

                <button class="top-header__icon-btn" on:click=refresh title="刷新当前页面">
                    {icon("refresh")}
                </button>

                <button class="top-header__icon-btn" on:click=export title="导出数据">
                    {icon("download")}
                </button>
            </div>
        </div>
    }
}
