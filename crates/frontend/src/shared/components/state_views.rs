//! Placeholders for loading and empty states.

use leptos::prelude::*;

#[component]
pub fn LoadingState(#[prop(default = "加载中...")] text: &'static str) -> impl IntoView {
    view! {
        <div class="state state--loading">
            <span class="spinner"></span>
            {text}
        </div>
    }
}

/// Rendered for a successful request without rows.
#[component]
pub fn EmptyState(#[prop(default = "暂无数据")] text: &'static str) -> impl IntoView {
    view! { <div class="state state--empty">{text}</div> }
}
