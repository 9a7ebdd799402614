use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::config::ConfigStore;
use crate::shared::notifications::NotificationService;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Client configuration first: notifications read their dismiss delay from it.
    provide_context(ConfigStore::new());

    provide_context(AppGlobalContext::new());

    provide_context(NotificationService::new());

    view! {
        <AppShell />
    }
}
