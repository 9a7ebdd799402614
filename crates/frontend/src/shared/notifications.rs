//! Всплывающие уведомления (toast) с автоматическим скрытием.

use crate::shared::config::use_config;
use contracts::shared::api_response::ApiError;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    fn class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification notification--success",
            NotificationKind::Error => "notification notification--error",
            NotificationKind::Info => "notification notification--info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    pub items: RwSignal<Vec<Notification>>,
    dismiss_ms: Signal<u32>,
}

impl NotificationService {
    /// Dismiss delay follows the current client configuration.
    pub fn new() -> Self {
        let config = use_config();
        Self {
            items: RwSignal::new(Vec::new()),
            dismiss_ms: Signal::derive(move || config.config.get().notification_ms),
        }
    }

    pub fn push(&self, kind: NotificationKind, text: impl Into<String>) {
        let id = Uuid::new_v4();
        let text = text.into();
        self.items.update(|items| items.push(Notification { id, kind, text }));

        let items = self.items;
        Timeout::new(self.dismiss_ms.get_untracked(), move || {
            // Компонент мог быть уже размонтирован
            let _ = items.try_update(|items| items.retain(|n| n.id != id));
        })
        .forget();
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NotificationKind::Success, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NotificationKind::Error, text);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NotificationKind::Info, text);
    }

    /// Logs a failed request and shows its user-facing message.
    pub fn api_error(&self, context: &str, err: &ApiError) {
        log::error!("{}: {}", context, err);
        self.error(format!("{}: {}", context, err.user_message()));
    }

    pub fn dismiss(&self, id: Uuid) {
        self.items.update(|items| items.retain(|n| n.id != id));
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService context not found")
}

#[component]
pub fn NotificationHost() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="notification-host">
            <For
                each=move || service.items.get()
                key=|n| n.id
                children=move |n: Notification| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.class() on:click=move |_| service.dismiss(id)>
                            {n.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
