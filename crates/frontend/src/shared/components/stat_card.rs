use crate::shared::icons::icon;
use leptos::prelude::*;

/// Summary card: label, value, optional signed change and subtitle.
///
/// `change` carries the text and its `positive` / `negative` modifier.
#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(optional)]
    icon_name: Option<&'static str>,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] change: Signal<Option<(String, &'static str)>>,
    /// Optional subtitle below the value
    #[prop(optional, into)]
    subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let change_view = move || {
        change.get().map(|(text, class)| {
            view! { <span class=format!("stat-card__change stat-card__change--{}", class)>{text}</span> }
        })
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class="stat-card">
            {icon_name.map(|name| view! { <div class="stat-card__icon">{icon(name)}</div> })}
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get()}
                    {change_view}
                </div>
                {subtitle_view}
            </div>
        </div>
    }
}
