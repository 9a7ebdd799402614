//! Sidebar with collapsible section groups

use crate::layout::global_context::{use_global_context, Section};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    items: Vec<Section>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "analytics",
            label: "数据分析",
            items: vec![Section::Overview, Section::Trends, Section::MarketDashboard],
        },
        MenuGroup {
            id: "data",
            label: "数据管理",
            items: vec![Section::PriceData, Section::Reports],
        },
        MenuGroup {
            id: "system",
            label: "系统管理",
            items: vec![Section::CrawlerControl, Section::Settings],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();

    let groups = get_menu_groups();
    let collapsed_groups: RwSignal<Vec<&'static str>> = RwSignal::new(vec![]);

    view! {
        <div class="app-sidebar__content">
            {groups.into_iter().map(|group| {
                let group_id = group.id;
                let items = group.items;
                view! {
                    <div>
                        <div
                            class="app-sidebar__item app-sidebar__group"
                            on:click=move |_| {
                                collapsed_groups.update(|items| {
                                    if let Some(pos) = items.iter().position(|x| *x == group_id) {
                                        items.remove(pos);
                                    } else {
                                        items.push(group_id);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || !collapsed_groups.get().contains(&group_id)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || !collapsed_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {items.iter().copied().map(|section| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || ctx.active.get() == section
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.navigate(section)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(section.icon())}
                                                <span>{section.title()}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
