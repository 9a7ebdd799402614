use crate::shared::icons::icon;
use contracts::shared::pagination::{PageCommand, PageCursor, DEFAULT_PAGE_WINDOW};
use leptos::prelude::*;

/// PaginationControls component: first/prev, a window of page numbers, next/last
///
/// Hidden while there is at most one page. Emits [`PageCommand`]s; the owner
/// applies them to its cursor and re-fetches.
#[component]
pub fn PaginationControls(
    #[prop(into)] cursor: Signal<PageCursor>,

    /// Callback when the user requests another page
    on_command: Callback<PageCommand>,
) -> impl IntoView {
    let at_start = move || !cursor.get().has_prev();
    let at_end = move || !cursor.get().has_next();

    let page_buttons = move || {
        let c = cursor.get();
        c.page_window(DEFAULT_PAGE_WINDOW)
            .map(|page| {
                let is_current = page == c.current_page();
                view! {
                    <button
                        class={if is_current { "pagination-btn pagination-btn--active" } else { "pagination-btn" }}
                        disabled=is_current
                        on:click=move |_| on_command.run(PageCommand::Goto(page))
                    >
                        {page.to_string()}
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <Show when=move || cursor.get().is_paginated()>
            <div class="pagination-controls">
                <button
                    class="pagination-btn"
                    on:click=move |_| on_command.run(PageCommand::First)
                    disabled=at_start
                    title="首页"
                >
                    {icon("chevrons-left")}
                </button>
                <button
                    class="pagination-btn"
                    on:click=move |_| on_command.run(PageCommand::Prev)
                    disabled=at_start
                    title="上一页"
                >
                    {icon("chevron-left")}
                </button>
                {page_buttons}
                <button
                    class="pagination-btn"
                    on:click=move |_| on_command.run(PageCommand::Next)
                    disabled=at_end
                    title="下一页"
                >
                    {icon("chevron-right")}
                </button>
                <button
                    class="pagination-btn"
                    on:click=move |_| on_command.run(PageCommand::Last)
                    disabled=at_end
                    title="末页"
                >
                    {icon("chevrons-right")}
                </button>
                <span class="pagination-info">
                    {move || {
                        let c = cursor.get();
                        format!(
                            "第 {} / {} 页 (共 {} 条)",
                            c.current_page(),
                            c.total_pages(),
                            c.total_items()
                        )
                    }}
                </span>
            </div>
        </Show>
    }
}
