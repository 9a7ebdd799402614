use crate::shared::date_utils::today;
use crate::shared::export::{download_text, open_print_window, CSV_MIME};
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use contracts::domain::a002_analysis_report::dto::AnalysisReport;
use leptos::prelude::*;

/// Карточка отчёта: выводы по категориям, текст, печать и CSV
#[component]
pub fn ReportDetailModal(
    #[prop(into)] report: Signal<Option<AnalysisReport>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let notifications = use_notifications();

    let print = move |_| {
        let Some(r) = report.get_untracked() else {
            return;
        };
        if let Err(e) = open_print_window(&r.to_printable_html()) {
            log::error!("print failed: {}", e);
            notifications.error(format!("打印失败: {}", e));
        }
    };

    let export_csv = move |_| {
        let Some(r) = report.get_untracked() else {
            return;
        };
        match download_text(&r.to_csv(), &r.csv_filename(today()), CSV_MIME) {
            Ok(()) => notifications.success("报告已导出"),
            Err(e) => {
                log::error!("report export failed: {}", e);
                notifications.error(format!("导出失败: {}", e));
            }
        }
    };

    view! {
        {move || {
            report.get().map(|r| {
                let conclusions = r
                    .conclusion_sections()
                    .into_iter()
                    .filter(|(_, text)| !text.trim().is_empty())
                    .map(|(heading, text)| {
                        view! {
                            <div class="report-detail__section">
                                <h4>{heading}</h4>
                                <p>{text.to_string()}</p>
                            </div>
                        }
                    })
                    .collect_view();
                let body = r.body_html();

                view! {
                    <div class="modal-overlay" on:click=move |_| on_close.run(())>
                        <div class="modal-dialog report-detail" on:click=|ev| ev.stop_propagation()>
                            <div class="modal-header">
                                <h3 class="modal-title">{r.title.clone()}</h3>
                                <div class="modal-header-actions">
                                    <button class="top-header__icon-btn" title="打印" on:click=print>
                                        {icon("printer")}
                                    </button>
                                    <button class="top-header__icon-btn" title="导出CSV" on:click=export_csv>
                                        {icon("download")}
                                    </button>
                                    <button
                                        class="top-header__icon-btn"
                                        title="关闭"
                                        on:click=move |_| on_close.run(())
                                    >
                                        {icon("x")}
                                    </button>
                                </div>
                            </div>

                            <div class="report-detail__meta">
                                <span>"类型: " {r.type_name.clone()}</span>
                                <span>"日期: " {r.display_date().to_string()}</span>
                                <span>"来源: " {r.source.clone()}</span>
                            </div>

                            {conclusions}

                            {match body {
                                Some(html) => view! {
                                    <div class="report-detail__content" inner_html=html></div>
                                }
                                .into_any(),
                                None => view! { <p class="report-detail__content">"-"</p> }.into_any(),
                            }}
                        </div>
                    </div>
                }
            })
        }}
    }
}
