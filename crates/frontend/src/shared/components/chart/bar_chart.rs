use super::geometry::{bars, label_stride, tick_label, ticks, y_at, y_range, Frame};
use leptos::prelude::*;

const MAX_X_LABELS: usize = 12;

/// Single-series SVG bar chart; each bar carries its value as a tooltip.
#[component]
pub fn BarChart(
    #[prop(into)] data: Signal<Vec<(String, f64)>>,
    #[prop(default = "#007bff")] color: &'static str,
    #[prop(optional, into)] title: MaybeProp<String>,
) -> impl IntoView {
    let frame = Frame::default();

    let body = move || {
        let items = data.get();
        if items.is_empty() {
            return view! { <div class="chart__empty">"暂无数据"</div> }.into_any();
        }

        let values: Vec<f64> = items.iter().map(|(_, v)| *v).collect();
        let as_options: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        let range = y_range(&as_options, true);
        let rects = bars(&frame, &values, range);
        let stride = label_stride(items.len(), MAX_X_LABELS);

        let grid = ticks(range, 5)
            .into_iter()
            .map(|t| {
                let y = y_at(&frame, t, range);
                view! {
                    <g class="chart__grid">
                        <line x1=frame.left y1=y x2={frame.width - frame.right} y2=y />
                        <text x={frame.left - 6.0} y={y + 4.0} text-anchor="end">{tick_label(t)}</text>
                    </g>
                }
            })
            .collect_view();

        let columns = items
            .iter()
            .zip(rects)
            .enumerate()
            .map(|(i, ((label, value), rect))| {
                let tooltip = format!("{}: {}", label, tick_label(*value));
                let x_label = (i % stride == 0).then(|| {
                    view! {
                        <text
                            class="chart__x-label"
                            x={rect.center_x()}
                            y={frame.height - 8.0}
                            text-anchor="middle"
                        >
                            {label.clone()}
                        </text>
                    }
                });
                view! {
                    <g class="chart__bar">
                        <rect x={rect.x} y={rect.y} width={rect.width} height={rect.height} fill=color>
                            <title>{tooltip}</title>
                        </rect>
                        {x_label}
                    </g>
                }
            })
            .collect_view();

        view! {
            <svg class="chart__svg" viewBox={frame.view_box()} preserveAspectRatio="none">
                {grid}
                {columns}
            </svg>
        }
        .into_any()
    };

    view! {
        <div class="chart chart--bar">
            {move || title.get().map(|t| view! { <div class="chart__title">{t}</div> })}
            {body}
        </div>
    }
}
