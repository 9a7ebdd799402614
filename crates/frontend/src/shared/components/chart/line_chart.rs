use super::geometry::{label_stride, line_segments, tick_label, ticks, x_at, y_at, y_range, Frame};
use contracts::shared::series::SeriesSet;
use leptos::prelude::*;

const Y_TICKS: usize = 5;
const MAX_X_LABELS: usize = 10;

/// Multi-series SVG line chart with a legend. Gaps (`None`) break the line.
#[component]
pub fn LineChart(
    #[prop(into)] data: Signal<SeriesSet>,
    #[prop(optional, into)] title: MaybeProp<String>,
) -> impl IntoView {
    let frame = Frame::default();

    let body = move || {
        let set = data.get();
        let has_points = set
            .series
            .iter()
            .any(|s| s.values.iter().any(Option::is_some));
        if set.labels.is_empty() || !has_points {
            return view! { <div class="chart__empty">"暂无数据"</div> }.into_any();
        }

        let range = y_range(set.series.iter().flat_map(|s| s.values.iter()), false);
        let count = set.labels.len();
        let stride = label_stride(count, MAX_X_LABELS);

        let grid = ticks(range, Y_TICKS)
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

        let x_labels = set
            .labels
            .iter()
            .enumerate()
            .filter(|(i, _)| i % stride == 0)
            .map(|(i, label)| {
                view! {
                    <text
                        class="chart__x-label"
                        x={x_at(&frame, i, count)}
                        y={frame.height - 8.0}
                        text-anchor="middle"
                    >
                        {label.clone()}
                    </text>
                }
            })
            .collect_view();

        let lines = set
            .series
            .iter()
            .flat_map(|s| {
                let color = s.color;
                line_segments(&frame, &s.values, range)
                    .into_iter()
                    .map(move |points| {
                        view! {
                            <polyline points=points fill="none" stroke=color stroke-width="2" />
                        }
                    })
            })
            .collect_view();

        let legend = set
            .series
            .iter()
            .map(|s| {
                view! {
                    <span class="chart__legend-item">
                        <span class="chart__legend-swatch" style={format!("background:{}", s.color)}></span>
                        {s.name.clone()}
                    </span>
                }
            })
            .collect_view();

        view! {
            <svg class="chart__svg" viewBox={frame.view_box()} preserveAspectRatio="none">
                {grid}
                {lines}
                {x_labels}
            </svg>
            <div class="chart__legend">{legend}</div>
        }
        .into_any()
    };

    view! {
        <div class="chart chart--line">
            {move || title.get().map(|t| view! { <div class="chart__title">{t}</div> })}
            {body}
        </div>
    }
}
