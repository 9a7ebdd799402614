//! Pure SVG geometry for the line and bar charts.

/// Plot area inside an SVG view box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 260.0,
            left: 52.0,
            right: 16.0,
            top: 12.0,
            bottom: 28.0,
        }
    }
}

impl Frame {
    pub fn plot_width(&self) -> f64 {
        (self.width - self.left - self.right).max(1.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.top - self.bottom).max(1.0)
    }

    pub fn baseline(&self) -> f64 {
        self.height - self.bottom
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Value range of the y axis.
///
/// `zero_based` pins the lower bound at 0 (bars). Otherwise the observed
/// span is padded by 5% on both sides. A flat series gets a ±1 band.
pub fn y_range<'a>(values: impl IntoIterator<Item = &'a Option<f64>>, zero_based: bool) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.into_iter().flatten() {
        if v.is_finite() {
            min = min.min(*v);
            max = max.max(*v);
        }
    }
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if zero_based {
        let top = if max > 0.0 { max * 1.1 } else { 1.0 };
        return (0.0, top);
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// X of the `index`-th of `count` evenly spaced points. A single point is centred.
pub fn x_at(frame: &Frame, index: usize, count: usize) -> f64 {
    if count <= 1 {
        return frame.left + frame.plot_width() / 2.0;
    }
    frame.left + frame.plot_width() * index as f64 / (count - 1) as f64
}

pub fn y_at(frame: &Frame, value: f64, range: (f64, f64)) -> f64 {
    let (lo, hi) = range;
    let span = if hi - lo == 0.0 { 1.0 } else { hi - lo };
    frame.baseline() - (value - lo) / span * frame.plot_height()
}

/// `points` attributes of the polylines of one series, split at gaps.
pub fn line_segments(frame: &Frame, values: &[Option<f64>], range: (f64, f64)) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) if v.is_finite() => {
                current.push(format!(
                    "{:.1},{:.1}",
                    x_at(frame, i, values.len()),
                    y_at(frame, *v, range)
                ));
            }
            _ => {
                if !current.is_empty() {
                    segments.push(current.join(" "));
                    current.clear();
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current.join(" "));
    }
    segments
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarRect {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// One bar per value in equal slots, 70% of the slot wide.
pub fn bars(frame: &Frame, values: &[f64], range: (f64, f64)) -> Vec<BarRect> {
    if values.is_empty() {
        return Vec::new();
    }
    let slot = frame.plot_width() / values.len() as f64;
    let width = slot * 0.7;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let top = y_at(frame, v.max(range.0), range);
            BarRect {
                x: frame.left + slot * i as f64 + (slot - width) / 2.0,
                y: top,
                width,
                height: (frame.baseline() - top).max(0.0),
            }
        })
        .collect()
}

/// `count` evenly spaced tick values from `lo` to `hi`.
pub fn ticks(range: (f64, f64), count: usize) -> Vec<f64> {
    let (lo, hi) = range;
    match count {
        0 => Vec::new(),
        1 => vec![lo],
        n => (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Show every n-th x label so that at most `max_labels` are drawn.
pub fn label_stride(count: usize, max_labels: usize) -> usize {
    if max_labels == 0 || count <= max_labels {
        return 1;
    }
    count.div_ceil(max_labels)
}

/// Tick label text: integers without decimals, the rest with two.
pub fn tick_label(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            width: 120.0,
            height: 110.0,
            left: 10.0,
            right: 10.0,
            top: 5.0,
            bottom: 5.0,
        }
    }

    #[test]
    fn test_y_range() {
        let values = [Some(2.0), None, Some(12.0)];
        assert_eq!(y_range(&values, false), (1.5, 12.5));
        let (lo, hi) = y_range(&values, true);
        assert_eq!(lo, 0.0);
        assert!((hi - 13.2).abs() < 1e-9);
        assert_eq!(y_range(&[None, None], false), (0.0, 1.0));
        assert_eq!(y_range(&[Some(5.0), Some(5.0)], false), (4.0, 6.0));
        assert_eq!(y_range(&[Some(0.0)], true), (0.0, 1.0));
    }

    #[test]
    fn test_positions() {
        let f = frame();
        assert_eq!(f.plot_width(), 100.0);
        assert_eq!(f.plot_height(), 100.0);
        assert_eq!(x_at(&f, 0, 3), 10.0);
        assert_eq!(x_at(&f, 2, 3), 110.0);
        assert_eq!(x_at(&f, 0, 1), 60.0);
        assert_eq!(y_at(&f, 0.0, (0.0, 10.0)), 105.0);
        assert_eq!(y_at(&f, 10.0, (0.0, 10.0)), 5.0);
        assert_eq!(y_at(&f, 5.0, (0.0, 10.0)), 55.0);
    }

    #[test]
    fn test_line_segments_split_at_gaps() {
        let f = frame();
        let values = [Some(0.0), Some(10.0), None, Some(5.0), Some(5.0)];
        let segments = line_segments(&f, &values, (0.0, 10.0));
        assert_eq!(segments, vec!["10.0,105.0 35.0,5.0", "85.0,55.0 110.0,55.0"]);
        assert!(line_segments(&f, &[None, None], (0.0, 1.0)).is_empty());
    }

    #[test]
    fn test_bars() {
        let f = frame();
        let rects = bars(&f, &[10.0, 5.0], (0.0, 10.0));
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].width, 35.0);
        assert_eq!(rects[0].x, 17.5);
        assert_eq!(rects[0].height, 100.0);
        assert_eq!(rects[1].y, 55.0);
        assert_eq!(rects[1].center_x(), 85.0);
        assert!(bars(&f, &[], (0.0, 1.0)).is_empty());
    }

    #[test]
    fn test_ticks_and_labels() {
        assert_eq!(ticks((0.0, 10.0), 3), vec![0.0, 5.0, 10.0]);
        assert!(ticks((0.0, 10.0), 0).is_empty());
        assert_eq!(label_stride(30, 8), 4);
        assert_eq!(label_stride(5, 8), 1);
        assert_eq!(tick_label(5.0), "5");
        assert_eq!(tick_label(2.346), "2.35");
    }
}
