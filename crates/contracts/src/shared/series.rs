//! Chart-ready data shared by the line and bar charts.

/// Series sharing one x axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesSet {
    pub labels: Vec<String>,
    pub series: Vec<NamedSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub color: &'static str,
    /// `None` leaves a gap in the line.
    pub values: Vec<Option<f64>>,
}

impl SeriesSet {
    /// A single series.
    pub fn single(name: impl Into<String>, color: &'static str, points: Vec<(String, Option<f64>)>) -> Self {
        let (labels, values) = points.into_iter().unzip();
        Self {
            labels,
            series: vec![NamedSeries {
                name: name.into(),
                color,
                values,
            }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.series.iter().all(|s| s.values.iter().all(Option::is_none))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        let set = SeriesSet::single(
            "均价",
            "#007bff",
            vec![("03/14".to_string(), Some(5.2)), ("03/15".to_string(), None)],
        );
        assert_eq!(set.labels, vec!["03/14", "03/15"]);
        assert_eq!(set.series[0].values, vec![Some(5.2), None]);
        assert!(!set.is_empty());
        assert!(SeriesSet::default().is_empty());
    }
}
