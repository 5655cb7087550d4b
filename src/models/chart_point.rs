use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub time_label: String,
    pub score: i64,
    pub timestamp: i64,
}

/// Chart points plus the y-axis bounds used to draw them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    pub y_min: Option<i64>,
    pub y_max: Option<i64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
