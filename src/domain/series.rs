// Series domain model - time ordered sensor readings
use chrono::NaiveDateTime;
use std::fmt::Write;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub time: NaiveDateTime,
    /// `None` when the store holds NULL for this sample
    pub value: Option<f64>,
}

impl SeriesPoint {
    pub fn new(time: NaiveDateTime, value: Option<f64>) -> Self {
        Self { time, value }
    }
}

/// One sensor table as fetched, in ascending time order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn times(&self) -> Vec<String> {
        self.points.iter().map(|p| format_timestamp(&p.time)).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Encode as CSV with a `time,value` header, one row per point.
    pub fn to_csv(&self) -> String {
        let mut csv = String::with_capacity(16 + self.points.len() * 32);
        csv.push_str("time,value\n");
        for point in &self.points {
            let _ = write!(csv, "{},", format_timestamp(&point.time));
            if let Some(value) = point.value {
                let _ = write!(csv, "{}", value);
            }
            csv.push('\n');
        }
        csv
    }
}

/// Locale independent rendering shared by the chart payload and the CSV export
pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}
