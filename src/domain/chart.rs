// Chart domain model - a single line chart with a time range selector
use super::series::Series;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorStep {
    Hour,
    Minute,
    All,
}

impl SelectorStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorStep::Hour => "hour",
            SelectorStep::Minute => "minute",
            SelectorStep::All => "all",
        }
    }
}

/// Quick-select window button; `count` and `label` are unset for "all"
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorButton {
    pub count: Option<u32>,
    pub label: Option<&'static str>,
    pub step: SelectorStep,
}

impl SelectorButton {
    const fn backward(count: u32, label: &'static str, step: SelectorStep) -> Self {
        Self {
            count: Some(count),
            label: Some(label),
            step,
        }
    }

    const fn all() -> Self {
        Self {
            count: None,
            label: None,
            step: SelectorStep::All,
        }
    }
}

/// Identical on every chart: 4h, 2h, 1h, 30min, all
pub const WINDOW_BUTTONS: [SelectorButton; 5] = [
    SelectorButton::backward(4, "4 hours", SelectorStep::Hour),
    SelectorButton::backward(2, "2 hours", SelectorStep::Hour),
    SelectorButton::backward(1, "1 hour", SelectorStep::Hour),
    SelectorButton::backward(30, "30 min", SelectorStep::Minute),
    SelectorButton::all(),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margin {
    pub left: u32,
    pub right: u32,
    pub bottom: u32,
    pub top: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineTrace {
    pub name: String,
    pub color: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub margin: Margin,
    pub range_slider: bool,
    pub window_buttons: Vec<SelectorButton>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescription {
    pub trace: LineTrace,
    pub layout: ChartLayout,
}

impl ChartDescription {
    pub fn build(series: &Series, title: &str, y_axis_title: &str, color: &str) -> Self {
        let trace = LineTrace {
            name: title.to_string(),
            color: color.to_string(),
            x: series.times(),
            y: series.values(),
        };

        let layout = ChartLayout {
            title: format!("{} vs time", title),
            x_axis_title: "Time".to_string(),
            y_axis_title: y_axis_title.to_string(),
            margin: Margin {
                left: 0,
                right: 0,
                bottom: 35,
                top: 60,
            },
            range_slider: true,
            window_buttons: WINDOW_BUTTONS.to_vec(),
        };

        Self { trace, layout }
    }
}
