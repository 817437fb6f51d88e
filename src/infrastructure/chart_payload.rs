// Mapper to convert chart descriptions to Plotly JSON payloads
use crate::application::error::DashboardResult;
use crate::domain::chart::{ChartDescription, ChartLayout, LineTrace, SelectorButton};
use serde_json::{json, Map, Value};

/// Encode a chart as `{"data": [trace], "layout": {...}}` for Plotly.js.
/// Object keys are emitted in sorted order, so equal charts give equal strings.
pub fn serialize_chart(chart: &ChartDescription) -> DashboardResult<String> {
    Ok(serde_json::to_string(&chart_to_json(chart))?)
}

pub fn chart_to_json(chart: &ChartDescription) -> Value {
    json!({
        "data": [trace_to_json(&chart.trace)],
        "layout": layout_to_json(&chart.layout),
    })
}

fn trace_to_json(trace: &LineTrace) -> Value {
    json!({
        "type": "scatter",
        "mode": "lines",
        "name": trace.name,
        "x": trace.x,
        "y": trace.y,
        "line": { "color": trace.color },
    })
}

fn layout_to_json(layout: &ChartLayout) -> Value {
    let buttons: Vec<Value> = layout.window_buttons.iter().map(button_to_json).collect();

    json!({
        "title": { "text": layout.title },
        "margin": {
            "l": layout.margin.left,
            "r": layout.margin.right,
            "b": layout.margin.bottom,
            "t": layout.margin.top,
        },
        "xaxis": {
            "title": { "text": layout.x_axis_title },
            "rangeslider": { "visible": layout.range_slider },
            "rangeselector": { "buttons": buttons },
        },
        "yaxis": {
            "title": { "text": layout.y_axis_title },
        },
    })
}

fn button_to_json(button: &SelectorButton) -> Value {
    let mut object = Map::new();
    if let Some(count) = button.count {
        object.insert("count".to_string(), json!(count));
    }
    if let Some(label) = button.label {
        object.insert("label".to_string(), json!(label));
        object.insert("stepmode".to_string(), json!("backward"));
    }
    object.insert("step".to_string(), json!(button.step.as_str()));
    Value::Object(object)
}
