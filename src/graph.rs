// Chart-ready data model consumed by the renderer

use serde::{Deserialize, Serialize};

/// Everything the renderer needs to draw one chart.
///
/// Values are replaced wholesale; the renderer never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
    pub source_name: String,
    pub value_name: String,
    pub graph_type: GraphType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GraphType {
    Bar(BarDiagram),
    /// Modelled so data can describe it; the renderer does not draw it yet
    Line(LineGraph),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        ValueRange { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Percentile,
    Numerical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDiagram {
    pub value_range: ValueRange,
    /// Tick labels, evenly spaced from `value_range.min` to `value_range.max`
    pub value_names: Vec<String>,
    pub value_type: ValueType,
    pub values: Vec<Bar>,
}

impl BarDiagram {
    /// Height of every stacked bar, in bar order
    pub fn stack_heights(&self) -> Vec<f64> {
        self.values.iter().map(Bar::stack_height).collect()
    }
}

/// One labelled group on the x axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub name: String,
    pub value_params: Vec<Segment>,
}

impl Bar {
    pub fn stack_height(&self) -> f64 {
        self.value_params.iter().map(|s| s.value).sum()
    }
}

/// One stacked slice of a bar. Segments are drawn bottom-up in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// CSS color string
    pub color: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineGraph {
    pub value_range_x: ValueRange,
    pub value_range_y: ValueRange,
    pub value_names_x: Vec<String>,
    pub value_names_y: Vec<String>,
    pub value_type_x: ValueType,
    pub value_type_y: ValueType,
    pub values: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_bar_diagram_json() {
        let json = r##"{
            "sourceName": "Fachbereich",
            "valueName": "Anzahl",
            "graphType": {
                "type": "bar",
                "valueRange": { "min": 0, "max": 4 },
                "valueNames": ["0", "1", "2", "3", "4"],
                "valueType": "Numerical",
                "values": [
                    { "name": "A", "valueParams": [
                        { "name": "yes", "color": "#3d2b1f", "value": 2 },
                        { "color": "#582f0e", "value": 1 }
                    ] }
                ]
            }
        }"##;

        let data: GraphData = serde_json::from_str(json).unwrap();
        assert_eq!(data.source_name, "Fachbereich");

        match data.graph_type {
            GraphType::Bar(bar) => {
                assert_eq!(bar.value_range, ValueRange::new(0.0, 4.0));
                assert_eq!(bar.value_type, ValueType::Numerical);
                assert_eq!(bar.values[0].value_params[0].name.as_deref(), Some("yes"));
                assert_eq!(bar.values[0].value_params[1].name, None);
                assert_eq!(bar.stack_heights(), vec![3.0]);
            }
            GraphType::Line(_) => panic!("Expected bar diagram"),
        }
    }

    #[test]
    fn test_deserialize_line_graph_json() {
        let json = r##"{
            "sourceName": "Jahr",
            "valueName": "Umsatz",
            "graphType": {
                "type": "line",
                "valueRangeX": { "min": 0, "max": 10 },
                "valueRangeY": { "min": 0, "max": 100 },
                "valueNamesX": ["0", "10"],
                "valueNamesY": ["0", "100"],
                "valueTypeX": "Numerical",
                "valueTypeY": "Percentile",
                "values": [ { "name": "s", "points": [ { "x": 1, "y": 2 } ] } ]
            }
        }"##;

        let data: GraphData = serde_json::from_str(json).unwrap();
        match data.graph_type {
            GraphType::Line(line) => {
                assert_eq!(line.value_type_y, ValueType::Percentile);
                assert_eq!(line.values[0].points[0].x, 1.0);
            }
            GraphType::Bar(_) => panic!("Expected line graph"),
        }
    }

    #[test]
    fn test_serialize_uses_type_tag() {
        let data = GraphData {
            source_name: "s".to_string(),
            value_name: "v".to_string(),
            graph_type: GraphType::Bar(BarDiagram {
                value_range: ValueRange::new(0.0, 0.0),
                value_names: vec!["0".to_string()],
                value_type: ValueType::Numerical,
                values: vec![],
            }),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["graphType"]["type"], "bar");
        assert_eq!(json["graphType"]["valueNames"][0], "0");
    }

    #[test]
    fn test_empty_bar_has_zero_height() {
        let bar = Bar {
            name: "empty".to_string(),
            value_params: vec![],
        };
        assert_eq!(bar.stack_height(), 0.0);
    }
}
