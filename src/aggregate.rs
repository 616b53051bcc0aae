use crate::csv_reader::Table;
use crate::error::Result;
use crate::graph::{Bar, BarDiagram, GraphData, GraphType, Segment, ValueRange, ValueType};
use crate::palette::ColorPalette;
use crate::scale::calculate_axis_ticks;
use indexmap::{IndexMap, IndexSet};
use log::{debug, error};

/// Segment and value label for single-column counts
pub const COUNT_LABEL: &str = "Anzahl";
/// Value label for cross-tabulated counts
pub const COUNT_BY_LABEL: &str = "count of persons";

/// Turns a `Table` into chart-ready `GraphData`.
///
/// Group colors come from the palette by group index, so the same input
/// always gets the same colors.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    palette: ColorPalette,
}

impl Aggregator {
    pub fn new(palette: ColorPalette) -> Self {
        Aggregator { palette }
    }

    /// One bar per distinct non-empty value of `category`, in first-appearance
    /// order, each holding a single segment with its occurrence count.
    pub fn count(&self, category: &str, table: &Table) -> Result<GraphData> {
        let idx = find_column(table, category)?;

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for value in table.column(idx).filter(|v| !v.is_empty()) {
            *counts.entry(value).or_insert(0) += 1;
        }

        let values: Vec<Bar> = counts
            .iter()
            .enumerate()
            .map(|(i, (name, &count))| Bar {
                name: name.to_string(),
                value_params: vec![Segment {
                    name: Some(COUNT_LABEL.to_string()),
                    color: self.palette.get_color(i),
                    value: count as f64,
                }],
            })
            .collect();

        let diagram = counted_diagram(values);
        debug!(
            "count('{}'): {} groups (axis max {})",
            category,
            diagram.values.len(),
            diagram.value_range.max
        );

        Ok(GraphData {
            source_name: category.to_string(),
            value_name: COUNT_LABEL.to_string(),
            graph_type: GraphType::Bar(diagram),
        })
    }

    /// Cross-tabulate `category` (x axis) against `filter_category` (stacked
    /// segments). Zero-count segments are left out rather than drawn empty.
    pub fn count_by(&self, category: &str, filter_category: &str, table: &Table) -> Result<GraphData> {
        let cat_idx = find_column(table, category)?;
        let filter_idx = find_column(table, filter_category)?;

        let mut x_labels: IndexSet<&str> = IndexSet::new();
        let mut groups: IndexSet<&str> = IndexSet::new();
        let mut cells: IndexMap<(&str, &str), usize> = IndexMap::new();

        for row in &table.entries {
            let x = row.get(cat_idx).map(String::as_str).unwrap_or("");
            let group = row.get(filter_idx).map(String::as_str).unwrap_or("");

            if !x.is_empty() {
                x_labels.insert(x);
            }
            if !group.is_empty() {
                groups.insert(group);
            }
            if !x.is_empty() && !group.is_empty() {
                *cells.entry((x, group)).or_insert(0) += 1;
            }
        }

        let values: Vec<Bar> = x_labels
            .iter()
            .map(|&x| {
                let value_params = groups
                    .iter()
                    .enumerate()
                    .filter_map(|(gi, &group)| {
                        let count = cells.get(&(x, group)).copied().unwrap_or(0);
                        (count > 0).then(|| Segment {
                            name: Some(group.to_string()),
                            color: self.palette.get_color(gi),
                            value: count as f64,
                        })
                    })
                    .collect();
                Bar { name: x.to_string(), value_params }
            })
            .collect();

        let diagram = counted_diagram(values);
        debug!(
            "count_by('{}', '{}'): {} bars x {} groups (axis max {})",
            category,
            filter_category,
            diagram.values.len(),
            groups.len(),
            diagram.value_range.max
        );

        Ok(GraphData {
            source_name: format!("{} by {}", filter_category, category),
            value_name: COUNT_BY_LABEL.to_string(),
            graph_type: GraphType::Bar(diagram),
        })
    }
}

/// Numerical diagram whose axis ticks cover the tallest stack
fn counted_diagram(values: Vec<Bar>) -> BarDiagram {
    let mut diagram = BarDiagram {
        value_range: ValueRange::new(0.0, 0.0),
        value_names: Vec::new(),
        value_type: ValueType::Numerical,
        values,
    };

    // Stack heights are whole counts
    let observed_max = diagram
        .stack_heights()
        .into_iter()
        .map(|h| h as usize)
        .max()
        .unwrap_or(0);
    let ticks = calculate_axis_ticks(observed_max);

    diagram.value_range = ValueRange::new(0.0, ticks.max_count as f64);
    diagram.value_names = ticks.names;
    diagram
}

fn find_column(table: &Table, name: &str) -> Result<usize> {
    table.require_column(name).inspect_err(|e| error!("{}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_reader::parse_table;
    use crate::error::ChartError;

    fn bars(data: &GraphData) -> &BarDiagram {
        match &data.graph_type {
            GraphType::Bar(bar) => bar,
            GraphType::Line(_) => panic!("Expected bar diagram"),
        }
    }

    fn segments(bar: &Bar) -> Vec<(&str, f64)> {
        bar.value_params
            .iter()
            .map(|s| (s.name.as_deref().unwrap_or(""), s.value))
            .collect()
    }

    #[test]
    fn test_count_first_appearance_order() {
        let table = parse_table("color\nred\nred\nblue").unwrap();
        let data = Aggregator::default().count("color", &table).unwrap();
        let diagram = bars(&data);

        assert_eq!(diagram.values.len(), 2);
        assert_eq!(diagram.values[0].name, "red");
        assert_eq!(diagram.values[1].name, "blue");
        assert_eq!(segments(&diagram.values[0]), vec![(COUNT_LABEL, 2.0)]);
        assert_eq!(segments(&diagram.values[1]), vec![(COUNT_LABEL, 1.0)]);

        assert_eq!(data.source_name, "color");
        assert_eq!(data.value_name, COUNT_LABEL);
        assert_eq!(diagram.value_type, ValueType::Numerical);
        assert_eq!(diagram.value_range, ValueRange::new(0.0, 2.0));
        assert_eq!(diagram.value_names, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_count_missing_column() {
        let table = parse_table("color\nred").unwrap();
        let result = Aggregator::default().count("nonexistent", &table);
        assert!(matches!(result, Err(ChartError::ColumnNotFound { ref column, .. }) if column == "nonexistent"));
    }

    #[test]
    fn test_count_skips_empty_values() {
        let table = parse_table("a,color\n1,red\n2,\n3,red\n4,").unwrap();
        let data = Aggregator::default().count("color", &table).unwrap();
        let diagram = bars(&data);
        assert_eq!(diagram.values.len(), 1);
        assert_eq!(diagram.values[0].stack_height(), 2.0);
    }

    #[test]
    fn test_count_axis_rounds_up() {
        let csv = "v\n".to_string() + &"x\n".repeat(7) + "y\n";
        let table = parse_table(&csv).unwrap();
        let data = Aggregator::default().count("v", &table).unwrap();
        let diagram = bars(&data);
        assert_eq!(diagram.value_range.max, 8.0);
        assert_eq!(diagram.value_names, vec!["0", "2", "4", "6", "8"]);
    }

    #[test]
    fn test_count_empty_table() {
        let table = parse_table("color\n").unwrap();
        let data = Aggregator::default().count("color", &table).unwrap();
        let diagram = bars(&data);
        assert!(diagram.values.is_empty());
        assert_eq!(diagram.value_range, ValueRange::new(0.0, 0.0));
        assert_eq!(diagram.value_names, vec!["0"]);
    }

    #[test]
    fn test_count_colors_cycle_through_palette() {
        let palette = ColorPalette::new(vec!["#111111".to_string(), "#222222".to_string()]);
        let table = parse_table("k\na\nb\nc").unwrap();
        let data = Aggregator::new(palette).count("k", &table).unwrap();
        let colors: Vec<&str> = bars(&data)
            .values
            .iter()
            .map(|b| b.value_params[0].color.as_str())
            .collect();
        assert_eq!(colors, vec!["#111111", "#222222", "#111111"]);
    }

    #[test]
    fn test_count_by_omits_zero_segments() {
        let table = parse_table("dept,vote\nA,yes\nA,no\nA,yes\nB,yes").unwrap();
        let data = Aggregator::default().count_by("dept", "vote", &table).unwrap();
        let diagram = bars(&data);

        assert_eq!(diagram.values.len(), 2);
        assert_eq!(diagram.values[0].name, "A");
        assert_eq!(segments(&diagram.values[0]), vec![("yes", 2.0), ("no", 1.0)]);
        assert_eq!(diagram.values[1].name, "B");
        assert_eq!(segments(&diagram.values[1]), vec![("yes", 1.0)]);

        assert_eq!(diagram.value_range, ValueRange::new(0.0, 3.0));
        assert_eq!(diagram.value_names, vec!["0", "1", "2", "3"]);
        assert_eq!(data.source_name, "vote by dept");
        assert_eq!(data.value_name, COUNT_BY_LABEL);
    }

    #[test]
    fn test_count_by_colors_follow_group_index() {
        let table = parse_table("dept,vote\nA,no\nB,yes\nB,no").unwrap();
        let palette = ColorPalette::default();
        let aggregator = Aggregator::new(palette.clone());
        let data = aggregator.count_by("dept", "vote", &table).unwrap();
        let diagram = bars(&data);

        // "no" appeared first, so it is group 0 and stacks first in every bar
        let no_color = palette.get_color(0);
        let yes_color = palette.get_color(1);
        assert_eq!(segments(&diagram.values[0]), vec![("no", 1.0)]);
        assert_eq!(segments(&diagram.values[1]), vec![("no", 1.0), ("yes", 1.0)]);
        assert_eq!(diagram.values[0].value_params[0].color, no_color);
        assert_eq!(diagram.values[1].value_params[0].color, no_color);
        assert_eq!(diagram.values[1].value_params[1].color, yes_color);

        // Stable across calls
        let again = aggregator.count_by("dept", "vote", &table).unwrap();
        assert_eq!(again, data);
    }

    #[test]
    fn test_count_by_ignores_empty_cells() {
        let table = parse_table("dept,vote\nA,\n,yes\nA,yes").unwrap();
        let data = Aggregator::default().count_by("dept", "vote", &table).unwrap();
        let diagram = bars(&data);
        assert_eq!(diagram.values.len(), 1);
        assert_eq!(segments(&diagram.values[0]), vec![("yes", 1.0)]);
    }

    #[test]
    fn test_count_by_bar_without_any_group() {
        // "C" only appears with an empty vote: it keeps its bar but has no segments
        let table = parse_table("dept,vote\nC,\nA,yes").unwrap();
        let data = Aggregator::default().count_by("dept", "vote", &table).unwrap();
        let diagram = bars(&data);
        assert_eq!(diagram.values[0].name, "C");
        assert!(diagram.values[0].value_params.is_empty());
    }

    #[test]
    fn test_count_by_missing_columns() {
        let table = parse_table("dept,vote\nA,yes").unwrap();
        let aggregator = Aggregator::default();
        assert!(aggregator.count_by("dept", "nope", &table).is_err());
        assert!(aggregator.count_by("nope", "vote", &table).is_err());
    }
}
