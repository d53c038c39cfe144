use crate::models::chart::{
    AxisLabels, AxisTitle, ChartOptions, ChartSpec, CountrySeries, HoverState, MenuItemStyle,
    Navigation, PlotOptions, SeriesEntry, SplineOptions, States, Style, Text, XAxis, YAxis,
};

pub const TITLE: &str = "COVID-19 confirmed cases relative to population";
pub const SUBTITLE: &str =
    "Source: Johns Hopkins University Center for Systems Science and Engineering";

/// Highcharts spline configuration around the assembled series. `scale_label`
/// names the per-capita unit (`1M` for rates per million people).
pub fn build(series: Vec<CountrySeries>, scale_label: &str) -> ChartSpec {
    let axis_style = Style {
        color: "blue".to_string(),
    };

    ChartSpec {
        chart: ChartOptions {
            chart_type: "spline".to_string(),
            border_color: "#9DB0AC".to_string(),
            border_width: 3,
        },
        title: Text {
            text: TITLE.to_string(),
        },
        subtitle: Text {
            text: SUBTITLE.to_string(),
        },
        x_axis: XAxis {
            axis_type: "datetime".to_string(),
        },
        y_axis: vec![YAxis {
            labels: AxisLabels {
                format: format!("{{value}} cases per {} people", scale_label),
                style: axis_style.clone(),
            },
            title: AxisTitle {
                text: "Cumulative rate".to_string(),
                style: axis_style,
            },
        }],
        plot_options: PlotOptions {
            spline: SplineOptions {
                line_width: 3,
                states: States {
                    hover: HoverState { line_width: 5 },
                },
            },
        },
        series: series
            .into_iter()
            .map(|entry| SeriesEntry {
                name: entry.country,
                data: entry.series,
            })
            .collect(),
        navigation: Navigation {
            menu_item_style: MenuItemStyle {
                font_size: "10px".to_string(),
            },
        },
    }
}

pub fn to_json(chart: &ChartSpec) -> Result<String, serde_json::Error> {
    serde_json::to_string(chart)
}
