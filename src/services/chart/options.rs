use serde::{Deserialize, Serialize};

use crate::models::{AxisSelection, ChartType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: Plugins,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plugins {
    pub title: Title,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    fn shown(text: impl Into<String>) -> Self {
        Self {
            display: true,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub position: LegendPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub scale_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
}

/// Rendering options matching a series built for the same selection.
pub fn build_options(x_axis: &AxisSelection, y_axis: &AxisSelection, chart_type: ChartType) -> ChartOptions {
    let x_label = x_axis.display_label();
    let y_label = y_axis.display_label();

    let (legend, scales) = match chart_type {
        ChartType::Pie => (LegendPosition::Right, None),
        ChartType::Scatter => (
            LegendPosition::Top,
            Some(Scales {
                x: Axis {
                    scale_type: Some("linear".to_string()),
                    position: Some("bottom".to_string()),
                    ..Axis::default()
                },
                y: Axis::default(),
            }),
        ),
        ChartType::Bar | ChartType::Line | ChartType::Area => (
            LegendPosition::Top,
            Some(Scales {
                x: Axis {
                    title: Some(Title::shown(x_label)),
                    ..Axis::default()
                },
                y: Axis {
                    title: Some(Title::shown(y_label)),
                    begin_at_zero: Some(true),
                    ..Axis::default()
                },
            }),
        ),
    };

    ChartOptions {
        responsive: true,
        plugins: Plugins {
            title: Title::shown(format!("{} vs {}", y_label, x_label)),
            legend: Legend { position: legend },
        },
        scales,
    }
}
