//! Chart configurations in the shape the charting library consumes.
//!
//! `render_aggregate_chart` is the single renderer behind every chart on the
//! site: it shapes one [`StatAggregate`] into a bar, line or doughnut config and
//! hands it to a [`ChartBackend`].

use serde::Serialize;
use tracing::debug;

use crate::dom::{Document, NodeId};
use crate::models::StatAggregate;

/// Fixed palette, assigned by label index and cycled.
pub const PALETTE: [&str; 7] = [
    "#42a5f5", "#66bb6a", "#ffa726", "#ef5350", "#ab47bc", "#26c6da", "#d4e157",
];

pub const UNKNOWN_CATEGORY_COLOR: &str = "#90caf9";

const LINE_COLOR: &str = "#42a5f5";
const LINE_FILL: &str = "rgba(66,165,245,0.15)";
const GRID_COLOR: &str = "#333";
const TITLE_COLOR: &str = "#e0e0e0";
const LEGEND_COLOR: &str = "#ccc";

/// Bar label sets longer than this get rotated x ticks.
const LONG_LABEL_SET: usize = 7;
const ROTATION_DEGREES: u32 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
}

/// How each label gets its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorStrategy {
    Palette,
    Category,
    Uniform(&'static str),
}

impl ColorStrategy {
    pub fn color_for(self, index: usize, label: &str) -> &'static str {
        match self {
            ColorStrategy::Palette => PALETTE[index % PALETTE.len()],
            ColorStrategy::Category => category_color(label),
            ColorStrategy::Uniform(color) => color,
        }
    }
}

pub fn category_color(label: &str) -> &'static str {
    match label {
        "BJJ" => "#42a5f5",
        "THAIBOXNING" => "#ef5350",
        "BOXNING" => "#ffa726",
        "FYS" => "#66bb6a",
        "SPARRING" => "#ab47bc",
        _ => UNKNOWN_CATEGORY_COLOR,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub title: Option<String>,
    pub dataset_label: Option<String>,
    pub colors: ColorStrategy,
    pub tick_color: &'static str,
    pub bar_radius: u32,
    pub max_label_rotation: Option<u32>,
    pub maintain_aspect_ratio: bool,
    pub border_width: Option<u32>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: None,
            dataset_label: None,
            colors: ColorStrategy::Palette,
            tick_color: "#aaa",
            bar_radius: 6,
            max_label_rotation: None,
            maintain_aspect_ratio: true,
            border_width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One color for the whole dataset, or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    One(String),
    Each(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<u64>,
    pub background_color: Paint,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintain_aspect_ratio: Option<bool>,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<TextColor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextColor {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    pub ticks: Ticks,
    pub grid: Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rotation: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The charting capability: construct a chart of a kind, bound to a mount element.
pub trait ChartBackend {
    fn construct(&mut self, mount: NodeId, config: ChartConfig);
}

/// Keeps every constructed chart in construction order.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub charts: Vec<(NodeId, ChartConfig)>,
}

impl ChartBackend for RecordingBackend {
    fn construct(&mut self, mount: NodeId, config: ChartConfig) {
        self.charts.push((mount, config));
    }
}

/// Shapes an aggregate into a chart config. `None` when the aggregate is empty.
pub fn build_chart_config(
    aggregate: &StatAggregate,
    kind: ChartKind,
    style: &ChartStyle,
) -> Option<ChartConfig> {
    if aggregate.is_empty() {
        return None;
    }

    let labels = aggregate.labels();
    let colors: Vec<String> = labels
        .iter()
        .enumerate()
        .map(|(index, label)| style.colors.color_for(index, label).to_string())
        .collect();

    let dataset = match kind {
        ChartKind::Bar => Dataset {
            label: style.dataset_label.clone(),
            data: aggregate.values(),
            background_color: match style.colors {
                ColorStrategy::Uniform(color) => Paint::One(color.to_string()),
                _ => Paint::Each(colors),
            },
            border_color: None,
            border_radius: Some(style.bar_radius),
            border_width: style.border_width,
            fill: None,
            tension: None,
            point_radius: None,
        },
        ChartKind::Line => Dataset {
            label: style.dataset_label.clone(),
            data: aggregate.values(),
            background_color: Paint::One(LINE_FILL.to_string()),
            border_color: Some(LINE_COLOR.to_string()),
            border_radius: None,
            border_width: style.border_width,
            fill: Some(true),
            tension: Some(0.3),
            point_radius: Some(4),
        },
        ChartKind::Doughnut => Dataset {
            label: style.dataset_label.clone(),
            data: aggregate.values(),
            background_color: Paint::Each(colors),
            border_color: None,
            border_radius: None,
            border_width: style.border_width,
            fill: None,
            tension: None,
            point_radius: None,
        },
    };

    let legend = match kind {
        ChartKind::Doughnut => Legend {
            display: None,
            position: Some("bottom".to_string()),
            labels: Some(TextColor {
                color: LEGEND_COLOR.to_string(),
            }),
        },
        ChartKind::Bar | ChartKind::Line => Legend {
            display: Some(false),
            position: None,
            labels: None,
        },
    };

    let scales = match kind {
        ChartKind::Doughnut => None,
        ChartKind::Bar | ChartKind::Line => {
            let rotation = match kind {
                ChartKind::Bar => style
                    .max_label_rotation
                    .or((labels.len() > LONG_LABEL_SET).then_some(ROTATION_DEGREES)),
                _ => style.max_label_rotation,
            };
            Some(Scales {
                x: Axis {
                    begin_at_zero: None,
                    ticks: Ticks {
                        color: style.tick_color.to_string(),
                        step_size: None,
                        max_rotation: rotation,
                    },
                    grid: Grid {
                        display: Some(false),
                        color: None,
                    },
                },
                y: Axis {
                    begin_at_zero: Some(true),
                    ticks: Ticks {
                        color: style.tick_color.to_string(),
                        step_size: Some(1),
                        max_rotation: None,
                    },
                    grid: Grid {
                        display: None,
                        color: Some(GRID_COLOR.to_string()),
                    },
                },
            })
        }
    };

    Some(ChartConfig {
        kind,
        data: ChartData {
            labels,
            datasets: vec![dataset],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: (!style.maintain_aspect_ratio).then_some(false),
            plugins: Plugins {
                legend,
                title: style.title.as_ref().map(|text| Title {
                    display: true,
                    text: text.clone(),
                    color: TITLE_COLOR.to_string(),
                }),
            },
            scales,
        },
    })
}

/// Renders one aggregate into the element `container_id`.
///
/// Every missing piece (charting capability, mount element, aggregate, data)
/// turns the call into a no-op. Returns the config that was handed to the backend.
pub fn render_aggregate_chart(
    doc: &Document,
    backend: Option<&mut dyn ChartBackend>,
    container_id: &str,
    aggregate: Option<&StatAggregate>,
    kind: ChartKind,
    style: &ChartStyle,
) -> Option<ChartConfig> {
    let Some(backend) = backend else {
        debug!("charting library unavailable, skipping #{container_id}");
        return None;
    };
    let Some(mount) = doc.get_element_by_id(container_id) else {
        debug!("no #{container_id} on page, skipping chart");
        return None;
    };
    let Some(config) = aggregate.and_then(|aggregate| build_chart_config(aggregate, kind, style))
    else {
        debug!("no data for #{container_id}, skipping chart");
        return None;
    };

    backend.construct(mount, config.clone());
    Some(config)
}
