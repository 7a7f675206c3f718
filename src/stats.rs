use crate::charts::{
    ChartBackend, ChartKind, ChartStyle, ColorStrategy, build_chart_config, render_aggregate_chart,
};
use crate::dom::Document;
use crate::models::{ChartMount, EmbeddedData, StatAggregate};

/// Every chart the site draws, identified by the aggregate it plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    AdminByDay,
    AdminByCategory,
    AdminOverTime,
    TrainerPerClass,
    TrainerWeekly,
    StatsCategory,
    StatsMonthly,
}

impl ChartSource {
    pub const ALL: [ChartSource; 7] = [
        ChartSource::AdminByDay,
        ChartSource::AdminByCategory,
        ChartSource::AdminOverTime,
        ChartSource::TrainerPerClass,
        ChartSource::TrainerWeekly,
        ChartSource::StatsCategory,
        ChartSource::StatsMonthly,
    ];

    pub fn mount_id(self) -> &'static str {
        match self {
            ChartSource::AdminByDay => "adminDayChart",
            ChartSource::AdminByCategory => "adminCatChart",
            ChartSource::AdminOverTime => "adminTimeChart",
            ChartSource::TrainerPerClass => "trainerBookingsChart",
            ChartSource::TrainerWeekly => "trainerWeeklyChart",
            ChartSource::StatsCategory => "categoryChart",
            ChartSource::StatsMonthly => "monthlyChart",
        }
    }

    pub fn kind(self) -> ChartKind {
        match self {
            ChartSource::AdminByDay | ChartSource::TrainerPerClass | ChartSource::StatsMonthly => {
                ChartKind::Bar
            }
            ChartSource::AdminByCategory | ChartSource::StatsCategory => ChartKind::Doughnut,
            ChartSource::AdminOverTime | ChartSource::TrainerWeekly => ChartKind::Line,
        }
    }

    pub fn aggregate(self, data: &EmbeddedData) -> Option<&StatAggregate> {
        match self {
            ChartSource::AdminByDay => data.admin_stats.as_ref()?.bookings_by_day.as_ref(),
            ChartSource::AdminByCategory => {
                data.admin_stats.as_ref()?.bookings_by_category.as_ref()
            }
            ChartSource::AdminOverTime => data.admin_stats.as_ref()?.bookings_over_time.as_ref(),
            ChartSource::TrainerPerClass => {
                data.trainer_stats.as_ref()?.bookings_per_class.as_ref()
            }
            ChartSource::TrainerWeekly => data.trainer_stats.as_ref()?.weekly_attendance.as_ref(),
            ChartSource::StatsCategory => data.stats_data.as_ref()?.category_breakdown.as_ref(),
            ChartSource::StatsMonthly => data.stats_data.as_ref()?.monthly_trend.as_ref(),
        }
    }

    pub fn style(self) -> ChartStyle {
        let titled = |title: &str, label: Option<&str>| ChartStyle {
            title: Some(title.to_string()),
            dataset_label: label.map(str::to_string),
            ..ChartStyle::default()
        };
        // The general stats page sizes its canvases in CSS.
        let stats_page = ChartStyle {
            tick_color: "#999",
            maintain_aspect_ratio: false,
            ..ChartStyle::default()
        };

        match self {
            ChartSource::AdminByDay => titled("Bokningar per veckodag", Some("Bokningar per dag")),
            ChartSource::AdminByCategory => titled("Bokningar per kategori", None),
            ChartSource::AdminOverTime => titled("Bokningar över tid", Some("Bokningar")),
            ChartSource::TrainerPerClass => ChartStyle {
                max_label_rotation: Some(45),
                ..titled("Bokningar per pass", Some("Bokningar"))
            },
            ChartSource::TrainerWeekly => titled("Veckovis trend", Some("Bokningar per vecka")),
            ChartSource::StatsCategory => ChartStyle {
                colors: ColorStrategy::Category,
                border_width: Some(0),
                ..stats_page
            },
            ChartSource::StatsMonthly => ChartStyle {
                dataset_label: Some("Pass per månad".to_string()),
                colors: ColorStrategy::Uniform("#1565c0"),
                bar_radius: 4,
                ..stats_page
            },
        }
    }
}

/// Chart configs for every non-empty aggregate, in page order.
pub fn build_charts(data: &EmbeddedData) -> Vec<ChartMount> {
    ChartSource::ALL
        .into_iter()
        .filter_map(|source| {
            let aggregate = source.aggregate(data)?;
            let config = build_chart_config(aggregate, source.kind(), &source.style())?;
            Some(ChartMount {
                mount_id: source.mount_id().to_string(),
                config,
            })
        })
        .collect()
}

/// Draws every chart whose mount element and data are present. Returns how many were drawn.
pub fn render_charts(
    doc: &Document,
    mut backend: Option<&mut dyn ChartBackend>,
    data: &EmbeddedData,
) -> usize {
    let mut drawn = 0;
    for source in ChartSource::ALL {
        let backend = backend.as_mut().map(|b| &mut **b as &mut dyn ChartBackend);
        let config = render_aggregate_chart(
            doc,
            backend,
            source.mount_id(),
            source.aggregate(data),
            source.kind(),
            &source.style(),
        );
        if config.is_some() {
            drawn += 1;
        }
    }
    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{Paint, RecordingBackend};
    use crate::dom::Element;
    use crate::models::{AdminStats, GeneralStats, TrainerStats};

    fn admin_data() -> EmbeddedData {
        EmbeddedData {
            admin_stats: Some(AdminStats {
                bookings_by_day: Some(
                    [("Monday", 3), ("Tuesday", 0), ("Wednesday", 5)]
                        .into_iter()
                        .collect(),
                ),
                bookings_by_category: Some(StatAggregate::default()),
                bookings_over_time: None,
            }),
            ..EmbeddedData::default()
        }
    }

    #[test]
    fn build_charts_skips_empty_and_missing_aggregates() {
        let charts = build_charts(&admin_data());
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].mount_id, "adminDayChart");
        assert_eq!(charts[0].config.kind, ChartKind::Bar);
    }

    #[test]
    fn monthly_trend_is_single_colored() {
        let data = EmbeddedData {
            stats_data: Some(GeneralStats {
                category_breakdown: None,
                monthly_trend: Some([("2025-01", 7), ("2025-02", 9)].into_iter().collect()),
            }),
            ..EmbeddedData::default()
        };
        let charts = build_charts(&data);
        let dataset = &charts[0].config.data.datasets[0];
        assert_eq!(dataset.background_color, Paint::One("#1565c0".to_string()));
        assert_eq!(dataset.border_radius, Some(4));
        assert_eq!(charts[0].config.options.maintain_aspect_ratio, Some(false));
    }

    #[test]
    fn every_axis_chart_counts_in_whole_bookings() {
        let aggregate: StatAggregate = [("2025-01", 1), ("2025-02", 2)].into_iter().collect();
        let data = EmbeddedData {
            admin_stats: Some(AdminStats {
                bookings_by_day: Some(aggregate.clone()),
                bookings_by_category: Some(aggregate.clone()),
                bookings_over_time: Some(aggregate.clone()),
            }),
            trainer_stats: Some(TrainerStats {
                bookings_per_class: Some(aggregate.clone()),
                weekly_attendance: Some(aggregate.clone()),
            }),
            stats_data: Some(GeneralStats {
                category_breakdown: Some(aggregate.clone()),
                monthly_trend: Some(aggregate),
            }),
        };

        let charts = build_charts(&data);
        assert_eq!(charts.len(), ChartSource::ALL.len());
        for (source, chart) in ChartSource::ALL.into_iter().zip(&charts) {
            if source.kind() == ChartKind::Doughnut {
                assert!(chart.config.options.scales.is_none());
                continue;
            }
            let scales = chart.config.options.scales.as_ref().unwrap();
            assert_eq!(scales.y.ticks.step_size, Some(1), "{}", chart.mount_id);
            assert_eq!(scales.y.begin_at_zero, Some(true), "{}", chart.mount_id);
        }
    }

    #[test]
    fn render_charts_needs_mount_elements() {
        let mut doc = Document::new();
        let root = doc.root();
        let mut backend = RecordingBackend::default();
        let data = admin_data();

        assert_eq!(render_charts(&doc, Some(&mut backend), &data), 0);

        doc.append(root, Element::new("canvas").with_id("adminDayChart"));
        doc.append(root, Element::new("canvas").with_id("adminCatChart"));
        assert_eq!(render_charts(&doc, Some(&mut backend), &data), 1);
        assert_eq!(backend.charts.len(), 1);
        assert_eq!(render_charts(&doc, None, &data), 0);
    }
}
