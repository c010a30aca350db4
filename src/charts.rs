//! Renderer-independent chart models.
//!
//! Each [`ChartKind`] turns a table into a [`Chart`]: the aggregated numbers
//! plus the styling the page draws them with. Nothing here touches egui's
//! drawing API, so the aggregation can be tested without a window.

use eframe::egui::Color32;

use crate::color;
use crate::data::aggregate::{self, Bin, Estimator};
use crate::data::model::{columns, CellValue, View};
use crate::error::Result;

/// Ring width of the gender donut, as a fraction of the radius.
pub const DONUT_WIDTH: f32 = 0.3;
/// Radial offset of the first wedge, as a fraction of the radius.
pub const DONUT_EXPLODE: f32 = 0.1;
pub const TOP_OCCUPATIONS: usize = 10;

// ---------------------------------------------------------------------------
// Chart registry
// ---------------------------------------------------------------------------

/// Which table a chart is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    /// The whole dataset; built once per load.
    Unfiltered,
    /// The current filtered view; rebuilt when the selection changes.
    Filtered,
}

/// The six charts on the page, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    AgeHistogram,
    OccupationByGender,
    ZoneSales,
    TopOccupations,
    OccupationTrend,
    GenderShare,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::AgeHistogram,
        ChartKind::OccupationByGender,
        ChartKind::ZoneSales,
        ChartKind::TopOccupations,
        ChartKind::OccupationTrend,
        ChartKind::GenderShare,
    ];

    /// Every chart reads the unfiltered dataset; the sidebar only drives the
    /// tables and metric cards.
    pub fn source(self) -> ChartSource {
        match self {
            ChartKind::AgeHistogram
            | ChartKind::OccupationByGender
            | ChartKind::ZoneSales
            | ChartKind::TopOccupations
            | ChartKind::OccupationTrend
            | ChartKind::GenderShare => ChartSource::Unfiltered,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ChartKind::AgeHistogram => "age_histogram",
            ChartKind::OccupationByGender => "occupation_by_gender",
            ChartKind::ZoneSales => "zone_sales",
            ChartKind::TopOccupations => "top_occupations",
            ChartKind::OccupationTrend => "occupation_trend",
            ChartKind::GenderShare => "gender_share",
        }
    }

    pub fn build(self, view: &View<'_>) -> Result<Chart> {
        match self {
            ChartKind::AgeHistogram => age_histogram(view),
            ChartKind::OccupationByGender => occupation_by_gender(view, Estimator::Sum),
            ChartKind::ZoneSales => zone_sales(view),
            ChartKind::TopOccupations => top_occupations(view),
            ChartKind::OccupationTrend => occupation_trend(view),
            ChartKind::GenderShare => gender_share(view),
        }
    }
}

// ---------------------------------------------------------------------------
// Chart model
// ---------------------------------------------------------------------------

/// Outline drawn around bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub color: Color32,
    pub width: f32,
}

/// Which grid lines a chart draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grid {
    Off,
    /// Horizontal lines only, at the value ticks.
    Horizontal,
    Both,
}

/// Frame colours of one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color32,
    pub text: Color32,
    pub grid: Grid,
}

impl Theme {
    /// Dark grey frame, light text.
    pub const DARK: Theme = Theme {
        background: Color32::from_rgb(0x1E, 0x1E, 0x24),
        text: Color32::from_rgb(0xE6, 0xE6, 0xE6),
        grid: Grid::Off,
    };

    /// Pure black frame, white text.
    pub const BLACK: Theme = Theme {
        background: Color32::BLACK,
        text: Color32::WHITE,
        grid: Grid::Off,
    };

    pub const fn with_grid(self, grid: Grid) -> Theme {
        Theme { grid, ..self }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub color: Color32,
    /// One value per category; `None` where the combination never occurs.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
    pub color: Color32,
    /// Radial offset as a fraction of the radius.
    pub explode: f32,
}

impl Wedge {
    /// Share of the whole, one decimal: `"66.7%"`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Histogram {
        bins: Vec<Bin>,
        fill: Color32,
        edge: Edge,
    },
    GroupedBars {
        categories: Vec<String>,
        series: Vec<BarSeries>,
        legend_title: String,
    },
    Bars {
        categories: Vec<String>,
        values: Vec<f64>,
        fills: Vec<Color32>,
        edge: Option<Edge>,
    },
    Line {
        categories: Vec<String>,
        /// `[category position, value]`, sorted by position.
        points: Vec<[f64; 2]>,
        color: Color32,
    },
    Donut {
        wedges: Vec<Wedge>,
        /// Ring width as a fraction of the radius.
        width: f32,
        /// Degrees, counter-clockwise from 3 o'clock.
        start_angle: f32,
        shadow: bool,
    },
    /// The input had nothing to aggregate.
    NoData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub theme: Theme,
    /// Counter-clockwise rotation of the x tick labels, in degrees.
    pub x_label_rotation: f32,
    pub body: ChartBody,
}

impl Chart {
    fn new(kind: ChartKind, title: &str, x_label: &str, y_label: &str, theme: Theme) -> Self {
        Chart {
            kind,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            theme,
            x_label_rotation: 0.0,
            body: ChartBody::NoData,
        }
    }

    fn rotated(mut self, degrees: f32) -> Self {
        self.x_label_rotation = degrees;
        self
    }

    fn with_body(mut self, body: ChartBody) -> Self {
        self.body = body;
        self
    }

    pub fn has_data(&self) -> bool {
        !matches!(self.body, ChartBody::NoData)
    }
}

fn labels<'a>(keys: impl Iterator<Item = &'a CellValue>) -> Vec<String> {
    keys.map(|k| k.to_string()).collect()
}

// ---------------------------------------------------------------------------
// The six renderers
// ---------------------------------------------------------------------------

/// Chart 1: distribution of customer ages.
pub fn age_histogram(view: &View<'_>) -> Result<Chart> {
    let ages = view.numeric(columns::AGE)?;
    let chart = Chart::new(ChartKind::AgeHistogram, "", "Age", "Count", Theme::DARK);
    if ages.is_empty() {
        return Ok(chart);
    }
    Ok(chart.with_body(ChartBody::Histogram {
        bins: aggregate::histogram(&ages),
        fill: color::LIGHT_SEA_GREEN,
        edge: Edge {
            color: Color32::BLACK,
            width: 2.0,
        },
    }))
}

/// Chart 2: amount per occupation, one bar per gender.
pub fn occupation_by_gender(view: &View<'_>, estimator: Estimator) -> Result<Chart> {
    let pivot = aggregate::group_pivot(
        view,
        columns::OCCUPATION,
        columns::GENDER,
        columns::AMOUNT,
        estimator,
    )?;
    let chart = Chart::new(
        ChartKind::OccupationByGender,
        "Occupation-wise Amount by Gender",
        "Occupation",
        "Amount",
        Theme::BLACK.with_grid(Grid::Horizontal),
    );
    if pivot.is_empty() {
        return Ok(chart);
    }

    let colors = color::take_palette(&[color::HOT_PINK, color::DEEP_SKY_BLUE], pivot.inner.len());
    let series = pivot
        .inner
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(j, (name, color))| BarSeries {
            name: name.to_string(),
            color,
            values: (0..pivot.outer.len()).map(|i| pivot.get(i, j)).collect(),
        })
        .collect();

    Ok(chart.with_body(ChartBody::GroupedBars {
        categories: labels(pivot.outer.iter()),
        series,
        legend_title: "Gender".to_string(),
    }))
}

/// Chart 3: total amount per zone, largest first.
pub fn zone_sales(view: &View<'_>) -> Result<Chart> {
    let zones = aggregate::group_sum(view, columns::ZONE, columns::AMOUNT)?
        .sorted_desc()
        .map_values(f64::trunc);
    let chart = Chart::new(ChartKind::ZoneSales, "Zone wise Sale", "Zone", "Amount", Theme::BLACK)
        .rotated(45.0);
    if zones.is_empty() {
        return Ok(chart);
    }
    Ok(chart.with_body(ChartBody::Bars {
        categories: labels(zones.keys()),
        values: zones.entries.iter().map(|(_, v)| *v).collect(),
        fills: vec![color::DEEP_PINK; zones.len()],
        edge: Some(Edge {
            color: Color32::RED,
            width: 1.0,
        }),
    }))
}

/// Chart 4: the ten occupations with the highest total amount.
pub fn top_occupations(view: &View<'_>) -> Result<Chart> {
    let top = aggregate::group_sum(view, columns::OCCUPATION, columns::AMOUNT)?
        .sorted_desc()
        .top(TOP_OCCUPATIONS)
        .map_values(|v| (v * 100.0).round_ties_even() / 100.0);
    let chart = Chart::new(
        ChartKind::TopOccupations,
        "Top 10 Occupations",
        "Occupation",
        "Amount",
        Theme::DARK,
    )
    .rotated(45.0);
    if top.is_empty() {
        return Ok(chart);
    }
    Ok(chart.with_body(ChartBody::Bars {
        categories: labels(top.keys()),
        values: top.entries.iter().map(|(_, v)| *v).collect(),
        fills: color::viridis(top.len()),
        edge: None,
    }))
}

/// Chart 5: every row's amount plotted against its occupation.
pub fn occupation_trend(view: &View<'_>) -> Result<Chart> {
    let occupations: Vec<&CellValue> = view.column(columns::OCCUPATION)?.collect();
    let amounts: Vec<Option<f64>> = view.column(columns::AMOUNT)?.map(CellValue::as_f64).collect();
    let chart = Chart::new(
        ChartKind::OccupationTrend,
        "Occupation-wise Sales",
        "Occupation",
        "Amount",
        Theme::DARK.with_grid(Grid::Both),
    )
    .rotated(45.0);

    let mut categories: Vec<&CellValue> = Vec::new();
    let mut points: Vec<[f64; 2]> = Vec::new();
    for (occupation, amount) in occupations.into_iter().zip(amounts) {
        let Some(amount) = amount else {
            continue;
        };
        if occupation.is_null() {
            continue;
        }
        let pos = match categories.iter().position(|c| *c == occupation) {
            Some(pos) => pos,
            None => {
                categories.push(occupation);
                categories.len() - 1
            }
        };
        points.push([pos as f64, amount]);
    }
    if points.is_empty() {
        return Ok(chart);
    }
    points.sort_by(|a, b| a[0].total_cmp(&b[0]));

    Ok(chart.with_body(ChartBody::Line {
        categories: labels(categories.into_iter()),
        points,
        color: Color32::RED,
    }))
}

/// Chart 6: share of records per gender.
pub fn gender_share(view: &View<'_>) -> Result<Chart> {
    let counts = aggregate::value_counts(view, columns::GENDER)?;
    let chart = Chart::new(ChartKind::GenderShare, "", "", "", Theme::BLACK);
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Ok(chart);
    }

    let colors = color::take_palette(&color::SET2, counts.len());
    let wedges = counts
        .into_iter()
        .zip(colors)
        .enumerate()
        .map(|(i, ((value, count), color))| Wedge {
            label: value.to_string(),
            count,
            fraction: count as f64 / total as f64,
            color,
            explode: if i == 0 { DONUT_EXPLODE } else { 0.0 },
        })
        .collect();

    Ok(chart.with_body(ChartBody::Donut {
        wedges,
        width: DONUT_WIDTH,
        start_angle: 90.0,
        shadow: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, Record};
    use crate::error::DashboardError;

    fn dataset(rows: &[(&str, &str, &str, i64, f64)]) -> Dataset {
        Dataset::from_records(
            ["Zone", "Occupation", "Gender", "Age", "Amount"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows.iter()
                .map(|&(z, o, g, age, amount)| {
                    Record::new(vec![z.into(), o.into(), g.into(), age.into(), amount.into()])
                })
                .collect(),
        )
    }

    fn sample() -> Dataset {
        dataset(&[
            ("Western", "IT Sector", "M", 28, 1000.0),
            ("Southern", "Banking", "F", 35, 2500.0),
            ("Western", "Banking", "F", 41, 700.5),
            ("Central", "IT Sector", "M", 22, 300.0),
        ])
    }

    #[test]
    fn all_charts_read_the_unfiltered_table() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.source(), ChartSource::Unfiltered, "{kind:?}");
        }
    }

    #[test]
    fn every_chart_builds_from_sample() {
        let ds = sample();
        let view = ds.full_view();
        for kind in ChartKind::ALL {
            let chart = kind.build(&view).unwrap();
            assert_eq!(chart.kind, kind);
            assert!(chart.has_data(), "{kind:?}");
        }
    }

    #[test]
    fn empty_table_degrades_to_no_data() {
        let ds = dataset(&[]);
        let view = ds.full_view();
        for kind in ChartKind::ALL {
            let chart = kind.build(&view).unwrap();
            assert_eq!(chart.body, ChartBody::NoData, "{kind:?}");
        }
    }

    #[test]
    fn missing_zone_fails_only_the_zone_chart() {
        let ds = Dataset::from_records(
            vec!["Occupation".into(), "Gender".into(), "Age".into(), "Amount".into()],
            vec![Record::new(vec!["IT".into(), "M".into(), 30i64.into(), 10.0f64.into()])],
        );
        let view = ds.full_view();
        let err = ChartKind::ZoneSales.build(&view).unwrap_err();
        assert!(matches!(err, DashboardError::ColumnNotFound(c) if c == "Zone"));
        assert!(ChartKind::GenderShare.build(&view).is_ok());
    }

    #[test]
    fn zone_bars_are_sorted_and_integral() {
        let ds = sample();
        let chart = zone_sales(&ds.full_view()).unwrap();
        let ChartBody::Bars { categories, values, .. } = chart.body else {
            panic!("expected bars");
        };
        assert_eq!(categories, vec!["Southern", "Western", "Central"]);
        assert_eq!(values, vec![2500.0, 1700.0, 300.0]);
        assert_eq!(chart.x_label_rotation, 45.0);
    }

    #[test]
    fn top_occupations_are_capped_at_ten() {
        let names: Vec<String> = (0..12).map(|i| format!("Job{i:02}")).collect();
        let rows: Vec<(&str, &str, &str, i64, f64)> = names
            .iter()
            .enumerate()
            .map(|(i, n)| ("Western", n.as_str(), "F", 30, 100.0 * (i + 1) as f64))
            .collect();
        let ds = dataset(&rows);
        let chart = top_occupations(&ds.full_view()).unwrap();
        let ChartBody::Bars { categories, values, fills, .. } = chart.body else {
            panic!("expected bars");
        };
        assert_eq!(categories.len(), 10);
        assert_eq!(fills.len(), 10);
        assert_eq!(categories[0], "Job11");
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn occupation_totals_round_halves_to_even() {
        let ds = dataset(&[
            ("Western", "Lawyer", "F", 30, 100.0),
            ("Western", "Lawyer", "M", 30, 0.125),
        ]);
        let chart = top_occupations(&ds.full_view()).unwrap();
        let ChartBody::Bars { values, .. } = chart.body else {
            panic!("expected bars");
        };
        assert_eq!(values, vec![100.12]);
    }

    #[test]
    fn grouped_bars_have_one_series_per_gender() {
        let ds = sample();
        let chart = occupation_by_gender(&ds.full_view(), Estimator::Sum).unwrap();
        let ChartBody::GroupedBars { categories, series, legend_title } = chart.body else {
            panic!("expected grouped bars");
        };
        assert_eq!(categories, vec!["IT Sector", "Banking"]);
        assert_eq!(legend_title, "Gender");
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].name, "M");
        assert_eq!(series[0].color, color::HOT_PINK);
        assert_eq!(series[0].values, vec![Some(1300.0), None]);
        assert_eq!(series[1].values, vec![None, Some(3200.5)]);
    }

    #[test]
    fn trend_points_are_grouped_by_category_position() {
        let ds = sample();
        let chart = occupation_trend(&ds.full_view()).unwrap();
        let ChartBody::Line { categories, points, .. } = chart.body else {
            panic!("expected line");
        };
        assert_eq!(categories, vec!["IT Sector", "Banking"]);
        assert_eq!(
            points,
            vec![[0.0, 1000.0], [0.0, 300.0], [1.0, 2500.0], [1.0, 700.5]]
        );
    }

    #[test]
    fn donut_percentages() {
        let ds = dataset(&[
            ("Western", "IT", "M", 30, 1.0),
            ("Western", "IT", "M", 30, 1.0),
            ("Western", "IT", "F", 30, 1.0),
        ]);
        let chart = gender_share(&ds.full_view()).unwrap();
        let ChartBody::Donut { wedges, width, .. } = chart.body else {
            panic!("expected donut");
        };
        assert_eq!(width, DONUT_WIDTH);
        let labels: Vec<_> = wedges.iter().map(|w| (w.label.as_str(), w.count)).collect();
        assert_eq!(labels, vec![("M", 2), ("F", 1)]);
        assert_eq!(wedges[0].percent_label(), "66.7%");
        assert_eq!(wedges[1].percent_label(), "33.3%");
        assert_eq!(wedges[0].explode, DONUT_EXPLODE);
        assert_eq!(wedges[1].explode, 0.0);
    }

    #[test]
    fn histogram_counts_every_age() {
        let ds = sample();
        let chart = age_histogram(&ds.full_view()).unwrap();
        let ChartBody::Histogram { bins, fill, .. } = chart.body else {
            panic!("expected histogram");
        };
        assert_eq!(fill, color::LIGHT_SEA_GREEN);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
    }
}
