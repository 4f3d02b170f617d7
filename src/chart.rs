use crate::aggregate::correlation::CorrelationMatrix;
use crate::aggregate::monthly::MonthlyMeans;
use crate::aggregate::seasonal::{Season, SeasonalMeans};
use crate::data::model::Pollutant;

// ---------------------------------------------------------------------------
// Chart models: what to draw, independent of the UI toolkit
// ---------------------------------------------------------------------------

/// One line (plus markers) in a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Station name, used for the legend and the colour lookup.
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Categorical x-axis labels at integer positions.
    pub x_ticks: Vec<(f64, String)>,
    pub series: Vec<Series>,
}

/// Panels laid out row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelGrid {
    pub rows: usize,
    pub cols: usize,
    pub panels: Vec<LinePanel>,
}

impl PanelGrid {
    pub fn row(&self, r: usize) -> &[LinePanel] {
        let start = (r * self.cols).min(self.panels.len());
        let end = (start + self.cols).min(self.panels.len());
        &self.panels[start..end]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub title: String,
    pub labels: Vec<String>,
    /// Row-major cell values; `None` is drawn as an empty grey cell.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl Heatmap {
    /// Text written inside a cell.
    pub fn annotation(&self, row: usize, col: usize) -> Option<String> {
        self.cells[row][col].map(|v| format!("{v:.2}"))
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// 3 × 2 grid: one panel per pollutant, x = month, one series per station.
pub fn monthly_trend_grid(monthly: &MonthlyMeans) -> PanelGrid {
    let x_ticks: Vec<(f64, String)> = (1..=12).map(|m| (m as f64, m.to_string())).collect();
    let stations = monthly.stations();

    let panels = Pollutant::ALL
        .iter()
        .map(|&p| LinePanel {
            title: format!("{} monthly trend", p.label()),
            x_label: "Month".to_string(),
            y_label: format!("{} concentration", p.label()),
            x_ticks: x_ticks.clone(),
            series: stations
                .iter()
                .map(|&station| Series {
                    name: station.to_string(),
                    points: monthly
                        .series(station, p)
                        .into_iter()
                        .map(|(month, v)| [month as f64, v])
                        .collect(),
                })
                .collect(),
        })
        .collect();

    PanelGrid {
        rows: 3,
        cols: 2,
        panels,
    }
}

/// 2 × 3 grid: one panel per pollutant, x = season (Spring..Winter at 0..3).
pub fn seasonal_grid(seasonal: &SeasonalMeans) -> PanelGrid {
    let x_ticks: Vec<(f64, String)> = Season::ALL
        .iter()
        .map(|s| (s.index() as f64, s.label().to_string()))
        .collect();
    let stations = seasonal.stations();

    let panels = Pollutant::ALL
        .iter()
        .map(|&p| LinePanel {
            title: format!("{} average per season", p.label()),
            x_label: "Season".to_string(),
            y_label: "Concentration".to_string(),
            x_ticks: x_ticks.clone(),
            series: stations
                .iter()
                .map(|&station| Series {
                    name: station.to_string(),
                    points: seasonal
                        .series(station, p)
                        .into_iter()
                        .map(|(season, v)| [season.index() as f64, v])
                        .collect(),
                })
                .collect(),
        })
        .collect();

    PanelGrid {
        rows: 2,
        cols: 3,
        panels,
    }
}

pub fn correlation_heatmap(matrix: &CorrelationMatrix) -> Heatmap {
    Heatmap {
        title: "Correlation heatmap of pollutants and weather parameters".to_string(),
        labels: matrix.labels().iter().map(|l| l.to_string()).collect(),
        cells: (0..matrix.size())
            .map(|row| (0..matrix.size()).map(|col| matrix.get(row, col)).collect())
            .collect(),
    }
}
