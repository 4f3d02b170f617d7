use crate::aggregate::correlation::{correlation_matrix, CorrelationMatrix};
use crate::aggregate::monthly::{monthly_means, MonthlyMeans};
use crate::aggregate::seasonal::{seasonal_means, SeasonalMeans};
use crate::chart::{self, Heatmap, PanelGrid};
use crate::data::filter::in_year;
use crate::data::model::Dataset;

/// Everything the central panel shows for one selected year.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub year: i32,
    /// Rows of the dataset falling in `year`.
    pub year_rows: usize,
    pub monthly: MonthlyMeans,
    /// Over the whole dataset, not just `year`.
    pub correlation: CorrelationMatrix,
    pub seasonal: SeasonalMeans,
    pub monthly_chart: PanelGrid,
    pub heatmap: Heatmap,
    pub seasonal_chart: PanelGrid,
}

impl DashboardView {
    /// Run filter → aggregate → chart for `year`. Pure: the same dataset and
    /// year always give an identical view.
    pub fn compute(dataset: &Dataset, year: i32) -> Self {
        let year_rows = in_year(dataset.sorted(), year).count();
        if year_rows == 0 {
            log::warn!("No observations in {year}; charts will be empty");
        }

        let monthly = monthly_means(dataset.sorted(), year);
        let seasonal = seasonal_means(dataset.sorted(), year);
        let correlation = correlation_matrix(&dataset.records);

        log::debug!(
            "Computed view for {year}: {year_rows} rows, {} monthly groups, {} seasonal groups",
            monthly.rows.len(),
            seasonal.rows.len()
        );

        DashboardView {
            year,
            year_rows,
            monthly_chart: chart::monthly_trend_grid(&monthly),
            heatmap: chart::correlation_heatmap(&correlation),
            seasonal_chart: chart::seasonal_grid(&seasonal),
            monthly,
            correlation,
            seasonal,
        }
    }
}
