use std::collections::BTreeMap;

use chrono::Datelike;

use super::{MeanAccumulator, PollutantMeans, StationIndex};
use crate::data::filter::in_year;
use crate::data::model::{Observation, Pollutant};

/// One (month, station) group of the selected year.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyRow {
    /// Calendar month, 1–12.
    pub month: u32,
    pub station: String,
    pub means: PollutantMeans,
}

/// Monthly pollutant means, ordered by month then station first appearance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyMeans {
    pub rows: Vec<MonthlyRow>,
}

impl MonthlyMeans {
    /// Distinct stations in row order.
    pub fn stations(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !out.contains(&row.station.as_str()) {
                out.push(&row.station);
            }
        }
        out
    }

    /// `(month, mean)` points of one station, skipping months without data.
    pub fn series(&self, station: &str, pollutant: Pollutant) -> Vec<(u32, f64)> {
        self.rows
            .iter()
            .filter(|r| r.station == station)
            .filter_map(|r| r.means.get(pollutant).map(|v| (r.month, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Mean of every pollutant per (month, station) among the rows of `year`.
/// Only pairs that occur in the filtered rows produce an output row.
pub fn monthly_means<'a, I>(records: I, year: i32) -> MonthlyMeans
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut stations = StationIndex::default();
    let mut groups: BTreeMap<(u32, usize), MeanAccumulator> = BTreeMap::new();

    for obs in in_year(records, year) {
        let key = (obs.datetime.month(), stations.position(&obs.station));
        groups.entry(key).or_default().push(obs);
    }

    let rows = groups
        .into_iter()
        .map(|((month, station), acc)| MonthlyRow {
            month,
            station: stations.name(station).to_string(),
            means: acc.finish(),
        })
        .collect();

    MonthlyMeans { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::obs;
    use crate::data::model::Dataset;

    #[test]
    fn mean_of_two_readings() {
        let records = vec![
            obs("A", 2014, 3, 1, Some(10.0), None),
            obs("A", 2014, 3, 15, Some(20.0), None),
        ];
        let monthly = monthly_means(&records, 2014);

        assert_eq!(monthly.rows.len(), 1);
        let row = &monthly.rows[0];
        assert_eq!((row.month, row.station.as_str()), (3, "A"));
        assert_eq!(row.means.get(Pollutant::Pm25), Some(15.0));
        assert_eq!(row.means.get(Pollutant::Pm10), None);
    }

    #[test]
    fn one_row_per_present_month_station_pair() {
        let records = vec![
            obs("B", 2014, 5, 1, Some(1.0), None),
            obs("A", 2014, 3, 1, Some(1.0), None),
            obs("A", 2014, 5, 2, Some(3.0), None),
            obs("A", 2014, 5, 3, Some(5.0), None),
            obs("C", 2015, 5, 1, Some(1.0), None),
        ];
        let monthly = monthly_means(&records, 2014);

        let keys: Vec<(u32, &str)> = monthly
            .rows
            .iter()
            .map(|r| (r.month, r.station.as_str()))
            .collect();
        // Month ascending; within a month, station first-appearance order.
        assert_eq!(keys, [(3, "A"), (5, "B"), (5, "A")]);
        assert_eq!(monthly.rows[2].means.get(Pollutant::Pm25), Some(4.0));
        assert_eq!(monthly.stations(), ["A", "B"]);
    }

    #[test]
    fn station_absent_from_year_yields_no_rows() {
        let ds = Dataset::from_records(vec![
            obs("A", 2013, 1, 1, Some(1.0), None),
            obs("B", 2014, 1, 1, Some(2.0), None),
        ]);
        let monthly = monthly_means(ds.sorted(), 2013);

        assert!(monthly.rows.iter().all(|r| r.station != "B"));
        assert_eq!(monthly.stations(), ["A"]);
        assert!(monthly.series("B", Pollutant::Pm25).is_empty());
    }

    #[test]
    fn missing_pollutant_counts_only_where_present() {
        let records = vec![
            obs("A", 2014, 8, 1, None, Some(50.0)),
            obs("A", 2014, 8, 2, Some(30.0), Some(70.0)),
        ];
        let row = &monthly_means(&records, 2014).rows[0];
        assert_eq!(row.means.get(Pollutant::Pm25), Some(30.0));
        assert_eq!(row.means.get(Pollutant::Pm10), Some(60.0));
    }

    #[test]
    fn group_without_valid_readings_is_undefined_not_zero() {
        let records = vec![obs("A", 2014, 8, 1, None, Some(50.0))];
        let monthly = monthly_means(&records, 2014);
        assert_eq!(monthly.rows[0].means.get(Pollutant::Pm25), None);
        assert!(monthly.series("A", Pollutant::Pm25).is_empty());
    }

    #[test]
    fn empty_year_gives_empty_table() {
        let records = vec![obs("A", 2014, 8, 1, Some(1.0), None)];
        assert!(monthly_means(&records, 2020).is_empty());
    }
}
