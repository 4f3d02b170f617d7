use std::collections::BTreeMap;
use std::fmt;

use chrono::Datelike;

use super::{MeanAccumulator, PollutantMeans, StationIndex};
use crate::data::filter::in_year;
use crate::data::model::{Observation, Pollutant};

/// Three-month bucket of the calendar year. Variant order is charting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Months 3–5 Spring, 6–8 Summer, 9–11 Fall, anything else Winter.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalRow {
    pub station: String,
    pub season: Season,
    pub means: PollutantMeans,
}

/// Seasonal pollutant means, ordered by station first appearance then season.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeasonalMeans {
    pub rows: Vec<SeasonalRow>,
}

impl SeasonalMeans {
    pub fn stations(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !out.contains(&row.station.as_str()) {
                out.push(&row.station);
            }
        }
        out
    }

    /// `(season, mean)` points of one station in season order.
    pub fn series(&self, station: &str, pollutant: Pollutant) -> Vec<(Season, f64)> {
        self.rows
            .iter()
            .filter(|r| r.station == station)
            .filter_map(|r| r.means.get(pollutant).map(|v| (r.season, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Mean of every pollutant per (station, season) among the rows of `year`.
pub fn seasonal_means<'a, I>(records: I, year: i32) -> SeasonalMeans
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut stations = StationIndex::default();
    let mut groups: BTreeMap<(usize, Season), MeanAccumulator> = BTreeMap::new();

    for obs in in_year(records, year) {
        let season = Season::from_month(obs.datetime.month());
        let key = (stations.position(&obs.station), season);
        groups.entry(key).or_default().push(obs);
    }

    let rows = groups
        .into_iter()
        .map(|((station, season), acc)| SeasonalRow {
            station: stations.name(station).to_string(),
            season,
            means: acc.finish(),
        })
        .collect();

    SeasonalMeans { rows }
}
