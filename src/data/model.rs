use std::fmt;

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Measured columns
// ---------------------------------------------------------------------------

/// Pollutant concentration columns, in charting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
    So2,
    No2,
    Co,
    O3,
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::Co,
        Pollutant::O3,
    ];

    /// Column header as it appears in the input file.
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::So2 => "SO2",
            Pollutant::No2 => "NO2",
            Pollutant::Co => "CO",
            Pollutant::O3 => "O3",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Meteorological columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weather {
    Temp,
    Pres,
    Dewp,
    Rain,
    Wspm,
}

impl Weather {
    pub const ALL: [Weather; 5] = [
        Weather::Temp,
        Weather::Pres,
        Weather::Dewp,
        Weather::Rain,
        Weather::Wspm,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Weather::Temp => "TEMP",
            Weather::Pres => "PRES",
            Weather::Dewp => "DEWP",
            Weather::Rain => "RAIN",
            Weather::Wspm => "WSPM",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Any numeric column that takes part in the correlation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Pollutant(Pollutant),
    Weather(Weather),
}

impl Measure {
    /// The 11 correlated columns: pollutants first, then weather.
    pub const ALL: [Measure; 11] = [
        Measure::Pollutant(Pollutant::Pm25),
        Measure::Pollutant(Pollutant::Pm10),
        Measure::Pollutant(Pollutant::So2),
        Measure::Pollutant(Pollutant::No2),
        Measure::Pollutant(Pollutant::Co),
        Measure::Pollutant(Pollutant::O3),
        Measure::Weather(Weather::Temp),
        Measure::Weather(Weather::Pres),
        Measure::Weather(Weather::Dewp),
        Measure::Weather(Weather::Rain),
        Measure::Weather(Weather::Wspm),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Measure::Pollutant(p) => p.label(),
            Measure::Weather(w) => w.label(),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the input file
// ---------------------------------------------------------------------------

/// One station reading at one timestamp. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub station: String,
    pub datetime: NaiveDateTime,
    pub pollutants: [Option<f64>; 6],
    pub weather: [Option<f64>; 5],
}

impl Observation {
    pub fn pollutant(&self, p: Pollutant) -> Option<f64> {
        self.pollutants[p.index()]
    }

    pub fn measure(&self, m: Measure) -> Option<f64> {
        match m {
            Measure::Pollutant(p) => self.pollutants[p.index()],
            Measure::Weather(w) => self.weather[w.index()],
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// All observations in file order, plus a timestamp-sorted view.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Rows exactly as read (original order, duplicates kept).
    pub records: Vec<Observation>,
    /// Indices into `records`, ascending by timestamp. Ties keep file order.
    by_time: Vec<usize>,
    /// Station names in first-appearance order of the sorted view.
    pub stations: Vec<String>,
}

impl Dataset {
    /// Build the sorted view and station index from the loaded rows.
    pub fn from_records(records: Vec<Observation>) -> Self {
        let mut by_time: Vec<usize> = (0..records.len()).collect();
        by_time.sort_by_key(|&i| records[i].datetime);

        let mut stations: Vec<String> = Vec::new();
        for &i in &by_time {
            let station = &records[i].station;
            if !stations.iter().any(|s| s == station) {
                stations.push(station.clone());
            }
        }

        Dataset {
            records,
            by_time,
            stations,
        }
    }

    /// Observations in ascending timestamp order.
    pub fn sorted(&self) -> impl Iterator<Item = &Observation> + '_ {
        self.by_time.iter().map(move |&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
