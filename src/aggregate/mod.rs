//! Pure transforms from observations to the tables the charts consume.
//!
//! * [`monthly`]     – per-pollutant means grouped by (month, station)
//! * [`seasonal`]    – per-pollutant means grouped by (station, season)
//! * [`correlation`] – Pearson matrix over pollutants and weather columns
//!
//! None of them keep state; calling them twice on the same input yields
//! identical tables.

pub mod correlation;
pub mod monthly;
pub mod seasonal;

use crate::data::model::{Observation, Pollutant};

/// Mean of each pollutant within one group. `None` when the group holds no
/// valid reading for that pollutant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PollutantMeans(pub [Option<f64>; 6]);

impl PollutantMeans {
    pub fn get(&self, p: Pollutant) -> Option<f64> {
        self.0[p.index()]
    }
}

/// Running per-column sums. Missing cells are skipped column by column, so a
/// row lacking PM2.5 still counts towards PM10.
#[derive(Debug, Clone, Default)]
pub(crate) struct MeanAccumulator {
    sums: [f64; 6],
    counts: [usize; 6],
}

impl MeanAccumulator {
    pub(crate) fn push(&mut self, obs: &Observation) {
        for p in Pollutant::ALL {
            if let Some(v) = obs.pollutant(p) {
                self.sums[p.index()] += v;
                self.counts[p.index()] += 1;
            }
        }
    }

    pub(crate) fn finish(&self) -> PollutantMeans {
        PollutantMeans(std::array::from_fn(|i| {
            (self.counts[i] > 0).then(|| self.sums[i] / self.counts[i] as f64)
        }))
    }
}

/// Assigns each distinct station a stable position by first appearance.
#[derive(Debug, Default)]
pub(crate) struct StationIndex {
    names: Vec<String>,
}

impl StationIndex {
    pub(crate) fn position(&mut self, station: &str) -> usize {
        match self.names.iter().position(|s| s == station) {
            Some(i) => i,
            None => {
                self.names.push(station.to_string());
                self.names.len() - 1
            }
        }
    }

    pub(crate) fn name(&self, i: usize) -> &str {
        &self.names[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::obs;

    #[test]
    fn accumulator_skips_missing_per_column() {
        let mut acc = MeanAccumulator::default();
        acc.push(&obs("A", 2014, 3, 1, None, Some(50.0)));
        acc.push(&obs("A", 2014, 3, 2, Some(10.0), Some(70.0)));

        let means = acc.finish();
        assert_eq!(means.get(Pollutant::Pm25), Some(10.0));
        assert_eq!(means.get(Pollutant::Pm10), Some(60.0));
        assert_eq!(means.get(Pollutant::O3), None);
    }
}
