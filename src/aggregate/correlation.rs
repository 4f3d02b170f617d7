use crate::data::model::{Measure, Observation};

const N: usize = Measure::ALL.len();

/// Pearson correlation between every pair of [`Measure::ALL`].
///
/// Symmetric with a unit diagonal. A cell is `None` when the pair has fewer
/// than two joint readings or one side does not vary.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    cells: [[Option<f64>; N]; N],
}

impl CorrelationMatrix {
    pub fn labels(&self) -> [&'static str; N] {
        Measure::ALL.map(Measure::label)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells[row][col]
    }

    pub fn size(&self) -> usize {
        N
    }
}

/// Correlate the 11 measure columns over every record given, deleting rows
/// pairwise: a row counts for a pair only when both cells are present.
///
/// Each pair streams over the records directly, so the iterator must be
/// cheap to clone (a slice iterator or a filter over one).
pub fn correlation_matrix<'a, I>(records: I) -> CorrelationMatrix
where
    I: IntoIterator<Item = &'a Observation>,
    I::IntoIter: Clone,
{
    let records = records.into_iter();

    let mut cells = [[None; N]; N];
    for i in 0..N {
        cells[i][i] = Some(1.0);
        let a = Measure::ALL[i];
        for j in (i + 1)..N {
            let b = Measure::ALL[j];
            let r = pearson(
                records
                    .clone()
                    .filter_map(|obs| Some((obs.measure(a)?, obs.measure(b)?))),
            );
            cells[i][j] = r;
            cells[j][i] = r;
        }
    }

    CorrelationMatrix { cells }
}

fn pearson<I>(pairs: I) -> Option<f64>
where
    I: Iterator<Item = (f64, f64)> + Clone,
{
    let (n, sum_x, sum_y) = pairs
        .clone()
        .fold((0usize, 0.0, 0.0), |(n, sx, sy), (x, y)| (n + 1, sx + x, sy + y));
    if n < 2 {
        return None;
    }
    let mean_x = sum_x / n as f64;
    let mean_y = sum_y / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let divisor = (sxx * syy).sqrt();
    if divisor == 0.0 {
        return None;
    }
    Some((sxy / divisor).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::{Pollutant, Weather};

    fn row(pm25: Option<f64>, pm10: Option<f64>, temp: Option<f64>, rain: Option<f64>) -> Observation {
        let mut weather = [Some(0.0); 5];
        weather[Weather::Temp.index()] = temp;
        weather[Weather::Rain.index()] = rain;
        Observation {
            station: "A".to_string(),
            datetime: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            pollutants: [pm25, pm10, Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
            weather,
        }
    }

    fn idx(label: &str) -> usize {
        Measure::ALL.iter().position(|m| m.label() == label).unwrap()
    }

    #[test]
    fn symmetric_with_unit_diagonal() {
        let records = vec![
            row(Some(1.0), Some(2.0), Some(-3.0), Some(0.0)),
            row(Some(2.0), Some(5.0), Some(1.0), Some(0.5)),
            row(Some(4.0), Some(3.0), Some(0.0), None),
            row(Some(8.0), Some(9.0), Some(7.0), Some(0.1)),
        ];
        let m = correlation_matrix(&records);

        for i in 0..m.size() {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..m.size() {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn perfect_positive_and_negative_correlation() {
        let records: Vec<Observation> = (0..5)
            .map(|k| {
                let x = k as f64;
                row(Some(x), Some(2.0 * x + 1.0), Some(-x), Some(0.0))
            })
            .collect();
        let m = correlation_matrix(&records);
        let pm25 = idx(Pollutant::Pm25.label());

        assert!((m.get(pm25, idx("PM10")).unwrap() - 1.0).abs() < 1e-12);
        assert!((m.get(pm25, idx("TEMP")).unwrap() + 1.0).abs() < 1e-12);
        // RAIN never varies: undefined rather than zero.
        assert_eq!(m.get(pm25, idx("RAIN")), None);
    }

    #[test]
    fn pairwise_deletion_ignores_incomplete_rows() {
        let records = vec![
            row(Some(1.0), Some(1.0), None, None),
            row(Some(2.0), Some(2.0), None, None),
            row(Some(3.0), Some(3.0), None, None),
            // An outlier that would break the correlation, but PM10 is missing.
            row(Some(100.0), None, None, None),
        ];
        let m = correlation_matrix(&records);
        assert_eq!(m.get(idx("PM2.5"), idx("PM10")), Some(1.0));
        assert_eq!(m.get(idx("PM2.5"), idx("TEMP")), None);
    }

    #[test]
    fn labels_cover_all_measures() {
        let m = correlation_matrix(std::iter::empty::<&Observation>());
        assert_eq!(m.labels()[0], "PM2.5");
        assert_eq!(m.labels()[10], "WSPM");
        assert_eq!(m.get(0, 1), None);
    }
}
