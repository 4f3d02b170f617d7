use chrono::Datelike;

use super::model::{Dataset, Observation};

// ---------------------------------------------------------------------------
// Year selection
// ---------------------------------------------------------------------------

/// Distinct calendar years of the timestamp-sorted view, in order of first
/// appearance. The first entry is the default selection.
pub fn available_years(dataset: &Dataset) -> Vec<i32> {
    let mut years: Vec<i32> = Vec::new();
    for obs in dataset.sorted() {
        let year = obs.datetime.year();
        if !years.contains(&year) {
            years.push(year);
        }
    }
    years
}

/// Keep only observations whose timestamp falls in `year`.
pub fn in_year<'a, I>(records: I, year: i32) -> impl Iterator<Item = &'a Observation>
where
    I: IntoIterator<Item = &'a Observation>,
{
    records
        .into_iter()
        .filter(move |obs| obs.datetime.year() == year)
}
