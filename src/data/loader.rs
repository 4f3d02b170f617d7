use std::path::Path;

use arrow::array::timezone::Tz;
use arrow::array::{Array, ArrayRef, AsArray, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, TimeUnit, TimestampNanosecondType};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::{LoadError, ParseError};
use super::model::{Dataset, Observation, Pollutant, Weather};

pub const DATETIME_COLUMN: &str = "datetime";
pub const STATION_COLUMN: &str = "station";

/// Cell contents treated as a missing reading.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the observation file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `datetime`, `station` and the 11 measure columns
/// * `.parquet` – same columns; `datetime` may be a string or timestamp column
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} observations from {} ({} stations)",
        dataset.len(),
        path.display(),
        dataset.stations.len()
    );
    Ok(dataset)
}

/// Parse a timestamp cell. No single format is enforced; the first of
/// RFC 3339, the common date-time layouts, then bare dates (at midnight) wins.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_number(raw: &str, row: usize, column: &'static str) -> Result<Option<f64>, ParseError> {
    let s = raw.trim();
    if MISSING_MARKERS.contains(&s) {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(ParseError::Number {
            row,
            column,
            value: s.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let position = |name: &str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };

    let datetime_idx = position(DATETIME_COLUMN)?;
    let station_idx = position(STATION_COLUMN)?;
    let pollutant_idx = Pollutant::ALL
        .iter()
        .map(|p| position(p.label()))
        .collect::<Result<Vec<_>, _>>()?;
    let weather_idx = Weather::ALL
        .iter()
        .map(|w| position(w.label()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("");

        let raw_datetime = field(datetime_idx);
        let datetime = parse_timestamp(raw_datetime).ok_or_else(|| ParseError::Timestamp {
            row,
            value: raw_datetime.to_string(),
        })?;

        let mut pollutants = [None; 6];
        for ((slot, p), &idx) in pollutants.iter_mut().zip(Pollutant::ALL).zip(&pollutant_idx) {
            *slot = parse_number(field(idx), row, p.label())?;
        }

        let mut weather = [None; 5];
        for ((slot, w), &idx) in weather.iter_mut().zip(Weather::ALL).zip(&weather_idx) {
            *slot = parse_number(field(idx), row, w.label())?;
        }

        records.push(Observation {
            station: field(station_idx).to_string(),
            datetime,
            pollutants,
            weather,
        });
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the same columns as the CSV layout.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): measure columns of any numeric type are
/// cast to Float64, and `datetime` may be a timestamp of any unit or text.
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let offset = records.len();

        let station = cast(column(&batch, STATION_COLUMN)?, &DataType::Utf8)?;
        let station = station.as_string::<i32>();
        let datetimes = datetime_column(column(&batch, DATETIME_COLUMN)?, offset)?;

        let pollutant_cols = Pollutant::ALL
            .iter()
            .map(|p| float_column(&batch, p.label(), offset))
            .collect::<Result<Vec<_>, _>>()?;
        let weather_cols = Weather::ALL
            .iter()
            .map(|w| float_column(&batch, w.label(), offset))
            .collect::<Result<Vec<_>, _>>()?;

        for (row, datetime) in datetimes.into_iter().enumerate() {
            let station = if station.is_null(row) {
                String::new()
            } else {
                station.value(row).to_string()
            };
            records.push(Observation {
                station,
                datetime,
                pollutants: std::array::from_fn(|i| pollutant_cols[i][row]),
                weather: std::array::from_fn(|i| weather_cols[i][row]),
            });
        }
    }

    Ok(Dataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LoadError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

/// Read one measure column as optional floats. Text columns go through the
/// same cell parser as CSV, so a malformed cell fails instead of becoming null.
fn float_column(
    batch: &RecordBatch,
    name: &'static str,
    offset: usize,
) -> Result<Vec<Option<f64>>, LoadError> {
    let col = column(batch, name)?;
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let text = cast(col, &DataType::Utf8)?;
            let text = text.as_string::<i32>();
            (0..text.len())
                .map(|row| -> Result<Option<f64>, LoadError> {
                    let raw = if text.is_null(row) { "" } else { text.value(row) };
                    Ok(parse_number(raw, offset + row, name)?)
                })
                .collect()
        }
        _ => {
            let floats = cast(col, &DataType::Float64)?;
            let floats = floats.as_primitive::<Float64Type>();
            Ok((0..floats.len()).map(|row| float_cell(floats, row)).collect())
        }
    }
}

fn float_cell(col: &Float64Array, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let v = col.value(row);
    (!v.is_nan()).then_some(v)
}

/// Convert the `datetime` column of one batch. `offset` is the number of
/// rows in earlier batches, so errors report file-global row numbers.
fn datetime_column(col: &ArrayRef, offset: usize) -> Result<Vec<NaiveDateTime>, LoadError> {
    match col.data_type() {
        DataType::Timestamp(_, tz) => {
            // Zoned instants become wall-clock time in their own zone, matching
            // how an RFC 3339 text cell with an offset is read.
            let zone: Option<Tz> = tz.as_deref().map(str::parse::<Tz>).transpose()?;
            let nanos = cast(col, &DataType::Timestamp(TimeUnit::Nanosecond, tz.clone()))?;
            let nanos = nanos.as_primitive::<TimestampNanosecondType>();
            (0..nanos.len())
                .map(|row| -> Result<NaiveDateTime, LoadError> {
                    if nanos.is_null(row) {
                        return Err(ParseError::Timestamp {
                            row: offset + row,
                            value: "null".to_string(),
                        }
                        .into());
                    }
                    let instant = DateTime::from_timestamp_nanos(nanos.value(row));
                    Ok(match &zone {
                        Some(zone) => instant.with_timezone(zone).naive_local(),
                        None => instant.naive_utc(),
                    })
                })
                .collect()
        }
        _ => {
            let text = cast(col, &DataType::Utf8)?;
            let text = text.as_string::<i32>();
            (0..text.len())
                .map(|row| -> Result<NaiveDateTime, LoadError> {
                    let raw = if text.is_null(row) { "" } else { text.value(row) };
                    parse_timestamp(raw).ok_or_else(|| {
                        ParseError::Timestamp {
                            row: offset + row,
                            value: raw.to_string(),
                        }
                        .into()
                    })
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{
        Float64Array, Int64Array, StringArray, TimestampMicrosecondArray, TimestampMillisecondArray,
        TimestampSecondArray,
    };
    use arrow::datatypes::{Field, Schema};
    use chrono::{Datelike, Timelike};
    use parquet::arrow::ArrowWriter;

    use super::*;

    const HEADER: &str = "No,year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,O3,TEMP,PRES,DEWP,RAIN,wd,WSPM,station,datetime";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn parses_csv_rows_and_missing_cells() {
        let file = write_csv(&[
            "1,2014,3,1,5,10,50,3,20,300,40,1.5,1020,-10,0,NW,2.1,Aotizhongxin,2014-03-01 05:00:00",
            "2,2013,3,1,0,,50,NA,20,300,40,1.5,1020,-10,0,NW,2.1,Changping,2013-03-01 00:00:00",
        ]);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.records[0];
        assert_eq!(first.station, "Aotizhongxin");
        assert_eq!(first.datetime.year(), 2014);
        assert_eq!(first.datetime.hour(), 5);
        assert_eq!(first.pollutant(Pollutant::Pm25), Some(10.0));
        assert_eq!(first.weather[Weather::Wspm.index()], Some(2.1));

        let second = &ds.records[1];
        assert_eq!(second.pollutant(Pollutant::Pm25), None);
        assert_eq!(second.pollutant(Pollutant::Pm10), Some(50.0));
        assert_eq!(second.pollutant(Pollutant::So2), None);

        // The sorted view puts the 2013 row first; the original order is untouched.
        let sorted: Vec<&str> = ds.sorted().map(|o| o.station.as_str()).collect();
        assert_eq!(sorted, ["Changping", "Aotizhongxin"]);
    }

    #[test]
    fn malformed_timestamp_is_a_parse_error() {
        let file = write_csv(&["1,2014,3,1,5,10,50,3,20,300,40,1.5,1020,-10,0,NW,2.1,A,not-a-date"]);
        match load_file(file.path()) {
            Err(LoadError::Parse(ParseError::Timestamp { row, value })) => {
                assert_eq!(row, 0);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected timestamp error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_number_is_a_parse_error() {
        let file = write_csv(&["1,2014,3,1,5,ten,50,3,20,300,40,1.5,1020,-10,0,NW,2.1,A,2014-03-01 05:00:00"]);
        match load_file(file.path()) {
            Err(LoadError::Parse(ParseError::Number { column, value, .. })) => {
                assert_eq!(column, "PM2.5");
                assert_eq!(value, "ten");
            }
            other => panic!("expected number error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_and_missing_column() {
        let err = load_file(Path::new("/definitely/not/here/all_data.csv")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound(_)));

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "datetime,station,PM2.5").unwrap();
        file.flush().unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(ref c) if c == "PM10"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e == "xlsx"));
    }

    #[test]
    fn timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2015, 7, 4)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        for raw in [
            "2015-07-04 13:00:00",
            "2015-07-04T13:00:00",
            "2015-07-04 13:00",
            "2015/07/04 13:00:00",
            "2015-07-04T13:00:00+00:00",
        ] {
            assert_eq!(parse_timestamp(raw), Some(expected), "{raw}");
        }
        assert_eq!(
            parse_timestamp("2015-07-04"),
            NaiveDate::from_ymd_opt(2015, 7, 4).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("04.07.2015"), None);
    }

    /// Write one batch with the full column layout. Every measure except
    /// PM2.5 is filled with the same numeric values.
    fn write_parquet(datetime: ArrayRef, station: Vec<&str>, pm25: ArrayRef) -> tempfile::NamedTempFile {
        let rows = station.len();
        let mut columns: Vec<(&str, ArrayRef)> = vec![
            (DATETIME_COLUMN, datetime),
            (STATION_COLUMN, Arc::new(StringArray::from(station))),
            (Pollutant::Pm25.label(), pm25),
        ];
        for p in &Pollutant::ALL[1..] {
            let values: Vec<Option<f64>> = (0..rows).map(|r| (r == 0).then_some(1.0)).collect();
            columns.push((p.label(), Arc::new(Float64Array::from(values))));
        }
        for w in Weather::ALL {
            let values: Vec<Option<i64>> = (0..rows).map(|r| Some(7 + r as i64)).collect();
            columns.push((w.label(), Arc::new(Int64Array::from(values))));
        }

        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, col)| Field::new(*name, col.data_type().clone(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns.into_iter().map(|(_, c)| c).collect()).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(std::fs::File::create(file.path()).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    #[test]
    fn loads_parquet_with_string_datetimes() {
        let file = write_parquet(
            Arc::new(StringArray::from(vec!["2016-01-02 03:00:00", "2015-12-31 23:00:00"])),
            vec!["Dingling", "Dingling"],
            Arc::new(Float64Array::from(vec![Some(1.0), None])),
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].pollutant(Pollutant::Co), Some(1.0));
        assert_eq!(ds.records[1].pollutant(Pollutant::Co), None);
        assert_eq!(ds.records[1].pollutant(Pollutant::Pm25), None);
        assert_eq!(ds.records[1].weather[Weather::Temp.index()], Some(8.0));
        assert_eq!(ds.sorted().next().unwrap().datetime.year(), 2015);
    }

    #[test]
    fn parquet_text_measures_are_parsed_like_csv() {
        let file = write_parquet(
            Arc::new(StringArray::from(vec!["2015-01-01 00:00:00", "2015-01-01 01:00:00"])),
            vec!["Dingling", "Dingling"],
            Arc::new(StringArray::from(vec![Some("12.5"), Some("NA")])),
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.records[0].pollutant(Pollutant::Pm25), Some(12.5));
        assert_eq!(ds.records[1].pollutant(Pollutant::Pm25), None);

        let file = write_parquet(
            Arc::new(StringArray::from(vec!["2015-01-01 00:00:00", "2015-01-01 01:00:00"])),
            vec!["Dingling", "Dingling"],
            Arc::new(StringArray::from(vec![Some("3"), Some("ten")])),
        );
        match load_file(file.path()) {
            Err(LoadError::Parse(ParseError::Number { row, column, value })) => {
                assert_eq!(row, 1);
                assert_eq!(column, "PM2.5");
                assert_eq!(value, "ten");
            }
            other => panic!("expected number error, got {other:?}"),
        }
    }

    #[test]
    fn parquet_zoned_timestamps_keep_local_wall_time() {
        let datetime = TimestampMillisecondArray::from(vec![1_420_072_200_000]).with_timezone("Asia/Shanghai");
        let file = write_parquet(Arc::new(datetime), vec!["Dingling"], Arc::new(Float64Array::from(vec![Some(1.0)])));

        let ds = load_file(file.path()).unwrap();
        let expected = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap().and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(ds.records[0].datetime, expected);
    }

    #[test]
    fn parquet_naive_timestamps_of_any_unit() {
        let expected = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap().and_hms_opt(0, 30, 0).unwrap();
        let columns: Vec<ArrayRef> = vec![
            Arc::new(TimestampSecondArray::from(vec![1_420_072_200])),
            Arc::new(TimestampMillisecondArray::from(vec![1_420_072_200_000])),
            Arc::new(TimestampMicrosecondArray::from(vec![1_420_072_200_000_000])),
        ];
        for datetime in columns {
            let unit = datetime.data_type().clone();
            let file = write_parquet(datetime, vec!["Dingling"], Arc::new(Float64Array::from(vec![Some(1.0)])));
            let ds = load_file(file.path()).unwrap();
            assert_eq!(ds.records[0].datetime, expected, "{unit}");
        }
    }
}
