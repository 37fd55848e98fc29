//! Diary CSV parsing.
//!
//! The export's `diary.csv` names its columns in the first row; data rows
//! are mapped by column name, so column order in the export does not
//! matter. Any malformed row, date, or URL fails the whole parse; there is
//! no row-level skipping.

use std::fs::File;
use std::io::Read;

use chrono::NaiveDate;
use tracing::info;
use url::Url;

use letterboxd_ics_core::{Error, Event};

use crate::export::{DIARY_MEMBER, ExportHandle};

const COL_NAME: &str = "Name";
const COL_DATE: &str = "Watched Date";
const COL_URL: &str = "Letterboxd URI";
const COL_RATING: &str = "Rating";
const COL_YEAR: &str = "Year";

/// Parses the diary table into events, in source row order.
///
/// A header-only source yields an empty sequence, which is not an error.
pub fn parse(handle: &ExportHandle) -> Result<Vec<Event>, Error> {
    let data = read_source(handle)?;
    parse_csv(&data)
}

/// Reads the raw bytes of the diary table.
///
/// A missing file, missing archive member, and corrupt archive all
/// normalize to [`Error::EventSourceNotFound`] with the underlying message
/// preserved.
fn read_source(handle: &ExportHandle) -> Result<Vec<u8>, Error> {
    let not_found = |detail: String| Error::EventSourceNotFound { detail };

    match handle {
        ExportHandle::Csv(path) => std::fs::read(path).map_err(|e| not_found(e.to_string())),
        ExportHandle::Archive(path) => {
            let file = File::open(path).map_err(|e| not_found(e.to_string()))?;
            let mut archive =
                zip::ZipArchive::new(file).map_err(|e| not_found(e.to_string()))?;
            let mut member = archive
                .by_name(DIARY_MEMBER)
                .map_err(|e| not_found(e.to_string()))?;
            let mut data = Vec::new();
            member
                .read_to_end(&mut data)
                .map_err(|e| not_found(e.to_string()))?;
            Ok(data)
        }
    }
}

/// Column indexes resolved from the header row.
struct Columns {
    name: usize,
    date: usize,
    url: usize,
    rating: usize,
    year: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, Error> {
        let index = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| Error::DiaryMalformed {
                    detail: format!("missing column: {name}"),
                })
        };
        Ok(Self {
            name: index(COL_NAME)?,
            date: index(COL_DATE)?,
            url: index(COL_URL)?,
            rating: index(COL_RATING)?,
            year: index(COL_YEAR)?,
        })
    }
}

fn parse_csv(data: &[u8]) -> Result<Vec<Event>, Error> {
    let mut reader = csv::Reader::from_reader(data);
    let headers = reader
        .headers()
        .map_err(|e| Error::DiaryMalformed {
            detail: e.to_string(),
        })?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    info!("parsing diary CSV");
    let mut events = Vec::new();
    for record in reader.records() {
        // the csv reader rejects rows whose field count differs from the header's
        let record = record.map_err(|e| Error::DiaryMalformed {
            detail: e.to_string(),
        })?;
        events.push(event_from_record(&record, &columns)?);
    }
    info!(count = events.len(), "parsing complete");
    Ok(events)
}

fn event_from_record(record: &csv::StringRecord, columns: &Columns) -> Result<Event, Error> {
    let field = |index: usize| record.get(index).unwrap_or_default();

    let raw_date = field(columns.date);
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        raw: raw_date.to_string(),
    })?;

    let raw_url = field(columns.url);
    let url = Url::parse(raw_url).map_err(|_| Error::InvalidUrl {
        raw: raw_url.to_string(),
    })?;

    Ok(Event::new(
        field(columns.name),
        date,
        description(field(columns.year), field(columns.rating)),
        url,
    ))
}

/// `Year: {year}` and `Rating: {stars}` on two lines. Non-numeric years
/// render as 0.
fn description(year: &str, rating: &str) -> String {
    let year: i64 = year.trim().parse().unwrap_or(0);
    format!("Year: {}\nRating: {}", year, stars(rating))
}

/// One `★` per whole star, with a trailing `½` when the fractional part is
/// exactly .5. An empty or unparseable rating yields no stars.
fn stars(rating: &str) -> String {
    let Ok(value) = rating.trim().parse::<f64>() else {
        return String::new();
    };
    let value = value.clamp(0.0, 10.0);
    let mut out = "★".repeat(value as usize);
    if (value - value.floor() - 0.5).abs() < f64::EPSILON {
        out.push('½');
    }
    out
}
