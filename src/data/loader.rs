use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use super::filter::City;
use super::model::{Trip, TripTable};

/// Timestamp layout used by all three city exports.
const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Directory holding the city CSV files.
///
/// Taken from `BIKESHARE_DATA_DIR` when set, otherwise the current directory.
pub fn data_dir() -> PathBuf {
    std::env::var_os("BIKESHARE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load the mapped CSV file for a city.
pub fn load_city(dir: &Path, city: City) -> Result<TripTable> {
    load_csv(&dir.join(city.data_file()))
}

/// CSV layout: header row with at least Start Time, Start Station,
/// End Station, Trip Duration, and User Type. Gender and Birth Year appear
/// only in some exports; their absence is recorded on the table, not treated
/// as an error.
pub fn load_csv(path: &Path) -> Result<TripTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let start_time_idx = column(&headers, "Start Time")?;
    let start_station_idx = column(&headers, "Start Station")?;
    let end_station_idx = column(&headers, "End Station")?;
    let duration_idx = column(&headers, "Trip Duration")?;
    let user_type_idx = column(&headers, "User Type")?;
    let gender_idx = headers.iter().position(|h| h == "Gender");
    let birth_year_idx = headers.iter().position(|h| h == "Birth Year");

    let mut trips = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let start_time = NaiveDateTime::parse_from_str(
            record.get(start_time_idx).unwrap_or(""),
            START_TIME_FORMAT,
        )
        .with_context(|| format!("Row {row_no}: invalid Start Time"))?;

        // Some exports carry durations as "930.0" rather than "930".
        let duration_secs = record
            .get(duration_idx)
            .unwrap_or("")
            .trim()
            .parse::<f64>()
            .map(|v| v as i64)
            .with_context(|| format!("Row {row_no}: invalid Trip Duration"))?;

        let gender = gender_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        // Birth years are written as floats ("1992.0"); blank cells are
        // simply absent values, not errors.
        let birth_year = birth_year_idx
            .and_then(|i| record.get(i))
            .and_then(|s| s.trim().parse::<f64>().ok())
            .map(|y| y as i32);

        trips.push(Trip {
            start_time,
            start_station: record.get(start_station_idx).unwrap_or("").to_string(),
            end_station: record.get(end_station_idx).unwrap_or("").to_string(),
            duration_secs,
            user_type: record.get(user_type_idx).unwrap_or("").to_string(),
            gender,
            birth_year,
        });
    }

    log::info!(
        "loaded {} trips from {} (gender: {}, birth year: {})",
        trips.len(),
        path.display(),
        gender_idx.is_some(),
        birth_year_idx.is_some()
    );

    Ok(TripTable {
        trips,
        has_gender: gender_idx.is_some(),
        has_birth_year: birth_year_idx.is_some(),
    })
}

fn column(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("CSV missing '{name}' column"))
}
