use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{Datelike, Timelike, Weekday};

use crate::data::model::TripView;

// ---------------------------------------------------------------------------
// Aggregation helpers
// ---------------------------------------------------------------------------

/// Most frequent value, or `None` for an empty input.
///
/// Counts live in a `BTreeMap` and the running best is only replaced on a
/// strictly greater count, so ties resolve to the smallest value. That keeps
/// the reported mode deterministic run to run.
fn mode<T, I>(items: I) -> Option<T>
where
    T: Ord + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_default() += 1;
    }

    let mut best: Option<(&T, usize)> = None;
    for (value, &n) in &counts {
        if best.map_or(true, |(_, b)| n > b) {
            best = Some((value, n));
        }
    }
    best.map(|(v, _)| v.clone())
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Section separator between reports.
pub fn print_rule() {
    println!("{}", "-".repeat(40));
}

// ---------------------------------------------------------------------------
// Time stats
// ---------------------------------------------------------------------------

/// Most frequent travel times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// 1-indexed most common start month.
    pub month: Option<u32>,
    /// Most common start weekday.
    pub weekday: Option<&'static str>,
    /// Most common start hour (0-23).
    pub hour: Option<u32>,
}

pub fn time_stats(view: &TripView<'_>) -> TimeStats {
    TimeStats {
        month: mode(view.iter().map(|t| t.start_time.month())),
        weekday: mode(view.iter().map(|t| day_name(t.start_time.weekday()))),
        hour: mode(view.iter().map(|t| t.start_time.hour())),
    }
}

/// Print statistics on the most frequent times of travel.
pub fn report_time_stats(view: &TripView<'_>) {
    println!("\nCalculating The Most Frequent Times of Travel...\n");
    let started = Instant::now();

    let stats = time_stats(view);
    match (stats.month, stats.weekday, stats.hour) {
        (Some(month), Some(weekday), Some(hour)) => {
            println!("The most common month is: {}", month_name(month));
            println!("The most common day of week is: {weekday}");
            println!("The most common start hour is: {hour}");
        }
        _ => println!("No trips match the current filters."),
    }

    println!("\nThis took {:.6} seconds.", started.elapsed().as_secs_f64());
    print_rule();
}

// ---------------------------------------------------------------------------
// Station stats
// ---------------------------------------------------------------------------

/// Most popular stations and route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// Most frequent "START to END" combination. Derived at reporting time;
    /// never stored on the rows.
    pub route: Option<String>,
}

pub fn station_stats(view: &TripView<'_>) -> StationStats {
    StationStats {
        start_station: mode(view.iter().map(|t| t.start_station.clone())),
        end_station: mode(view.iter().map(|t| t.end_station.clone())),
        route: mode(
            view.iter()
                .map(|t| format!("{} to {}", t.start_station, t.end_station)),
        ),
    }
}

/// Print statistics on the most popular stations and trip.
pub fn report_station_stats(view: &TripView<'_>) {
    println!("\nCalculating The Most Popular Stations and Trip...\n");
    let started = Instant::now();

    let stats = station_stats(view);
    match (stats.start_station, stats.end_station, stats.route) {
        (Some(start), Some(end), Some(route)) => {
            println!("The most commonly used start station is: {start}");
            println!("The most commonly used end station is: {end}");
            println!(
                "The most frequent combination of start station and end station trip is: {route}"
            );
        }
        _ => println!("No trips match the current filters."),
    }

    println!("\nThis took {:.6} seconds.", started.elapsed().as_secs_f64());
    print_rule();
}

// ---------------------------------------------------------------------------
// Trip duration stats
// ---------------------------------------------------------------------------

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total_secs: i64,
    /// `None` when the view is empty.
    pub mean_secs: Option<f64>,
}

pub fn duration_stats(view: &TripView<'_>) -> DurationStats {
    let total_secs: i64 = view.iter().map(|t| t.duration_secs).sum();
    let mean_secs = if view.is_empty() {
        None
    } else {
        Some(total_secs as f64 / view.len() as f64)
    };
    DurationStats { total_secs, mean_secs }
}

/// Print total and mean travel time.
pub fn report_duration_stats(view: &TripView<'_>) {
    println!("\nCalculating Trip Duration...\n");
    let started = Instant::now();

    let stats = duration_stats(view);
    println!("The total travel time is: {} seconds", stats.total_secs);
    match stats.mean_secs {
        Some(mean) => println!("The mean travel time is: {mean:.2} seconds"),
        None => println!("No trips match the current filters."),
    }

    println!("\nThis took {:.6} seconds.", started.elapsed().as_secs_f64());
    print_rule();
}

// ---------------------------------------------------------------------------
// User stats
// ---------------------------------------------------------------------------

/// Earliest, most recent, and most common birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Rider demographics.
///
/// The `Option` layers distinguish "column missing from this city's file"
/// (`None`) from "column present" (`Some`, possibly with no values after
/// filtering).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    pub user_types: BTreeMap<String, usize>,
    pub genders: Option<BTreeMap<String, usize>>,
    pub birth_years: Option<BirthYearStats>,
}

pub fn user_stats(view: &TripView<'_>) -> UserStats {
    let mut user_types: BTreeMap<String, usize> = BTreeMap::new();
    for trip in view.iter() {
        *user_types.entry(trip.user_type.clone()).or_default() += 1;
    }

    let genders = view.table.has_gender.then(|| {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for gender in view.iter().filter_map(|t| t.gender.as_deref()) {
            *counts.entry(gender.to_string()).or_default() += 1;
        }
        counts
    });

    let birth_years = if view.table.has_birth_year {
        let years: Vec<i32> = view.iter().filter_map(|t| t.birth_year).collect();
        match (years.iter().min(), years.iter().max(), mode(years.iter().copied())) {
            (Some(&earliest), Some(&most_recent), Some(most_common)) => Some(BirthYearStats {
                earliest,
                most_recent,
                most_common,
            }),
            _ => None,
        }
    } else {
        None
    };

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

/// Print statistics on bikeshare users.
pub fn report_user_stats(view: &TripView<'_>) {
    println!("\nCalculating User Stats...\n");
    let started = Instant::now();

    let stats = user_stats(view);
    println!("Counts of user types:");
    for (user_type, count) in &stats.user_types {
        println!("  {user_type}: {count}");
    }

    match &stats.genders {
        Some(counts) => {
            println!("\nCounts of gender:");
            for (gender, count) in counts {
                println!("  {gender}: {count}");
            }
        }
        None => println!("Gender data is not available for this city."),
    }

    match stats.birth_years {
        Some(years) => {
            println!("\nThe earliest birth year is: {}", years.earliest);
            println!("The most recent birth year is: {}", years.most_recent);
            println!("The most common birth year is: {}", years.most_common);
        }
        None if !view.table.has_birth_year => {
            println!("Birth year data is not available for this city.")
        }
        None => println!("No birth year data in this selection."),
    }

    println!("\nThis took {:.6} seconds.", started.elapsed().as_secs_f64());
    print_rule();
}
