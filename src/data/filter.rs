use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Weekday};
use thiserror::Error;

use super::model::{TripTable, TripView};

// ---------------------------------------------------------------------------
// Whitelisted filter values
// ---------------------------------------------------------------------------

/// Rejected filter input, with the allowed alternatives spelled out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error("Invalid city input. Please choose from Chicago, New York City, or Washington")]
    City(String),
    #[error("Invalid month input. Please choose 'all' or a month from January to June")]
    Month(String),
    #[error("Invalid day input. Please choose 'all' or a day of the week")]
    Day(String),
}

/// One of the three cities with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// File name of the city's CSV export.
    pub fn data_file(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        };
        write!(f, "{name}")
    }
}

impl FromStr for City {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chicago" => Ok(City::Chicago),
            "new york city" => Ok(City::NewYorkCity),
            "washington" => Ok(City::Washington),
            _ => Err(FilterParseError::City(s.to_string())),
        }
    }
}

/// Month filter: "all" or one of the six months covered by the exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    January,
    February,
    March,
    April,
    May,
    June,
}

impl MonthFilter {
    /// 1-indexed month number, `None` for `All`.
    pub fn number(self) -> Option<u32> {
        match self {
            MonthFilter::All => None,
            MonthFilter::January => Some(1),
            MonthFilter::February => Some(2),
            MonthFilter::March => Some(3),
            MonthFilter::April => Some(4),
            MonthFilter::May => Some(5),
            MonthFilter::June => Some(6),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonthFilter::All => "all",
            MonthFilter::January => "January",
            MonthFilter::February => "February",
            MonthFilter::March => "March",
            MonthFilter::April => "April",
            MonthFilter::May => "May",
            MonthFilter::June => "June",
        };
        write!(f, "{name}")
    }
}

impl FromStr for MonthFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(MonthFilter::All),
            "january" => Ok(MonthFilter::January),
            "february" => Ok(MonthFilter::February),
            "march" => Ok(MonthFilter::March),
            "april" => Ok(MonthFilter::April),
            "may" => Ok(MonthFilter::May),
            "june" => Ok(MonthFilter::June),
            _ => Err(FilterParseError::Month(s.to_string())),
        }
    }
}

/// Day-of-week filter: "all" or a weekday name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayFilter {
    /// Matching chrono weekday, `None` for `All`.
    pub fn weekday(self) -> Option<Weekday> {
        match self {
            DayFilter::All => None,
            DayFilter::Monday => Some(Weekday::Mon),
            DayFilter::Tuesday => Some(Weekday::Tue),
            DayFilter::Wednesday => Some(Weekday::Wed),
            DayFilter::Thursday => Some(Weekday::Thu),
            DayFilter::Friday => Some(Weekday::Fri),
            DayFilter::Saturday => Some(Weekday::Sat),
            DayFilter::Sunday => Some(Weekday::Sun),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayFilter::All => "all",
            DayFilter::Monday => "Monday",
            DayFilter::Tuesday => "Tuesday",
            DayFilter::Wednesday => "Wednesday",
            DayFilter::Thursday => "Thursday",
            DayFilter::Friday => "Friday",
            DayFilter::Saturday => "Saturday",
            DayFilter::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DayFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DayFilter::All),
            "monday" => Ok(DayFilter::Monday),
            "tuesday" => Ok(DayFilter::Tuesday),
            "wednesday" => Ok(DayFilter::Wednesday),
            "thursday" => Ok(DayFilter::Thursday),
            "friday" => Ok(DayFilter::Friday),
            "saturday" => Ok(DayFilter::Saturday),
            "sunday" => Ok(DayFilter::Sunday),
            _ => Err(FilterParseError::Day(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// View construction
// ---------------------------------------------------------------------------

/// Return a view of the trips that pass both filters.
///
/// `All` on either axis means no constraint. The backing table is untouched;
/// only the selected indices differ.
pub fn filtered_view<'a>(table: &'a TripTable, month: MonthFilter, day: DayFilter) -> TripView<'a> {
    if month == MonthFilter::All && day == DayFilter::All {
        return table.view_all();
    }

    let indices = table
        .trips
        .iter()
        .enumerate()
        .filter(|(_, trip)| {
            if let Some(m) = month.number() {
                if trip.start_time.month() != m {
                    return false;
                }
            }
            if let Some(d) = day.weekday() {
                if trip.start_time.weekday() != d {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect();

    TripView { table, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Trip;
    use chrono::NaiveDateTime;

    fn trip(start: &str) -> Trip {
        Trip {
            start_time: NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap(),
            start_station: "A St".to_string(),
            end_station: "B St".to_string(),
            duration_secs: 300,
            user_type: "Subscriber".to_string(),
            gender: None,
            birth_year: None,
        }
    }

    fn table(starts: &[&str]) -> TripTable {
        TripTable {
            trips: starts.iter().map(|s| trip(s)).collect(),
            has_gender: false,
            has_birth_year: true,
        }
    }

    #[test]
    fn city_parse_is_case_insensitive() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("NEW YORK CITY".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!(" washington ".parse::<City>().unwrap(), City::Washington);
    }

    #[test]
    fn city_parse_rejects_unknown() {
        assert_eq!(
            "boston".parse::<City>(),
            Err(FilterParseError::City("boston".to_string()))
        );
    }

    #[test]
    fn month_parse_covers_whitelist_only() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("March".parse::<MonthFilter>().unwrap(), MonthFilter::March);
        assert!("july".parse::<MonthFilter>().is_err());
        assert!("3".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn day_parse_covers_whitelist_only() {
        assert_eq!("all".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert_eq!("FRIDAY".parse::<DayFilter>().unwrap(), DayFilter::Friday);
        assert!("fri".parse::<DayFilter>().is_err());
    }

    #[test]
    fn month_numbers_are_one_indexed() {
        assert_eq!(MonthFilter::All.number(), None);
        assert_eq!(MonthFilter::January.number(), Some(1));
        assert_eq!(MonthFilter::June.number(), Some(6));
    }

    #[test]
    fn all_all_keeps_every_row() {
        let t = table(&[
            "2017-01-02 08:00:00",
            "2017-03-03 09:30:00",
            "2017-06-30 23:59:59",
        ]);
        let view = filtered_view(&t, MonthFilter::All, DayFilter::All);
        assert_eq!(view.len(), t.len());
        assert_eq!(view.indices, t.view_all().indices);
    }

    #[test]
    fn month_filter_keeps_matching_start_months() {
        let t = table(&[
            "2017-01-02 08:00:00",
            "2017-03-03 09:30:00",
            "2017-03-10 10:00:00",
            "2017-06-30 23:59:59",
        ]);
        let view = filtered_view(&t, MonthFilter::March, DayFilter::All);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|tr| tr.start_time.month() == 3));
    }

    #[test]
    fn day_filter_keeps_matching_weekdays() {
        // 2017-03-03 and 2017-03-10 are Fridays, 2017-03-06 is a Monday.
        let t = table(&[
            "2017-03-03 09:30:00",
            "2017-03-06 09:30:00",
            "2017-03-10 10:00:00",
        ]);
        let view = filtered_view(&t, MonthFilter::All, DayFilter::Friday);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|tr| tr.start_time.weekday() == Weekday::Fri));
    }

    #[test]
    fn combined_filters_intersect() {
        let t = table(&[
            "2017-03-03 09:30:00", // March Friday
            "2017-04-07 09:30:00", // April Friday
            "2017-03-06 09:30:00", // March Monday
        ]);
        let view = filtered_view(&t, MonthFilter::March, DayFilter::Friday);
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(0).unwrap().start_time.day(), 3);
    }

    #[test]
    fn filtering_leaves_schema_flags_alone() {
        let t = table(&["2017-03-03 09:30:00"]);
        let view = filtered_view(&t, MonthFilter::January, DayFilter::All);
        assert!(view.is_empty());
        assert!(!view.table.has_gender);
        assert!(view.table.has_birth_year);
    }
}
