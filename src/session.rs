use anyhow::Result;

use crate::data::filter::filtered_view;
use crate::data::loader;
use crate::data::model::TripView;
use crate::pager::{self, Pager};
use crate::{prompt, stats};

/// Run the interactive session loop until the user declines a restart.
///
/// Each iteration loads a fresh table; nothing is carried across iterations.
pub fn run() -> Result<()> {
    println!("Hello! Let's explore some US bikeshare data!");
    let data_dir = loader::data_dir();

    loop {
        let (city, month, day) = prompt::collect_filters()?;
        stats::print_rule();

        log::info!("exploring {city} (month: {month}, day: {day})");
        let table = loader::load_city(&data_dir, city)?;
        if table.is_empty() {
            log::warn!("{} contains no trips", city.data_file());
        }
        let view = filtered_view(&table, month, day);
        log::debug!("{} of {} trips match the filters", view.len(), table.len());

        stats::report_time_stats(&view);
        stats::report_station_stats(&view);
        stats::report_duration_stats(&view);
        stats::report_user_stats(&view);

        let answer = prompt::prompt_line("\nWould you like to see the raw data? Enter yes or no: ")?;
        page_raw_data(&view, &answer)?;

        let restart = prompt::prompt_line("\nWould you like to restart? Enter yes or no.\n")?;
        if !pager::is_yes(&restart) {
            break;
        }
    }

    Ok(())
}

/// Drive the pager: show a page, then re-prompt until a non-"yes" answer or
/// the view runs out of rows.
fn page_raw_data(view: &TripView<'_>, first_answer: &str) -> Result<()> {
    let mut pager = Pager::new(first_answer);

    while let Some(range) = pager.next_page(view.len()) {
        pager::print_page(view, range.clone());

        if range.end >= view.len() {
            println!("(end of data)");
            break;
        }

        let answer =
            prompt::prompt_line("Would you like to see the next 5 rows of data? Enter yes or no: ")?;
        pager.answer(&answer);
        if pager.is_stopped() {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{City, DayFilter, MonthFilter};
    use chrono::{Datelike, Weekday};
    use std::io::Write;
    use tempfile::TempDir;

    const CHICAGO_CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
2017-03-03 09:30:00,2017-03-03 09:45:00,900,Canal St,State St,Subscriber,Male,1985.0
2017-03-03 17:10:00,2017-03-03 17:30:00,1200,Clark St,Canal St,Customer,Female,1992.0
2017-03-06 08:00:00,2017-03-06 08:05:00,300,Canal St,State St,Subscriber,Male,1992.0
2017-04-07 12:00:00,2017-04-07 12:20:00,1200,State St,Clark St,Subscriber,,
2017-06-09 09:00:00,2017-06-09 09:10:00,600,Canal St,State St,Customer,Female,1990.0
";

    const WASHINGTON_CSV: &str = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-02 07:45:00,2017-01-02 08:00:00,900,K St,M St,Subscriber
2017-02-14 18:30:00,2017-02-14 18:50:00,1200,M St,K St,Customer
";

    fn data_dir_with(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            let mut f = std::fs::File::create(dir.path().join(name)).unwrap();
            f.write_all(contents.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn chicago_march_friday_keeps_only_march_fridays() {
        let dir = data_dir_with(&[("chicago.csv", CHICAGO_CSV)]);
        let table = loader::load_city(dir.path(), City::Chicago).unwrap();
        assert_eq!(table.len(), 5);

        let view = filtered_view(&table, MonthFilter::March, DayFilter::Friday);
        assert_eq!(view.len(), 2);
        for trip in view.iter() {
            assert_eq!(trip.start_time.month(), 3);
            assert_eq!(trip.start_time.weekday(), Weekday::Fri);
        }
    }

    #[test]
    fn unfiltered_view_matches_file_row_count() {
        let dir = data_dir_with(&[("chicago.csv", CHICAGO_CSV)]);
        let table = loader::load_city(dir.path(), City::Chicago).unwrap();
        let view = filtered_view(&table, MonthFilter::All, DayFilter::All);
        assert_eq!(view.len(), table.len());
    }

    #[test]
    fn full_report_pass_over_a_filtered_view() {
        let dir = data_dir_with(&[("chicago.csv", CHICAGO_CSV)]);
        let table = loader::load_city(dir.path(), City::Chicago).unwrap();
        let view = filtered_view(&table, MonthFilter::March, DayFilter::All);
        assert_eq!(view.len(), 3);

        let time = stats::time_stats(&view);
        assert_eq!(time.month, Some(3));

        let stations = stats::station_stats(&view);
        assert_eq!(stations.start_station.as_deref(), Some("Canal St"));
        assert_eq!(stations.route.as_deref(), Some("Canal St to State St"));

        let duration = stats::duration_stats(&view);
        assert_eq!(duration.total_secs, 2400);
        assert_eq!(duration.mean_secs, Some(800.0));

        let users = stats::user_stats(&view);
        assert_eq!(users.user_types.get("Subscriber"), Some(&2));
        let years = users.birth_years.unwrap();
        assert_eq!(years.earliest, 1985);
        assert_eq!(years.most_recent, 1992);
        assert_eq!(years.most_common, 1992);

        // Reporting never consumes rows.
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn washington_lacks_demographics_but_still_reports() {
        let dir = data_dir_with(&[("washington.csv", WASHINGTON_CSV)]);
        let table = loader::load_city(dir.path(), City::Washington).unwrap();
        let view = filtered_view(&table, MonthFilter::All, DayFilter::All);

        let users = stats::user_stats(&view);
        assert_eq!(users.user_types.len(), 2);
        assert_eq!(users.genders, None);
        assert_eq!(users.birth_years, None);

        // Printing the not-available notices must not panic either.
        stats::report_user_stats(&view);
    }

    #[test]
    fn pager_walks_a_loaded_view_in_pages() {
        let dir = data_dir_with(&[("chicago.csv", CHICAGO_CSV)]);
        let table = loader::load_city(dir.path(), City::Chicago).unwrap();
        let view = filtered_view(&table, MonthFilter::All, DayFilter::All);

        let mut pager = Pager::new("yes");
        assert_eq!(pager.next_page(view.len()), Some(0..5));
        assert_eq!(pager.next_page(view.len()), None);
    }
}
