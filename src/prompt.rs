use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::data::filter::{City, DayFilter, FilterParseError, MonthFilter};

/// Print a prompt and read one trimmed line from stdin.
///
/// A closed stdin is an error, not an empty answer; letting it propagate
/// ends the session instead of re-prompting a reader that can never answer.
pub fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("flushing stdout")?;
    read_answer(&mut io::stdin().lock())
}

fn read_answer(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("reading input")?;
    if n == 0 {
        bail!("stdin closed");
    }
    Ok(line.trim().to_string())
}

/// Ask for city, month, and day until all three are valid.
///
/// Any invalid answer prints the whitelist message and restarts the whole
/// triple prompt; there is no partial retry.
pub fn collect_filters() -> Result<(City, MonthFilter, DayFilter)> {
    loop {
        let city = match ask::<City>(
            "Enter the name of the city (Chicago, New York City, Washington): ",
        )? {
            Ok(city) => city,
            Err(e) => {
                reenter_notice(&e);
                continue;
            }
        };

        let month = match ask::<MonthFilter>(
            "Enter the name of the month (all, January, February, ... June): ",
        )? {
            Ok(month) => month,
            Err(e) => {
                reenter_notice(&e);
                continue;
            }
        };

        let day = match ask::<DayFilter>(
            "Enter the name of the day (all, Monday, Tuesday, ... Sunday): ",
        )? {
            Ok(day) => day,
            Err(e) => {
                reenter_notice(&e);
                continue;
            }
        };

        return Ok((city, month, day));
    }
}

/// Inner `Result` is the validation outcome; the outer one is I/O failure.
fn ask<T>(prompt: &str) -> Result<Result<T, FilterParseError>>
where
    T: FromStr<Err = FilterParseError>,
{
    let input = prompt_line(prompt)?;
    Ok(input.parse::<T>())
}

fn reenter_notice(err: &FilterParseError) {
    println!("{err}");
    println!("Please re-enter your inputs.");
}
