use std::fmt;
use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::anychar,
    combinator::{all_consuming, map, map_res, value},
    error::{Error as NomError, ErrorKind as NomErrorKind},
    multi::many0,
    Err, IResult,
};

use crate::date::CalendarDate;
use crate::error::{Error, ErrorKind};
use crate::locale::Locale;

/// One placeholder of a date format string
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    /// `d`
    Day,
    /// `dd`
    DayPadded,
    /// `D`
    WeekdayShort,
    /// `DD`
    Weekday,
    /// `m`
    Month,
    /// `mm`
    MonthPadded,
    /// `M`
    MonthNameShort,
    /// `MM`
    MonthName,
    /// `yy`
    YearShort,
    /// `yyyy`
    Year,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Part(Part),
    Literal(char),
}

/// A parsed date format such as `mm/dd/yyyy`.
///
/// There is always one separator more than there are parts: the text before
/// the first part, between each pair of parts and after the last one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateFormat {
    source: String,
    separators: Vec<String>,
    parts: Vec<Part>,
}

fn part(input: &str) -> IResult<&str, Part> {
    alt((
        value(Part::Year, tag("yyyy")),
        value(Part::YearShort, tag("yy")),
        value(Part::DayPadded, tag("dd")),
        value(Part::Day, tag("d")),
        value(Part::Weekday, tag("DD")),
        value(Part::WeekdayShort, tag("D")),
        value(Part::MonthPadded, tag("mm")),
        value(Part::Month, tag("m")),
        value(Part::MonthName, tag("MM")),
        value(Part::MonthNameShort, tag("M")),
    ))(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((map(part, Token::Part), map(anychar, Token::Literal)))(input)
}

fn number<'a>(min: usize, max: usize) -> impl FnMut(&'a str) -> IResult<&'a str, i32> {
    map_res(
        take_while_m_n(min, max, |c: char| c.is_ascii_digit()),
        |digits: &str| digits.parse::<i32>(),
    )
}

/// Index of the longest name `input` starts with, ignoring case.
fn name_index<'a>(names: &[&str], input: &'a str) -> IResult<&'a str, usize> {
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            input
                .get(..name.len())
                .map_or(false, |head| head.to_lowercase() == name.to_lowercase())
        })
        .max_by_key(|(_, name)| name.len())
        .map(|(idx, name)| (&input[name.len()..], idx))
        .ok_or_else(|| Err::Error(NomError::new(input, NomErrorKind::Tag)))
}

#[derive(Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
}

impl DateFormat {
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn separators(&self) -> &[String] {
        &self.separators
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn format_date(&self, date: &CalendarDate, locale: &Locale) -> String {
        let mut out = String::new();

        for (separator, part) in self.separators.iter().zip(self.parts.iter()) {
            out.push_str(separator);
            out.push_str(&Self::format_part(*part, date, locale));
        }
        if let Some(last) = self.separators.last() {
            out.push_str(last);
        }

        out
    }

    fn format_part(part: Part, date: &CalendarDate, locale: &Locale) -> String {
        match part {
            Part::Day => date.day().to_string(),
            Part::DayPadded => format!("{:02}", date.day()),
            Part::WeekdayShort => locale.day_name_short(date.weekday()).to_owned(),
            Part::Weekday => locale.day_name(date.weekday()).to_owned(),
            Part::Month => date.month().to_string(),
            Part::MonthPadded => format!("{:02}", date.month()),
            Part::MonthNameShort => locale.month_name_short(date.month0()).to_owned(),
            Part::MonthName => locale.month_name(date.month0()).to_owned(),
            Part::YearShort => format!("{:02}", date.year().rem_euclid(100)),
            Part::Year => date.year().to_string(),
        }
    }

    /// Reads a date written in this format.
    ///
    /// Anything that does not describe an existing day yields `None`. A format
    /// without a day part reads as the first of the month.
    pub fn parse_date(&self, input: &str, locale: &Locale) -> Option<CalendarDate> {
        let mut rest = input.trim();
        let mut fields = Fields::default();

        for (separator, part) in self.separators.iter().zip(self.parts.iter()) {
            rest = Self::skip_separator(separator, rest)?;
            rest = Self::parse_part(*part, rest, locale, &mut fields).ok()?;
        }
        if let Some(last) = self.separators.last() {
            rest = Self::skip_separator(last, rest)?;
        }

        if !rest.trim().is_empty() {
            return None;
        }

        CalendarDate::new(fields.year?, fields.month?, fields.day.unwrap_or(1))
    }

    fn skip_separator<'a>(separator: &str, input: &'a str) -> Option<&'a str> {
        let trimmed = separator.trim();
        let input = if trimmed.len() < separator.len() {
            input.trim_start()
        } else {
            input
        };

        let res: IResult<&str, &str> = tag(trimmed)(input);
        res.ok().map(|(rest, _)| rest.trim_start_matches(' '))
    }

    fn parse_part<'a>(
        part: Part,
        input: &'a str,
        locale: &Locale,
        fields: &mut Fields,
    ) -> Result<&'a str, Err<NomError<&'a str>>> {
        match part {
            Part::Day | Part::DayPadded => {
                let (rest, day) = number(1, 2)(input)?;
                fields.day = Some(day as u32);
                Ok(rest)
            }
            Part::Month | Part::MonthPadded => {
                let (rest, month) = number(1, 2)(input)?;
                fields.month = Some(month as u32);
                Ok(rest)
            }
            Part::MonthNameShort => {
                let (rest, idx) = name_index(&locale.months_short, input)?;
                fields.month = Some(idx as u32 + 1);
                Ok(rest)
            }
            Part::MonthName => {
                let (rest, idx) = name_index(&locale.months, input)?;
                fields.month = Some(idx as u32 + 1);
                Ok(rest)
            }
            Part::WeekdayShort => name_index(&locale.days_short, input).map(|(rest, _)| rest),
            Part::Weekday => name_index(&locale.days, input).map(|(rest, _)| rest),
            Part::YearShort => {
                let (rest, year) = number(2, 2)(input)?;
                fields.year = Some(2000 + year);
                Ok(rest)
            }
            Part::Year => {
                let (rest, year) = number(1, 4)(input)?;
                fields.year = Some(year);
                Ok(rest)
            }
        }
    }
}

impl Default for DateFormat {
    /// `mm/dd/yyyy`
    fn default() -> Self {
        DateFormat {
            source: "mm/dd/yyyy".to_owned(),
            separators: vec![String::new(), "/".to_owned(), "/".to_owned(), String::new()],
            parts: vec![Part::MonthPadded, Part::DayPadded, Part::Year],
        }
    }
}

impl FromStr for DateFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (_, tokens) = all_consuming(many0(token))(s)?;

        let mut separators = vec![String::new()];
        let mut parts = Vec::new();

        for token in tokens {
            match token {
                Token::Part(part) => {
                    parts.push(part);
                    separators.push(String::new());
                }
                Token::Literal(c) => {
                    if let Some(last) = separators.last_mut() {
                        last.push(c);
                    }
                }
            }
        }

        if parts.is_empty() {
            return Err(Error::new(ErrorKind::FormatParse, "Invalid date format."));
        }

        Ok(DateFormat {
            source: s.to_owned(),
            separators,
            parts,
        })
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
