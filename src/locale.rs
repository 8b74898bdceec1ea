use chrono::Weekday;
use phf::phf_map;

/// Day and month names of one language.
///
/// Day arrays start on Sunday.
#[derive(Debug, PartialEq, Eq)]
pub struct Locale {
    pub days: [&'static str; 7],
    pub days_short: [&'static str; 7],
    pub months: [&'static str; 12],
    pub months_short: [&'static str; 12],
    /// Preferred date format, overrides the default format
    pub format: Option<&'static str>,
    /// Preferred first day of the week (0 is Sunday)
    pub week_start: Option<u32>,
}

pub const DEFAULT_LANGUAGE: &str = "en";

const ENGLISH: Locale = Locale {
    days: [
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ],
    days_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    months_short: [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ],
    format: None,
    week_start: None,
};

const GERMAN: Locale = Locale {
    days: [
        "Sonntag",
        "Montag",
        "Dienstag",
        "Mittwoch",
        "Donnerstag",
        "Freitag",
        "Samstag",
    ],
    days_short: ["Son", "Mon", "Die", "Mit", "Don", "Fre", "Sam"],
    months: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    months_short: [
        "Jan", "Feb", "Mär", "Apr", "Mai", "Jun", "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
    ],
    format: Some("dd.mm.yyyy"),
    week_start: Some(1),
};

static DEFAULT_LOCALE: Locale = ENGLISH;

pub static LOCALES: phf::Map<&'static str, Locale> = phf_map! {
    "en" => ENGLISH,
    "de" => GERMAN,
};

impl Locale {
    /// Looks up `language`, falling back from `xx-YY` to `xx`.
    pub fn lookup(language: &str) -> Option<&'static Locale> {
        LOCALES.get(language).or_else(|| {
            language
                .split(|c| c == '-' || c == '_')
                .next()
                .and_then(|short| LOCALES.get(short))
        })
    }

    pub fn default_locale() -> &'static Locale {
        &DEFAULT_LOCALE
    }

    pub fn day_name(&self, day: Weekday) -> &'static str {
        self.days[day.num_days_from_sunday() as usize]
    }

    pub fn day_name_short(&self, day: Weekday) -> &'static str {
        self.days_short[day.num_days_from_sunday() as usize]
    }

    /// Month name, `month0` starting at 0 for January
    pub fn month_name(&self, month0: u32) -> &'static str {
        self.months[month0 as usize % 12]
    }

    pub fn month_name_short(&self, month0: u32) -> &'static str {
        self.months_short[month0 as usize % 12]
    }

    /// Column headers of a week beginning on `week_start` as (long, short) names.
    pub fn weekday_headers(&self, week_start: Weekday) -> Vec<(&'static str, &'static str)> {
        std::iter::successors(Some(week_start), |day| Some(day.succ()))
            .take(7)
            .map(|day| (self.day_name(day), self.day_name_short(day)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_falls_back_to_language() {
        assert_eq!(Locale::lookup("de-DE"), LOCALES.get("de"));
        assert_eq!(Locale::lookup("en_US"), LOCALES.get("en"));
        assert_eq!(Locale::lookup("xx"), None);
    }

    #[test]
    fn headers_rotate_with_week_start() {
        let en = Locale::default_locale();
        let monday: Vec<_> = en
            .weekday_headers(Weekday::Mon)
            .into_iter()
            .map(|(_, short)| short)
            .collect();
        assert_eq!(monday, ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);

        let sunday = en.weekday_headers(Weekday::Sun);
        assert_eq!(sunday[0], ("Sunday", "Sun"));
        assert_eq!(sunday[6], ("Saturday", "Sat"));
    }

    #[test]
    fn names() {
        let de = Locale::lookup("de").unwrap();
        assert_eq!(de.month_name(2), "März");
        assert_eq!(de.day_name(Weekday::Wed), "Mittwoch");
        assert_eq!(Locale::default_locale().month_name_short(11), "Dec");
    }
}
