use crate::cmds::Cmd;
use crate::constraints::{weekday_from_sunday0, Constraints};
use crate::date::CalendarDate;
use crate::error::{Error, ErrorKind, Result};
use crate::format::DateFormat;
use crate::locale::{Locale, DEFAULT_LANGUAGE};

use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::iter::FromIterator;
use std::path::{Path, PathBuf};

use termion::event::Key;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "DATEPICK_CONFIG_FILE";

pub const DEFAULT_WEEK_START: i64 = 1;

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(PathBuf::from_iter(
            [dir.as_path(), Path::new("datepick"), Path::new("config.toml")].iter(),
        ));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(PathBuf::from_iter(
            [home.as_path(), Path::new(".datepick.toml")].iter(),
        ));
    }

    locations
}

/// Reads `path`, or the first configuration file found in the usual places.
///
/// Without any configuration file an empty layer is returned.
pub fn load_suitable_config(path: Option<&Path>) -> Result<PartialOptions> {
    if let Some(path) = path {
        return PartialOptions::from_file(path);
    }

    for location in find_configfile_locations() {
        if location.is_file() {
            log::info!("Using configuration file {}", location.display());
            return PartialOptions::from_file(&location);
        }
    }

    log::debug!("No configuration file found, using defaults");
    Ok(PartialOptions::default())
}

pub fn default_key_map() -> KeyMap {
    let mut key_map = KeyMap::new();

    key_map.insert(Key::Left, Cmd::PrevDay);
    key_map.insert(Key::Right, Cmd::NextDay);
    key_map.insert(Key::Up, Cmd::PrevWeek);
    key_map.insert(Key::Down, Cmd::NextWeek);
    key_map.insert(Key::Char('h'), Cmd::PrevDay);
    key_map.insert(Key::Char('l'), Cmd::NextDay);
    key_map.insert(Key::Char('k'), Cmd::PrevWeek);
    key_map.insert(Key::Char('j'), Cmd::NextWeek);
    key_map.insert(Key::Esc, Cmd::Cancel);
    key_map.insert(Key::Char('\n'), Cmd::Commit);
    key_map.insert(Key::Char('\t'), Cmd::Blur);
    key_map.insert(Key::Char(' '), Cmd::Space);

    key_map
}

/// Reads a key name such as `left`, `enter` or a single character.
pub fn parse_key(name: &str) -> Result<Key> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(Key::Char(c));
    }

    match name.trim().to_lowercase().as_str() {
        "left" => Ok(Key::Left),
        "right" => Ok(Key::Right),
        "up" => Ok(Key::Up),
        "down" => Ok(Key::Down),
        "esc" | "escape" => Ok(Key::Esc),
        "enter" | "return" => Ok(Key::Char('\n')),
        "tab" => Ok(Key::Char('\t')),
        "space" => Ok(Key::Char(' ')),
        other => Err(Error::new(
            ErrorKind::KeyParse,
            &format!("'{}' is not a known key", other),
        )),
    }
}

/// One layer of picker options. Unset fields fall through to lower layers.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PartialOptions {
    pub format: Option<String>,
    pub language: Option<String>,
    pub week_start: Option<i64>,
    pub keyboard_navigation: Option<bool>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub dates_disabled: Option<Vec<String>>,
}

impl PartialOptions {
    pub fn defaults() -> Self {
        PartialOptions {
            format: Some(DateFormat::default().to_string()),
            language: Some(DEFAULT_LANGUAGE.to_owned()),
            week_start: Some(DEFAULT_WEEK_START),
            keyboard_navigation: Some(true),
            start_date: None,
            end_date: None,
            dates_disabled: None,
        }
    }

    pub fn from_locale(locale: &Locale) -> Self {
        PartialOptions {
            format: locale.format.map(str::to_owned),
            week_start: locale.week_start.map(i64::from),
            ..PartialOptions::default()
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Reads `date-*` attributes of a host element, `data-` prefixes are
    /// accepted. Unknown or malformed attributes are skipped.
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = PartialOptions::default();

        for (key, value) in attributes {
            let key = key.trim_start_matches("data-");
            let value = value.trim();
            match key {
                "date-format" => options.format = Some(value.to_owned()),
                "date-language" => options.language = Some(value.to_owned()),
                "date-week-start" => match value.parse() {
                    Ok(week_start) => options.week_start = Some(week_start),
                    Err(_) => log::warn!("Ignoring week start '{}'", value),
                },
                "date-keyboard-navigation" => match value.parse() {
                    Ok(enabled) => options.keyboard_navigation = Some(enabled),
                    Err(_) => log::warn!("Ignoring keyboard navigation '{}'", value),
                },
                "date-start-date" => options.start_date = Some(value.to_owned()),
                "date-end-date" => options.end_date = Some(value.to_owned()),
                "date-dates-disabled" => {
                    options.dates_disabled = Some(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|d| !d.is_empty())
                            .map(str::to_owned)
                            .collect(),
                    )
                }
                _ => {}
            }
        }

        options
    }

    /// Fills unset fields from `lower`.
    pub fn or(self, lower: PartialOptions) -> Self {
        PartialOptions {
            format: self.format.or(lower.format),
            language: self.language.or(lower.language),
            week_start: self.week_start.or(lower.week_start),
            keyboard_navigation: self.keyboard_navigation.or(lower.keyboard_navigation),
            start_date: self.start_date.or(lower.start_date),
            end_date: self.end_date.or(lower.end_date),
            dates_disabled: self.dates_disabled.or(lower.dates_disabled),
        }
    }
}

/// Resolved, immutable picker options.
#[derive(Clone, Debug)]
pub struct Options {
    pub format: DateFormat,
    pub language: String,
    pub locale: &'static Locale,
    pub keyboard_navigation: bool,
    pub constraints: Constraints,
    pub key_map: KeyMap,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            format: DateFormat::default(),
            language: DEFAULT_LANGUAGE.to_owned(),
            locale: Locale::default_locale(),
            keyboard_navigation: true,
            constraints: Constraints::default()
                .with_week_start(weekday_from_sunday0(DEFAULT_WEEK_START as u32)),
            key_map: default_key_map(),
        }
    }
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    pub fn parse_date(&self, input: &str) -> Option<CalendarDate> {
        self.format.parse_date(input, self.locale)
    }

    pub fn format_date(&self, date: &CalendarDate) -> String {
        self.format.format_date(date, self.locale)
    }
}

/// Merges option layers by priority: explicit, attributes, locale, defaults.
#[derive(Clone, Debug, Default)]
pub struct OptionsBuilder {
    attributes: PartialOptions,
    explicit: PartialOptions,
    key_map: Option<KeyMap>,
}

impl OptionsBuilder {
    pub fn attributes(mut self, attributes: PartialOptions) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn explicit(mut self, explicit: PartialOptions) -> Self {
        self.explicit = explicit;
        self
    }

    pub fn key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = Some(key_map);
        self
    }

    /// Fails only for a malformed date format.
    pub fn build(self) -> Result<Options> {
        let upper = self.explicit.or(self.attributes);

        let language = upper
            .language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned());
        let locale = Locale::lookup(&language).unwrap_or_else(|| {
            log::warn!(
                "Unknown language '{}', falling back to '{}'",
                language,
                DEFAULT_LANGUAGE
            );
            Locale::default_locale()
        });

        let merged = upper
            .or(PartialOptions::from_locale(locale))
            .or(PartialOptions::defaults());

        let format: DateFormat = match merged.format.as_deref() {
            Some(format) => format.parse()?,
            None => DateFormat::default(),
        };

        let parse = |raw: &str| {
            let date = format.parse_date(raw, locale);
            if date.is_none() {
                log::warn!("Ignoring date '{}' not matching format '{}'", raw, format);
            }
            date
        };

        let week_start = merged.week_start.unwrap_or(DEFAULT_WEEK_START).rem_euclid(7) as u32;

        let constraints = Constraints::default()
            .with_week_start(weekday_from_sunday0(week_start))
            .with_start(merged.start_date.as_deref().and_then(|d| parse(d)))
            .with_end(merged.end_date.as_deref().and_then(|d| parse(d)))
            .with_disabled(
                merged
                    .dates_disabled
                    .iter()
                    .flatten()
                    .filter_map(|d| parse(d.as_str())),
            );

        Ok(Options {
            language,
            locale,
            keyboard_navigation: merged.keyboard_navigation.unwrap_or(true),
            constraints,
            key_map: self.key_map.unwrap_or_else(default_key_map),
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::ymd;
    use chrono::Weekday;
    use std::ops::Bound;

    #[test]
    fn defaults() {
        let options = Options::builder().build().unwrap();
        assert_eq!(options.format.as_str(), "mm/dd/yyyy");
        assert_eq!(options.language, "en");
        assert!(options.keyboard_navigation);
        assert_eq!(options.constraints.week_start, Weekday::Mon);
        assert_eq!(options.constraints.start, Bound::Unbounded);
        assert_eq!(options.constraints.end, Bound::Unbounded);
        assert!(options.constraints.disabled.is_empty());
        assert_eq!(options.key_map.get(&Key::Left), Some(&Cmd::PrevDay));

        let default = Options::default();
        assert_eq!(default.format, options.format);
        assert_eq!(default.constraints, options.constraints);
    }

    #[test]
    fn key_names() {
        assert_eq!(parse_key("left").unwrap(), Key::Left);
        assert_eq!(parse_key("Escape").unwrap(), Key::Esc);
        assert_eq!(parse_key(" RETURN ").unwrap(), Key::Char('\n'));
        assert_eq!(parse_key("j").unwrap(), Key::Char('j'));
        let err = parse_key("f5").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::KeyParse));

        let key_map = default_key_map();
        assert_eq!(key_map.get(&parse_key("tab").unwrap()), Some(&Cmd::Blur));
    }

    #[test]
    fn locale_layer_sits_between_defaults_and_attributes() {
        let de = PartialOptions {
            language: Some("de-DE".to_owned()),
            ..PartialOptions::default()
        };
        let options = Options::builder().attributes(de.clone()).build().unwrap();
        assert_eq!(options.format.as_str(), "dd.mm.yyyy");
        assert_eq!(options.locale, Locale::lookup("de").unwrap());

        let attributes = PartialOptions {
            format: Some("yyyy-mm-dd".to_owned()),
            ..de
        };
        let options = Options::builder().attributes(attributes).build().unwrap();
        assert_eq!(options.format.as_str(), "yyyy-mm-dd");
    }

    #[test]
    fn explicit_beats_attributes() {
        let attributes = PartialOptions::from_attributes(vec![
            ("data-date-week-start", "0"),
            ("date-format", "dd/mm/yyyy"),
            ("date-keyboard-navigation", "false"),
        ]);
        let explicit = PartialOptions {
            week_start: Some(3),
            ..PartialOptions::default()
        };

        let options = Options::builder()
            .attributes(attributes)
            .explicit(explicit)
            .build()
            .unwrap();

        assert_eq!(options.constraints.week_start, Weekday::Wed);
        assert_eq!(options.format.as_str(), "dd/mm/yyyy");
        assert!(!options.keyboard_navigation);
    }

    #[test]
    fn week_start_wraps() {
        let build = |week_start| {
            Options::builder()
                .explicit(PartialOptions {
                    week_start: Some(week_start),
                    ..PartialOptions::default()
                })
                .build()
                .unwrap()
                .constraints
                .week_start
        };
        assert_eq!(build(7), Weekday::Sun);
        assert_eq!(build(8), Weekday::Mon);
        assert_eq!(build(-1), Weekday::Sat);
    }

    #[test]
    fn malformed_format_is_fatal() {
        let err = Options::builder()
            .explicit(PartialOptions {
                format: Some("--".to_owned()),
                ..PartialOptions::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::FormatParse));
    }

    #[test]
    fn option_dates_use_resolved_format() {
        let attributes = PartialOptions::from_attributes(vec![
            ("date-language", "de"),
            ("date-start-date", "01.02.2021"),
            ("date-end-date", "2021-12-31"),
            ("date-dates-disabled", "14.02.2021, ,not a date, 15.02.2021"),
        ]);
        let options = Options::builder().attributes(attributes).build().unwrap();

        assert_eq!(options.constraints.start_date(), Some(ymd(2021, 2, 1)));
        // unparsable, left unbounded
        assert_eq!(options.constraints.end_date(), None);
        assert_eq!(
            options.constraints.disabled.iter().copied().collect::<Vec<_>>(),
            vec![ymd(2021, 2, 14), ymd(2021, 2, 15)]
        );
    }

    #[test]
    fn unknown_language_falls_back() {
        let options = Options::builder()
            .explicit(PartialOptions {
                language: Some("tlh".to_owned()),
                ..PartialOptions::default()
            })
            .build()
            .unwrap();
        assert_eq!(options.locale, Locale::default_locale());
        assert_eq!(options.language, "tlh");
    }

    #[test]
    fn toml_layer() {
        let options: PartialOptions = toml::from_str(
            r#"
            format = "yyyy-mm-dd"
            week_start = 0
            dates_disabled = ["2021-12-24", "2021-12-25"]
            "#,
        )
        .unwrap();

        assert_eq!(options.format.as_deref(), Some("yyyy-mm-dd"));
        assert_eq!(options.week_start, Some(0));
        assert_eq!(options.language, None);
        assert_eq!(options.dates_disabled.map(|d| d.len()), Some(2));

        assert!(toml::from_str::<PartialOptions>("week_start = \"monday\"").is_err());
    }

    #[test]
    fn explicit_config_file() {
        let path = env::temp_dir().join(format!("datepick-test-{}.toml", std::process::id()));
        fs::write(&path, "language = \"de\"\nkeyboard_navigation = false\n").unwrap();

        let options = load_suitable_config(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(options.language.as_deref(), Some("de"));
        assert_eq!(options.keyboard_navigation, Some(false));

        assert!(load_suitable_config(Some(&path)).is_err());
    }
}
