extern crate datepick as lib;

use flexi_logger::{FileSpec, Logger};
use itertools::Itertools;
use lib::cmds::Cmd;
use lib::config::{load_suitable_config, parse_key, PartialOptions};
use lib::ctrl::{Controller, PickerController};
use lib::date::CalendarDate;
use lib::grid::{Cell, GRID_COLUMNS};
use lib::picker::Datepicker;
use lib::Options;
use std::io::{self, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use termion::event::Key;
use termion::style;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dp",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "Datepick - prints a month picker and replays keyboard input on it."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(short = "d", long = "date", help = "selected date, in the picker's format")]
    pub date: Option<String>,

    #[structopt(long = "view", help = "displayed month as YYYY-MM-DD, defaults to today")]
    pub view: Option<CalendarDate>,

    #[structopt(
        short = "m",
        long = "months",
        help = "months to move the view by",
        allow_hyphen_values = true
    )]
    pub months: Option<i32>,

    #[structopt(
        short = "k",
        long = "keys",
        help = "keys to replay, e.g. 'down,down,enter'",
        use_delimiter = true,
        parse(try_from_str = parse_key)
    )]
    pub keys: Vec<Key>,

    #[structopt(short = "l", long = "language", help = "language code such as 'en' or 'de'")]
    pub language: Option<String>,

    #[structopt(
        short = "w",
        long = "week-start",
        help = "first day of the week, 0 is Sunday",
        allow_hyphen_values = true
    )]
    pub week_start: Option<i64>,

    #[structopt(short = "f", long = "format", help = "date format such as 'dd.mm.yyyy'")]
    pub format: Option<String>,

    #[structopt(long = "start", help = "earliest selectable date")]
    pub start: Option<String>,

    #[structopt(long = "end", help = "latest selectable date")]
    pub end: Option<String>,

    #[structopt(long = "disable", help = "dates that cannot be selected", use_delimiter = true)]
    pub disable: Vec<String>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn explicit_options(&self) -> PartialOptions {
        PartialOptions {
            format: self.format.clone(),
            language: self.language.clone(),
            week_start: self.week_start,
            keyboard_navigation: None,
            start_date: self.start.clone(),
            end_date: self.end.clone(),
            dates_disabled: if self.disable.is_empty() {
                None
            } else {
                Some(self.disable.clone())
            },
        }
    }
}

fn render_cell(cell: &Cell, styled: bool) -> String {
    let text = format!("{:>3}", cell.day_num());
    if !styled {
        let marker = if cell.active {
            '*'
        } else if cell.focused {
            '>'
        } else {
            ' '
        };
        return format!("{}{}", text, marker);
    }

    let mut out = String::new();
    if !cell.is_current() || cell.disabled {
        out.push_str(&style::Faint.to_string());
    }
    if cell.today {
        out.push_str(&style::Bold.to_string());
    }
    if cell.active || cell.focused {
        out.push_str(&style::Invert.to_string());
    }
    if cell.disabled_date {
        out.push_str(&style::CrossedOut.to_string());
    }
    format!("{}{}{} ", out, text, style::Reset)
}

fn render(picker: &Datepicker, out: &mut impl Write, styled: bool) -> io::Result<()> {
    let prev = if picker.can_move_prev() { '<' } else { ' ' };
    let next = if picker.can_move_next() { '>' } else { ' ' };
    writeln!(out, "{} {:^26} {}", prev, picker.title(), next)?;

    let headers = picker
        .weekday_headers()
        .iter()
        .map(|(_, short)| format!("{:>3} ", short))
        .join("");
    writeln!(out, "{}", headers)?;

    let cells = picker.cells();
    for row in &cells.iter().chunks(GRID_COLUMNS) {
        let line = row.map(|cell| render_cell(cell, styled)).join("");
        writeln!(out, "{}", line)?;
    }

    if picker.date().is_some() {
        writeln!(out, "{}", picker.formatted_date())?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    std::panic::set_hook(Box::new(move |info| {
        println!("{}", style::Reset);

        println!("Datepick ran into a fatal error!");
        println!(
            "Consider filing an issue with a log file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let attributes = load_suitable_config(args.configfile.as_deref())?;

    let options = Options::builder()
        .attributes(attributes)
        .explicit(args.explicit_options())
        .build()?;

    let key_map = options.key_map.clone();

    let mut picker = Datepicker::new(options);
    picker.subscribe(|notification| log::info!("{:?}", notification));

    if let Some(view) = args.view {
        picker.show_month(view);
    }
    if args.date.is_some() {
        picker.update(args.date.as_deref());
    }
    if let Some(months) = args.months {
        picker.navigate_view(months);
    }

    let mut controller = Controller::new(&key_map, PickerController::default());
    for key in args.keys {
        match controller.handle(key, &mut picker) {
            Ok(Cmd::Noop) => {}
            Ok(cmd) => log::debug!("Ignored '{}'", cmd),
            Err(err) => log::warn!("{}", err),
        }
    }

    let stdout = io::stdout();
    let styled = termion::is_tty(&stdout);
    let mut out = stdout.lock();

    render(&picker, &mut out, styled)?;
    out.flush()?;

    Ok(())
}
