//! Terminal output for cfgswitch: labelled messages and tables.
//!
//! Colors are disabled, in priority order, by:
//! 1. the `--no-color` flag
//! 2. `NO_COLOR` in the environment (any value)
//! 3. `TERM=dumb`
//! 4. stdout not being a terminal (in `auto` mode)

use anstream::{eprintln, println};
use anstyle::{AnsiColor, Color, Style};
use comfy_table::{Cell, ContentArrangement, Table, presets};
use std::io::IsTerminal;

/// Color mode for output
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Always,
    #[default]
    Auto,
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            _ => Err(format!("invalid color mode: {}", s)),
        }
    }
}

/// Message severity, rendered as a colored prefix
#[derive(Debug, Clone, Copy)]
enum Label {
    Ok,
    Warn,
    Error,
    Info,
}

impl Label {
    fn text(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Info => "INFO",
        }
    }

    fn color(self) -> AnsiColor {
        match self {
            Self::Ok => AnsiColor::Green,
            Self::Warn => AnsiColor::Yellow,
            Self::Error => AnsiColor::Red,
            Self::Info => AnsiColor::Cyan,
        }
    }
}

/// Resolved display settings
#[derive(Debug, Clone)]
pub struct Ui {
    pub color_enabled: bool,
}

impl Ui {
    pub fn new(mode: ColorMode, force_no_color: bool) -> Self {
        let color_enabled = Self::resolve_color(mode, force_no_color);

        if !color_enabled {
            anstream::ColorChoice::write_global(anstream::ColorChoice::Never);
        }

        Self { color_enabled }
    }

    fn resolve_color(mode: ColorMode, force_no_color: bool) -> bool {
        if force_no_color || std::env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
            return false;
        }

        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    fn style(&self, style: Style) -> Style {
        if self.color_enabled { style } else { Style::new() }
    }

    fn labelled(&self, label: Label, msg: &str) {
        let st = self.style(Style::new().fg_color(Some(Color::Ansi(label.color()))).bold());
        match label {
            Label::Error => eprintln!("{st}{}{st:#} {}", label.text(), msg),
            _ => println!("{st}{}{st:#} {}", label.text(), msg),
        }
    }

    pub fn ok(&self, msg: impl AsRef<str>) {
        self.labelled(Label::Ok, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.labelled(Label::Warn, msg.as_ref());
    }

    /// Printed to stderr
    pub fn err(&self, msg: impl AsRef<str>) {
        self.labelled(Label::Error, msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.labelled(Label::Info, msg.as_ref());
    }

    fn paint(&self, s: &str, style: Style) -> String {
        let st = self.style(style);
        if self.color_enabled {
            format!("{st}{s}{st:#}")
        } else {
            s.to_string()
        }
    }

    pub fn dim(&self, s: impl AsRef<str>) -> String {
        self.paint(
            s.as_ref(),
            Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))),
        )
    }

    pub fn bold(&self, s: impl AsRef<str>) -> String {
        self.paint(s.as_ref(), Style::new().bold())
    }

    pub fn icon_ok(&self) -> &'static str {
        if self.color_enabled { "✓" } else { "[OK]" }
    }

    pub fn icon_warn(&self) -> &'static str {
        if self.color_enabled { "⚠" } else { "[!]" }
    }

    pub fn icon_err(&self) -> &'static str {
        if self.color_enabled { "✗" } else { "[X]" }
    }

    /// Bordered table; plain markdown borders without color
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.load_preset(if self.color_enabled {
            presets::UTF8_FULL_CONDENSED
        } else {
            presets::ASCII_MARKDOWN
        });
        table
    }

    pub fn cell(&self, content: impl Into<String>) -> Cell {
        Cell::new(content.into())
    }

    pub fn header_cell(&self, content: impl Into<String>) -> Cell {
        let cell = Cell::new(content.into());
        if self.color_enabled {
            cell.add_attribute(comfy_table::Attribute::Bold)
        } else {
            cell
        }
    }

    /// Colored via comfy-table so column widths stay correct
    pub fn colored_cell(&self, content: impl Into<String>, color: AnsiColor) -> Cell {
        let cell = Cell::new(content.into());
        if self.color_enabled {
            cell.fg(comfy_color(color))
        } else {
            cell
        }
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        println!("{}", msg.as_ref());
    }

    pub fn newline(&self) {
        println!();
    }

    pub fn section(&self, title: impl AsRef<str>) {
        println!("{}", self.bold(title));
    }
}

fn comfy_color(color: AnsiColor) -> comfy_table::Color {
    match color {
        AnsiColor::Red | AnsiColor::BrightRed => comfy_table::Color::Red,
        AnsiColor::Green | AnsiColor::BrightGreen => comfy_table::Color::Green,
        AnsiColor::Yellow | AnsiColor::BrightYellow => comfy_table::Color::Yellow,
        AnsiColor::Cyan | AnsiColor::BrightCyan => comfy_table::Color::Cyan,
        AnsiColor::BrightBlack => comfy_table::Color::DarkGrey,
        _ => comfy_table::Color::Reset,
    }
}
