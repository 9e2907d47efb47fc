//! Colour theme for the lookup TUI.
//!
//! Themes are TOML files embedded in the binary via [`include_str!`] and
//! parsed with the `config` crate, so the application works without any
//! files on disk. Pick one by name with [`Theme::by_name`].
//!
//! Brand names are hashed to a stable index into the palette so the same
//! brand always gets the same header colour, whatever the result order.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

/// Names accepted by [`Theme::by_name`].
pub const THEME_NAMES: &[&str] = &["default", "gruvbox"];

// ---------------------------------------------------------------------------
// Raw (serde) types, mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawResults {
    group_header: RawStyle,
    summary: RawStyle,
    detail: RawStyle,
    label: RawStyle,
    count: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawNotice {
    title: RawStyle,
    body: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTabs {
    active: RawStyle,
    pending: RawStyle,
    failed: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSchedule {
    header: RawStyle,
    period: RawStyle,
    course: RawStyle,
    empty: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBrands {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    results: RawResults,
    notice: RawNotice,
    borders: RawBorders,
    tabs: RawTabs,
    schedule: RawSchedule,
    brands: RawBrands,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    pub group_header: Style,
    pub summary: Style,
    pub detail: Style,
    /// Field labels on roster cards.
    pub label: Style,
    /// Result-count line above the groups.
    pub count: Style,

    pub notice_title: Style,
    pub notice_body: Style,
    /// Title style for load failures.
    pub notice_error: Style,

    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,

    pub tab_active: Style,
    pub tab_pending: Style,
    pub tab_failed: Style,

    pub grid_header: Style,
    pub grid_period: Style,
    pub grid_course: Style,
    pub grid_empty: Style,

    brand_palette: Vec<Color>,
}

impl Theme {
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Look up an embedded theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            group_header: raw.results.group_header.into_style(),
            summary: raw.results.summary.into_style(),
            detail: raw.results.detail.into_style(),
            label: raw.results.label.into_style(),
            count: raw.results.count.into_style(),
            notice_title: raw.notice.title.into_style(),
            notice_body: raw.notice.body.into_style(),
            notice_error: raw.notice.error.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            tab_active: raw.tabs.active.into_style(),
            tab_pending: raw.tabs.pending.into_style(),
            tab_failed: raw.tabs.failed.into_style(),
            grid_header: raw.schedule.header.into_style(),
            grid_period: raw.schedule.period.into_style(),
            grid_course: raw.schedule.course.into_style(),
            grid_empty: raw.schedule.empty.into_style(),
            brand_palette: raw.brands.palette.iter().filter_map(|s| parse_color(s)).collect(),
        })
    }

    /// Group-header style for a brand: the header style with a stable
    /// palette colour.
    pub fn brand_style(&self, brand: &str) -> Style {
        if self.brand_palette.is_empty() {
            return self.group_header;
        }
        let idx = stable_hash(brand) % self.brand_palette.len();
        self.group_header.fg(self.brand_palette[idx])
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes()
        .fold(5381usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (`red`, `dark_gray`, …), `#rrggbb`, and
/// `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
