//! Application state types and entry glue.
//!
//! Defines enums and structs that model the TUI state, the color theme, and
//! config file location helpers. The controller operations that mutate the
//! state live in [`controller`]; the event loop lives in [`update`]
//! (re-exported as `run`).
//!
pub mod controller;
pub mod keymap;
pub mod update;

use ratatui::layout::Rect;
use ratatui::style::Color;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::api::UserRecord;
use crate::format::{DisplayMode, dob_edit_default};
use crate::notify::Notifier;
use crate::store::{UserPatch, UserStore};
use crate::ui::users::UserRow;

pub use controller::{FetchTicket, NO_USERS_MESSAGE};

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// Typing into the count box.
    EditCount,
    /// Navigating the list.
    Normal,
    Modal,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub info: Color,
    pub danger: Color,
}

impl Theme {
    /// Dark default theme.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            info: Color::Blue,
            danger: Color::Red,
        }
    }

    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            info: Color::Rgb(0x89, 0xb4, 0xfa),         // blue
            danger: Color::Rgb(0xf3, 0x8b, 0xa8),       // red
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        let mut theme = Self::mocha();

        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let (key, val) = (key.trim(), val.trim());
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "info" => theme.info = color,
                    "danger" => theme.danger = color,
                    _ => {}
                }
            }
        }

        Some(theme)
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(&lower);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Color::Rgb(r, g, b))
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# randuser-manager theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // Named colors: best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::LightRed => "#FF6666".to_string(),
                Color::LightGreen => "#66FF66".to_string(),
                Color::LightYellow => "#FFFF66".to_string(),
                Color::LightBlue => "#6666FF".to_string(),
                Color::LightMagenta => "#FF66FF".to_string(),
                Color::LightCyan => "#66FFFF".to_string(),
                Color::White => "#FFFFFF".to_string(),
                Color::Indexed(_) => "reset".to_string(),
            }
        }

        let mut kv = |k: &str, v: Color| {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        };

        kv("text", self.text);
        kv("muted", self.muted);
        kv("title", self.title);
        kv("border", self.border);
        kv("header_bg", self.header_bg);
        kv("header_fg", self.header_fg);
        kv("status_bg", self.status_bg);
        kv("status_fg", self.status_fg);
        kv("highlight_fg", self.highlight_fg);
        kv("highlight_bg", self.highlight_bg);
        kv("info", self.info);
        kv("danger", self.danger);

        std::fs::write(path, buf)
    }

    /// Load the theme at `path`, or write the default there first if it is missing.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default theme");
        }
        t
    }
}

/// Resolve the config directory: explicit override, then XDG, then `~/.config`.
pub fn config_dir(override_dir: Option<&Path>) -> PathBuf {
    resolve_config_dir(
        override_dir,
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

fn resolve_config_dir(
    override_dir: Option<&Path>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Some(xdg) = xdg_config_home.filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg).join("randuser-manager");
    }
    if let Some(home) = home.filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".config").join("randuser-manager");
    }
    PathBuf::from(".")
}

/// Editable fields of the edit form, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditField {
    FirstName,
    LastName,
    Email,
    Phone,
    Cell,
    DateOfBirth,
    Gender,
    StreetNumber,
    StreetName,
    City,
    State,
    Country,
    Postcode,
}

impl EditField {
    pub const ALL: [EditField; 13] = [
        EditField::FirstName,
        EditField::LastName,
        EditField::Email,
        EditField::Phone,
        EditField::Cell,
        EditField::DateOfBirth,
        EditField::Gender,
        EditField::StreetNumber,
        EditField::StreetName,
        EditField::City,
        EditField::State,
        EditField::Country,
        EditField::Postcode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditField::FirstName => "First name",
            EditField::LastName => "Last name",
            EditField::Email => "Email",
            EditField::Phone => "Phone",
            EditField::Cell => "Cell",
            EditField::DateOfBirth => "Date of birth (YYYY-MM-DD)",
            EditField::Gender => "Gender",
            EditField::StreetNumber => "Street number",
            EditField::StreetName => "Street name",
            EditField::City => "City",
            EditField::State => "State",
            EditField::Country => "Country",
            EditField::Postcode => "Postcode",
        }
    }

    /// Value offered as the default in the form.
    pub fn current_value(self, user: &UserRecord) -> String {
        match self {
            EditField::FirstName => user.name.first.clone(),
            EditField::LastName => user.name.last.clone(),
            EditField::Email => user.email.clone(),
            EditField::Phone => user.phone.clone(),
            EditField::Cell => user.cell.clone(),
            EditField::DateOfBirth => dob_edit_default(&user.dob.date),
            EditField::Gender => user.gender.clone(),
            EditField::StreetNumber => user.location.street.number.clone(),
            EditField::StreetName => user.location.street.name.clone(),
            EditField::City => user.location.city.clone(),
            EditField::State => user.location.state.clone(),
            EditField::Country => user.location.country.clone(),
            EditField::Postcode => user.location.postcode.clone(),
        }
    }

    fn slot(self, patch: &mut UserPatch) -> &mut Option<String> {
        match self {
            EditField::FirstName => &mut patch.first,
            EditField::LastName => &mut patch.last,
            EditField::Email => &mut patch.email,
            EditField::Phone => &mut patch.phone,
            EditField::Cell => &mut patch.cell,
            EditField::DateOfBirth => &mut patch.dob,
            EditField::Gender => &mut patch.gender,
            EditField::StreetNumber => &mut patch.street_number,
            EditField::StreetName => &mut patch.street_name,
            EditField::City => &mut patch.city,
            EditField::State => &mut patch.state,
            EditField::Country => &mut patch.country,
            EditField::Postcode => &mut patch.postcode,
        }
    }
}

/// Form buffers for every [`EditField`], indexed like `EditField::ALL`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditForm {
    pub selected: usize,
    pub values: Vec<String>,
}

impl EditForm {
    /// Prefill the form from a record.
    pub fn for_user(user: &UserRecord) -> Self {
        Self {
            selected: 0,
            values: EditField::ALL.iter().map(|f| f.current_value(user)).collect(),
        }
    }

    pub fn field(&self) -> EditField {
        EditField::ALL[self.selected.min(EditField::ALL.len() - 1)]
    }

    pub fn value_mut(&mut self) -> Option<&mut String> {
        self.values.get_mut(self.selected)
    }

    /// Collapse the form into one patch; empty buffers leave their field unchanged.
    pub fn to_patch(&self) -> UserPatch {
        let mut patch = UserPatch::default();
        for (field, value) in EditField::ALL.iter().zip(&self.values) {
            *field.slot(&mut patch) = UserPatch::field(value);
        }
        patch
    }
}

/// Overlay dialogs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    /// Detail view of the selected record; `selected` is the focused action button.
    Detail { selected: usize },
    Edit(EditForm),
    Help { scroll: u16 },
}

pub struct AppState {
    pub started_at: Instant,
    pub store: UserStore,
    /// Rows currently on screen. Rebuilt from `store` on every change.
    pub rows: Vec<UserRow>,
    pub display_mode: DisplayMode,
    pub count_input: String,
    /// Record the detail editor operates on.
    pub selected_user: Option<usize>,
    /// Highlighted row in the list.
    pub cursor: usize,
    pub rows_per_page: usize,
    /// Screen area of the list table, recorded at render time for mouse hits.
    pub list_area: Rect,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    pub notifier: Notifier,
    pub theme: Theme,
    pub keymap: keymap::Keymap,
    /// Sequence number of the most recently issued fetch.
    pub request_seq: u64,
    /// Fetch whose result will be applied, if any.
    pub pending_request: Option<u64>,
    pub last_click: Option<(Instant, usize)>,
}

impl AppState {
    pub fn new(theme: Theme, keymap: keymap::Keymap, display_mode: DisplayMode) -> Self {
        Self {
            started_at: Instant::now(),
            store: UserStore::new(),
            rows: Vec::new(),
            display_mode,
            count_input: String::new(),
            selected_user: None,
            cursor: 0,
            rows_per_page: 10,
            list_area: Rect::default(),
            input_mode: InputMode::EditCount,
            modal: None,
            notifier: Notifier::default(),
            theme,
            keymap,
            request_seq: 0,
            pending_request: None,
            last_click: None,
        }
    }

    /// Build state with theme and keybindings from `dir`, creating default files if absent.
    pub fn from_config_dir(dir: &Path, display_mode: DisplayMode) -> Self {
        if let Err(e) = std::fs::create_dir_all(dir) {
            tracing::warn!(dir = %dir.display(), error = %e, "could not create config dir");
        }
        let theme = Theme::load_or_init(&dir.join("theme.conf"));
        let keymap = keymap::Keymap::load_or_init(&dir.join("keybinds.conf"));
        Self::new(theme, keymap, display_mode)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::mocha(), keymap::Keymap::default(), DisplayMode::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_dir_override_wins() {
        let dir = resolve_config_dir(
            Some(Path::new("/tmp/rum-conf")),
            Some("/xdg".into()),
            Some("/home/u".into()),
        );
        assert_eq!(dir, PathBuf::from("/tmp/rum-conf"));
    }

    #[test]
    fn config_dir_prefers_xdg_over_home() {
        let dir = resolve_config_dir(None, Some("/xdg".into()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/xdg/randuser-manager"));
    }

    #[test]
    fn config_dir_falls_back_to_home_then_cwd() {
        let dir = resolve_config_dir(None, Some("".into()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/home/u/.config/randuser-manager"));
        assert_eq!(resolve_config_dir(None, None, None), PathBuf::from("."));
    }
}
