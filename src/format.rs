//! Display formatting for user records. Pure functions, no state.

use chrono::{DateTime, NaiveDate};

use crate::api::UserRecord;

/// Which name part the list shows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    #[default]
    FirstName,
    LastName,
}

impl DisplayMode {
    /// Interpret a select value: `"first_name"` shows first names, anything else last names.
    pub fn from_select_value(value: &str) -> Self {
        if value == "first_name" {
            Self::FirstName
        } else {
            Self::LastName
        }
    }

    pub fn as_select_value(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::FirstName => Self::LastName,
            Self::LastName => Self::FirstName,
        }
    }
}

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The name part selected by `mode`.
pub fn display_name(user: &UserRecord, mode: DisplayMode) -> &str {
    match mode {
        DisplayMode::FirstName => &user.name.first,
        DisplayMode::LastName => &user.name.last,
    }
}

/// "Title First Last", each part capitalized.
pub fn full_name(user: &UserRecord) -> String {
    [&user.name.title, &user.name.first, &user.name.last]
        .iter()
        .map(|s| capitalize_first(s))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Single-line address: "number street, city, state, country, postcode".
pub fn address_line(user: &UserRecord) -> String {
    let l = &user.location;
    format!(
        "{} {}, {}, {}, {}, {}",
        l.street.number, l.street.name, l.city, l.state, l.country, l.postcode
    )
}

/// Date of birth as `M/D/YYYY`; unparseable values are shown verbatim.
pub fn format_dob(raw: &str) -> String {
    let t = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return dt.date_naive().format("%-m/%-d/%Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(t, "%Y-%m-%d") {
        return d.format("%-m/%-d/%Y").to_string();
    }
    t.to_string()
}

/// `YYYY-MM-DD` prefix of the stored date, offered as edit default.
pub fn dob_edit_default(raw: &str) -> String {
    raw.chars().take(10).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Location, Name, Street};

    fn sample() -> UserRecord {
        UserRecord {
            gender: "male".into(),
            name: Name {
                title: "mr".into(),
                first: "john".into(),
                last: "doe".into(),
            },
            location: Location {
                street: Street {
                    number: "12".into(),
                    name: "Elm St".into(),
                },
                city: "Springfield".into(),
                state: "Oregon".into(),
                country: "United States".into(),
                postcode: "97477".into(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("female"), "Female");
        assert_eq!(capitalize_first("élise"), "Élise");
        assert_eq!(capitalize_first("MALE"), "MALE");
    }

    #[test]
    fn names_and_address() {
        let u = sample();
        assert_eq!(display_name(&u, DisplayMode::FirstName), "john");
        assert_eq!(display_name(&u, DisplayMode::LastName), "doe");
        assert_eq!(full_name(&u), "Mr John Doe");
        assert_eq!(
            address_line(&u),
            "12 Elm St, Springfield, Oregon, United States, 97477"
        );
    }

    #[test]
    fn select_value_parsing() {
        assert_eq!(DisplayMode::from_select_value("first_name"), DisplayMode::FirstName);
        assert_eq!(DisplayMode::from_select_value("last_name"), DisplayMode::LastName);
        assert_eq!(DisplayMode::from_select_value("anything"), DisplayMode::LastName);
    }

    #[test]
    fn dob_formats() {
        assert_eq!(format_dob("1993-07-20T09:44:18.674Z"), "7/20/1993");
        assert_eq!(format_dob("2001-12-03"), "12/3/2001");
        assert_eq!(format_dob("someday"), "someday");
        assert_eq!(dob_edit_default("1993-07-20T09:44:18.674Z"), "1993-07-20");
    }
}
