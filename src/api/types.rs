//! Record types as delivered by the random-user API.
//!
//! Only the fields the manager shows or edits are modelled; anything else in
//! the payload is ignored by serde.

use serde::{Deserialize, Deserializer};

/// One synthetic person. Locally mutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub gender: String,
    pub name: Name,
    pub location: Location,
    #[serde(default)]
    pub email: String,
    pub dob: Dob,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cell: String,
    #[serde(default)]
    pub picture: Picture,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Name {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub street: Street,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    /// Numeric for some nationalities, alphanumeric for others.
    #[serde(default, deserialize_with = "string_or_number")]
    pub postcode: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Street {
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: String,
    #[serde(default)]
    pub name: String,
}

/// Date of birth. `date` is kept as received (RFC 3339) or as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Dob {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub age: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Picture {
    #[serde(default)]
    pub large: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub thumbnail: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_postcode_and_street_number_become_strings() {
        let raw = r#"{
            "gender": "female",
            "name": {"title": "Ms", "first": "Ada", "last": "Byron"},
            "location": {
                "street": {"number": 4242, "name": "Main St"},
                "city": "London", "state": "Greater London",
                "country": "United Kingdom", "postcode": 12345,
                "coordinates": {"latitude": "0", "longitude": "0"}
            },
            "email": "ada@example.com",
            "dob": {"date": "1815-12-10T00:00:00.000Z", "age": 36},
            "phone": "555", "cell": "556",
            "picture": {"large": "l.jpg", "medium": "m.jpg", "thumbnail": "t.jpg"},
            "nat": "GB"
        }"#;
        let u: UserRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(u.location.street.number, "4242");
        assert_eq!(u.location.postcode, "12345");
        assert_eq!(u.name.last, "Byron");
    }

    #[test]
    fn alphanumeric_postcode_is_kept_verbatim() {
        let raw = r#"{
            "name": {"first": "A", "last": "B"},
            "location": {"street": {"number": "12", "name": "X"}, "postcode": "EC1A 1BB"},
            "dob": {"date": "2000-01-01"}
        }"#;
        let u: UserRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(u.location.postcode, "EC1A 1BB");
        assert_eq!(u.location.street.number, "12");
        assert!(u.picture.large.is_empty());
    }
}
