use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Post entity - a short text entry identified by its name and author.
///
/// The serde representation is also the wire form stored in the index
/// lists and returned over HTTP: `post_name` and `author` as plain text,
/// `date` as `DD.MM.YY`. Neither `name` nor `author` is unique; many
/// posts can share either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "post_name")]
    pub name: String,
    #[serde(with = "wire_date")]
    pub date: NaiveDate,
    pub author: String,
}

impl Post {
    pub fn new(name: impl Into<String>, author: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            author: author.into(),
        }
    }

    /// Parse a date in the wire format (`DD.MM.YY`, e.g. `01.01.20`).
    ///
    /// No time-of-day or timezone is carried; callers treating the result
    /// as an instant should read it as UTC midnight.
    pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(input, wire_date::FORMAT)
    }
}

/// Serde adapter for the `DD.MM.YY` date field.
mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub(super) const FORMAT: &str = "%d.%m.%y";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
    }
}
