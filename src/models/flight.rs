//! Flight records supplied by a flight source.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::criteria::CabinClass;

/// Logo shown when a record's logo reference is missing or unusable.
pub const FALLBACK_LOGO_REF: &str = "images.unsplash.com/photo-1544620347-c4fd4a3d5957";

/// Flight duration in whole minutes.
///
/// Serialized as `"3h 30m"`; deserialization also accepts a bare minute count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightDuration(pub u32);

impl FlightDuration {
    /// Builds a duration from hours and minutes.
    #[must_use]
    pub const fn from_hm(hours: u32, minutes: u32) -> Self {
        Self(hours.saturating_mul(60).saturating_add(minutes))
    }

    /// Total minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Parses `"3h 30m"`, `"3h"`, `"45m"` or `"210"`.
    pub fn parse(input: &str) -> Result<Self, String> {
        let text = input.trim();
        if let Ok(minutes) = text.parse::<u32>() {
            return Ok(Self(minutes));
        }

        let mut total = 0u32;
        let mut seen = false;
        for part in text.split_whitespace() {
            let Some((unit_at, _)) = part.char_indices().last() else {
                continue;
            };
            let (number, unit) = part.split_at(unit_at);
            let value: u32 = number
                .parse()
                .map_err(|_| format!("Invalid duration '{input}'"))?;
            let minutes = match unit {
                "h" => value.checked_mul(60),
                "m" => Some(value),
                _ => None,
            };
            total = minutes
                .and_then(|minutes| total.checked_add(minutes))
                .ok_or_else(|| format!("Invalid duration '{input}'"))?;
            seen = true;
        }

        if !seen {
            return Err(format!("Invalid duration '{input}'"));
        }
        Ok(Self(total))
    }
}

impl fmt::Display for FlightDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for FlightDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FlightDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Minutes(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Minutes(minutes) => Ok(Self(minutes)),
            Raw::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

/// Clock-time (de)serialization: writes `"08:00 AM"`, reads 12-hour or 24-hour text.
pub mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const TWELVE_HOUR: &str = "%I:%M %p";
    const TWENTY_FOUR_HOUR: &str = "%H:%M";

    /// Parses `"08:00 AM"` or `"08:00"`.
    pub fn parse(text: &str) -> Result<NaiveTime, String> {
        let text = text.trim();
        NaiveTime::parse_from_str(text, TWELVE_HOUR)
            .or_else(|_| NaiveTime::parse_from_str(text, TWENTY_FOUR_HOUR))
            .map_err(|_| format!("Invalid time '{text}'"))
    }

    /// Formats as `"08:00 AM"`.
    #[must_use]
    pub fn format(time: &NaiveTime) -> String {
        time.format(TWELVE_HOUR).to_string()
    }

    /// Serde serializer.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    /// Serde deserializer.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }
}

/// A bookable flight as returned by a flight source. Read-only to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// Unique identifier within a result set
    pub id: u32,
    /// Operating airline
    pub airline: String,
    /// Scheduled departure
    #[serde(with = "clock")]
    pub departure_time: NaiveTime,
    /// Scheduled arrival
    #[serde(with = "clock")]
    pub arrival_time: NaiveTime,
    /// Block time
    pub duration: FlightDuration,
    /// Fare in whole currency units
    pub price: u32,
    /// Number of intermediate stops
    pub stops: u32,
    /// Cabin the fare applies to
    pub cabin_class: CabinClass,
    /// Logo location without scheme (e.g. `images.example.com/logo`)
    #[serde(default, alias = "airlineLogo")]
    pub airline_logo_ref: String,
}

impl FlightRecord {
    /// Logo URL, substituting the fallback logo when the reference is unusable.
    #[must_use]
    pub fn logo_url(&self) -> String {
        let reference = self
            .airline_logo_ref
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        let usable = !reference.is_empty()
            && !reference.contains(char::is_whitespace)
            && reference.split('/').next().is_some_and(|host| host.contains('.'));

        if usable {
            format!("https://{reference}")
        } else {
            format!("https://{FALLBACK_LOGO_REF}")
        }
    }

    /// Minutes from midnight of the departure day until arrival.
    ///
    /// Measured as departure plus duration so overnight arrivals order after same-day ones.
    #[must_use]
    pub fn arrival_offset_minutes(&self) -> u32 {
        use chrono::Timelike;
        (self.departure_time.hour() * 60 + self.departure_time.minute())
            .saturating_add(self.duration.minutes())
    }

    /// Human-readable stop count.
    #[must_use]
    pub fn stops_label(&self) -> String {
        match self.stops {
            0 => "Non-stop".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{n} stops"),
        }
    }
}
