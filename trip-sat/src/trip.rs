//! The trip description which is formalised into a constraint problem.
//!
//! Every field is optional and unknown fields are ignored. A list which is present but empty is
//! treated the same as an absent one, as is a zero budget or duration.
use serde::de::Error as _;
use serde::Deserialize;
use serde::Serialize;

use crate::formalisation::defaults;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Trip {
    /// Only used to label log messages.
    pub destination: Option<String>,
    #[serde(alias = "startDate")]
    pub start_date: Option<String>,
    #[serde(alias = "endDate")]
    pub end_date: Option<String>,
    pub budget: Option<f64>,
    /// The length of the trip in days.
    pub duration: Option<i64>,
    pub preferences: Option<Vec<String>>,
    pub hotels: Option<Vec<Hotel>>,
    pub attractions: Option<Vec<Attraction>>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Hotel {
    #[serde(alias = "pricePerNight")]
    pub price_per_night: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Attraction {
    pub name: Option<String>,
    pub category: Option<String>,
}

impl Trip {
    /// Parses a trip from a JSON document. The document has to be a JSON object.
    pub fn from_json(text: &str) -> Result<Trip, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom(
                "a trip description must be a JSON object",
            ));
        }

        serde_json::from_value(value)
    }

    /// The start and end date, if both are given and non-empty.
    pub fn dates(&self) -> Option<(&str, &str)> {
        let start = self.start_date.as_deref().filter(|date| !date.is_empty())?;
        let end = self.end_date.as_deref().filter(|date| !date.is_empty())?;
        Some((start, end))
    }

    /// The budget, if one is given and it is not zero.
    pub fn budget(&self) -> Option<f64> {
        self.budget.filter(|&budget| budget != 0.0)
    }

    /// The duration as given, if it is not zero.
    pub fn duration(&self) -> Option<i64> {
        self.duration.filter(|&duration| duration != 0)
    }

    /// The duration used for cost estimates; a missing duration counts as
    /// [`defaults::DURATION_DAYS`], but an explicit zero is kept.
    pub fn duration_or_default(&self) -> i64 {
        self.duration.unwrap_or(defaults::DURATION_DAYS)
    }

    pub fn preferences(&self) -> &[String] {
        self.preferences.as_deref().unwrap_or_default()
    }

    pub fn hotels(&self) -> &[Hotel] {
        self.hotels.as_deref().unwrap_or_default()
    }

    pub fn attractions(&self) -> &[Attraction] {
        self.attractions.as_deref().unwrap_or_default()
    }

    /// A short label for log messages.
    pub fn label(&self) -> &str {
        self.destination.as_deref().unwrap_or("unnamed trip")
    }
}

impl Hotel {
    /// The nightly price, or [`defaults::NIGHTLY_RATE`] if the hotel does not state one.
    pub fn price_per_night(&self) -> f64 {
        self.price_per_night.unwrap_or(defaults::NIGHTLY_RATE)
    }
}

impl Attraction {
    /// The category, or the empty string if none is given.
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or_default()
    }

    /// Whether the category mentions a museum or culture, ignoring case.
    pub fn is_cultural(&self) -> bool {
        let category = self.category().to_lowercase();
        category.contains("museum") || category.contains("cultural")
    }
}
