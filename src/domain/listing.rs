// src/domain/listing.rs

use serde::{Deserialize, Serialize};

/// One real-estate advertisement as scraped from a detail page.
///
/// Every field is optional in the markup; a field that was never found keeps
/// its default (empty string / empty list). There is no separate "missing"
/// marker, so exports always carry every key.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Trailing path segment of the listing URL.
    pub id: String,
    pub url: String,
    pub published: String,
    pub title: String,
    /// Raw price text, e.g. "1 200 р./мес." (not normalized).
    pub price: String,
    pub agent: Agent,
    pub location: Location,
    pub object_type: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub email: String,
    /// In document order.
    pub phone_numbers: Vec<String>,
}

/// Where the object is. Coordinates stay as the raw strings from the map widget.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub longitude: String,
    pub latitude: String,
    pub region: String,
    pub region_district: String,
    /// Route/compass descriptor used by some rural listings ("Минское направление").
    pub direction: String,
    pub address: String,
    pub locality: String,
}

impl Listing {
    /// Starts an empty listing for `url`, deriving the id from its last path segment.
    pub fn for_url(url: &str) -> Self {
        Listing {
            id: listing_id_from_url(url),
            url: url.to_string(),
            ..Default::default()
        }
    }
}

impl Agent {
    /// Phone list in the `['a', 'b']` form the CSV column has always used.
    pub fn phones_literal(&self) -> String {
        let quoted: Vec<String> = self
            .phone_numbers
            .iter()
            .map(|p| format!("'{p}'"))
            .collect();
        format!("[{}]", quoted.join(", "))
    }
}

impl Location {
    /// "<lat>, <long>", even when both are empty.
    pub fn coordinates(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }
}

/// "https://realt.by/rent-cottage-for-long/object/2451234/" -> "2451234"
pub fn listing_id_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}
