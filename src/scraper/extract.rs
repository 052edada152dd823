// extract.rs
//
// Detail page -> Listing. Every locator is optional: a missing element leaves
// the field at its default. Only a map widget carrying unreadable data fails
// the whole listing.

use crate::domain::listing::{Listing, Location};
use crate::scraper::{selector, text_of, ScraperError};
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

const PUBLISHED_LABEL: &str = "Опубликовано";
const TEL_PREFIX: &str = "tel:";
const MAILTO_PREFIX: &str = "mailto:";

const LOCATION_HEADING: &str = "Местоположение";
const OBJECT_TYPE_LABEL: &str = "Вид объекта";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocationField {
    Region,
    Locality,
    Address,
    RegionDistrict,
    Direction,
}

// Matched by `contains` against the first cell; first hit wins, so order matters
// ("Район области" must not be caught by anything above "Район").
const LOCATION_LABELS: [(&str, LocationField); 5] = [
    ("Область", LocationField::Region),
    ("Населенный пункт", LocationField::Locality),
    ("Адрес", LocationField::Address),
    ("Район", LocationField::RegionDistrict),
    ("Направление", LocationField::Direction),
];

pub fn extract_listing(url: &str, html: &str) -> Result<Listing, ScraperError> {
    let document = Html::parse_document(html);
    let mut listing = Listing::for_url(url);

    if let Some(text) = document
        .root_element()
        .text()
        .find(|t| t.contains(PUBLISHED_LABEL))
    {
        listing.published = published_value(text);
    }

    let title_sel = selector("h1.h-giant")?;
    if let Some(title) = document.select(&title_sel).next() {
        listing.title = text_of(title);
    }

    let price_sel = selector(".price-block .d-flex")?;
    if let Some(price) = document.select(&price_sel).next() {
        listing.price = text_of(price);
    }

    let agent_sel = selector(".agent-block strong")?;
    if let Some(name) = document.select(&agent_sel).next() {
        listing.agent.name = text_of(name);
    }

    let contacts_sel = selector(".object-contacts")?;
    let anchor_sel = selector("a[href]")?;
    if let Some(contacts) = document.select(&contacts_sel).next() {
        for href in contacts
            .select(&anchor_sel)
            .filter_map(|a| a.value().attr("href"))
        {
            if let Some(phone) = href.strip_prefix(TEL_PREFIX) {
                listing.agent.phone_numbers.push(phone.trim().to_string());
            } else if let Some(email) = href.strip_prefix(MAILTO_PREFIX) {
                listing.agent.email = email.trim().to_string();
            }
        }
    }

    extract_coordinates(&document, &mut listing.location)?;
    extract_location_rows(&document, &mut listing.location)?;
    extract_object_type(&document, &mut listing)?;

    Ok(listing)
}

/// "Опубликовано: 12.03.2021" -> "12.03.2021"
fn published_value(text: &str) -> String {
    let after = text
        .split_once(PUBLISHED_LABEL)
        .map(|(_, rest)| rest)
        .unwrap_or(text);

    after.trim_start().trim_start_matches(':').trim().to_string()
}

fn extract_coordinates(document: &Html, location: &mut Location) -> Result<(), ScraperError> {
    let map_sel = selector("#map")?;
    let data_sel = selector("div[data-center]")?;

    let Some(raw) = document
        .select(&map_sel)
        .next()
        .and_then(|map| map.select(&data_sel).next())
        .and_then(|div| div.value().attr("data-center"))
    else {
        return Ok(());
    };

    let data: Value = serde_json::from_str(raw)?;

    // The widget writes the key as "position." (trailing dot).
    let position = data
        .get("position.")
        .or_else(|| data.get("position"))
        .ok_or_else(|| ScraperError::MapPosition("no position object".to_string()))?;

    // x -> latitude, y -> longitude, as the site has always been read.
    location.latitude = coordinate(position, "x")?;
    location.longitude = coordinate(position, "y")?;

    Ok(())
}

fn coordinate(position: &Value, key: &str) -> Result<String, ScraperError> {
    match position.get(key) {
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(ScraperError::MapPosition(format!(
            "coordinate {key:?} is not a string or number: {other}"
        ))),
        None => Err(ScraperError::MapPosition(format!("missing coordinate {key:?}"))),
    }
}

/// Label and value of a row with exactly two `td` cells.
fn two_cells(row: ElementRef, cell_sel: &Selector) -> Option<(String, String)> {
    let cells: Vec<_> = row.select(cell_sel).collect();
    match cells.as_slice() {
        [label, value] => Some((text_of(*label), text_of(*value))),
        _ => None,
    }
}

/// First table inside the block that holds the "Местоположение" heading.
fn location_table<'a>(document: &'a Html, table_sel: &Selector) -> Option<ElementRef<'a>> {
    let heading_text = document.root_element().descendants().find(|node| {
        node.value()
            .as_text()
            .is_some_and(|text| text.contains(LOCATION_HEADING))
    })?;

    let block = heading_text.parent()?.parent().and_then(ElementRef::wrap)?;
    block.select(table_sel).next()
}

fn extract_location_rows(document: &Html, location: &mut Location) -> Result<(), ScraperError> {
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    let Some(table) = location_table(document, &table_sel) else {
        return Ok(());
    };

    for row in table.select(&row_sel) {
        let Some((label, value)) = two_cells(row, &cell_sel) else {
            continue;
        };
        let Some(&(_, field)) = LOCATION_LABELS.iter().find(|(l, _)| label.contains(*l)) else {
            continue;
        };

        let slot = match field {
            LocationField::Region => &mut location.region,
            LocationField::Locality => &mut location.locality,
            LocationField::Address => &mut location.address,
            LocationField::RegionDistrict => &mut location.region_district,
            LocationField::Direction => &mut location.direction,
        };
        // A repeated label overwrites the earlier row.
        *slot = value;
    }

    Ok(())
}

/// "Вид объекта" sits in the parameters table, not the location block, so it
/// is looked up across the whole page. First matching row wins.
fn extract_object_type(document: &Html, listing: &mut Listing) -> Result<(), ScraperError> {
    let row_sel = selector("tr")?;
    let cell_sel = selector("td")?;

    if let Some((_, value)) = document
        .select(&row_sel)
        .filter_map(|row| two_cells(row, &cell_sel))
        .find(|(label, _)| label.contains(OBJECT_TYPE_LABEL))
    {
        listing.object_type = value;
    }

    Ok(())
}
