use crate::domain::listing::{Listing, Location};
use crate::scraper::{extract_listing, ScraperError};
use crate::tests::utils::{detail_page_html, detail_url, sample_listing};

#[test]
fn extracts_every_field_from_a_full_detail_page() -> Result<(), Box<dyn std::error::Error>> {
    let listing = extract_listing(&detail_url(2451234), &detail_page_html())?;

    assert_eq!(listing, sample_listing("2451234"));
    Ok(())
}

#[test]
fn empty_page_yields_default_listing() -> Result<(), Box<dyn std::error::Error>> {
    let url = detail_url(77);
    let listing = extract_listing(&url, "<html><body><p>Объявление снято</p></body></html>")?;

    assert_eq!(listing.id, "77");
    assert_eq!(listing.url, url);
    assert!(listing.agent.phone_numbers.is_empty());
    assert_eq!(listing.agent.email, "");
    assert_eq!(listing.location, Location::default());
    assert_eq!(
        Listing {
            id: listing.id.clone(),
            url: listing.url.clone(),
            ..Default::default()
        },
        listing
    );
    Ok(())
}

#[test]
fn missing_map_leaves_coordinates_empty() -> Result<(), Box<dyn std::error::Error>> {
    let html = detail_page_html().replace(r#"id="map""#, r#"id="gallery""#);
    let listing = extract_listing(&detail_url(1), &html)?;

    assert_eq!(listing.location.latitude, "");
    assert_eq!(listing.location.longitude, "");
    assert_eq!(listing.location.region, "Минская область");
    Ok(())
}

#[test]
fn map_without_data_attribute_is_treated_as_absent() -> Result<(), Box<dyn std::error::Error>> {
    let html = r#"<div id="map"><div class="placeholder"></div></div>"#;
    let listing = extract_listing(&detail_url(1), html)?;

    assert_eq!(listing.location.coordinates(), ", ");
    Ok(())
}

#[test]
fn malformed_map_json_fails_the_listing() {
    let html = r#"<div id="map"><div data-center="{not json"></div></div>"#;
    let err = extract_listing(&detail_url(1), html).unwrap_err();

    assert!(matches!(err, ScraperError::MapData(_)));
}

#[test]
fn map_json_without_position_fails_the_listing() {
    let html = r#"<div id="map"><div data-center='{"zoom":14}'></div></div>"#;
    let err = extract_listing(&detail_url(1), html).unwrap_err();

    assert!(matches!(err, ScraperError::MapPosition(_)));
}

#[test]
fn numeric_coordinates_and_plain_position_key_are_accepted() -> Result<(), Box<dyn std::error::Error>>
{
    let html = r#"<div id="map"><div data-center='{"position":{"x":53.9,"y":27.5}}'></div></div>"#;
    let listing = extract_listing(&detail_url(1), html)?;

    assert_eq!(listing.location.latitude, "53.9");
    assert_eq!(listing.location.longitude, "27.5");
    Ok(())
}

#[test]
fn contacts_without_phones_or_email_stay_empty() -> Result<(), Box<dyn std::error::Error>> {
    let html = r#"<div class="object-contacts">
                    <a href="https://t.me/agent">Telegram</a>
                    <a>no href</a>
                  </div>"#;
    let listing = extract_listing(&detail_url(1), html)?;

    assert!(listing.agent.phone_numbers.is_empty());
    assert_eq!(listing.agent.email, "");
    Ok(())
}

#[test]
fn last_email_wins() -> Result<(), Box<dyn std::error::Error>> {
    let html = r#"<div class="object-contacts">
                    <a href="mailto:first@example.by">a</a>
                    <a href="tel:+375290000001">b</a>
                    <a href="mailto:second@example.by">c</a>
                  </div>"#;
    let listing = extract_listing(&detail_url(1), html)?;

    assert_eq!(listing.agent.email, "second@example.by");
    assert_eq!(listing.agent.phone_numbers, vec!["+375290000001"]);
    Ok(())
}

/// A "Местоположение" block around `rows`.
fn location_block(rows: &str) -> String {
    format!(
        r#"<div class="object-location">
             <h3>Местоположение</h3>
             <table>{rows}</table>
           </div>"#
    )
}

#[test]
fn unknown_row_labels_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let html = location_block(
        r#"<tr><td>Площадь участка</td><td>15 соток</td></tr>
           <tr><td>Этажность</td><td>2</td></tr>"#,
    );
    let listing = extract_listing(&detail_url(1), &html)?;

    assert_eq!(listing.location, Location::default());
    assert_eq!(listing.object_type, "");
    Ok(())
}

#[test]
fn rows_without_exactly_two_cells_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let html = location_block(
        r#"<tr><td>Область</td></tr>
           <tr><td>Адрес</td><td>ул. Лесная</td><td>доп.</td></tr>
           <tr><td>Населенный пункт</td><td>Ждановичи</td></tr>"#,
    );
    let listing = extract_listing(&detail_url(1), &html)?;

    assert_eq!(listing.location.region, "");
    assert_eq!(listing.location.address, "");
    assert_eq!(listing.location.locality, "Ждановичи");
    Ok(())
}

#[test]
fn address_rows_outside_the_location_block_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let agency = r#"<div class="agency-block">
                      <table>
                        <tr><td>Адрес</td><td>пр. Независимости, 1, офис агентства</td></tr>
                        <tr><td>Область</td><td>г. Минск</td></tr>
                      </table>
                    </div>"#;
    let location = location_block(r#"<tr><td>Адрес</td><td>ул. Лесная, 5</td></tr>"#);
    let listing = extract_listing(&detail_url(1), &format!("{agency}{location}"))?;

    assert_eq!(listing.location.address, "ул. Лесная, 5");
    assert_eq!(listing.location.region, "");
    Ok(())
}

#[test]
fn page_without_location_block_has_no_location_rows() -> Result<(), Box<dyn std::error::Error>> {
    let html = r#"<table>
                    <tr><td>Адрес</td><td>пр. Независимости, 1</td></tr>
                    <tr><td>Вид объекта</td><td>коттедж</td></tr>
                  </table>"#;
    let listing = extract_listing(&detail_url(1), html)?;

    assert_eq!(listing.location.address, "");
    assert_eq!(listing.object_type, "коттедж");
    Ok(())
}

#[test]
fn repeated_location_label_keeps_the_later_row() -> Result<(), Box<dyn std::error::Error>> {
    let html = location_block(
        r#"<tr><td>Адрес</td><td>ул. Лесная</td></tr>
           <tr><td>Адрес</td><td>ул. Лесная, 5</td></tr>"#,
    );
    let listing = extract_listing(&detail_url(1), &html)?;

    assert_eq!(listing.location.address, "ул. Лесная, 5");
    Ok(())
}

#[test]
fn price_block_without_flex_child_is_absent() -> Result<(), Box<dyn std::error::Error>> {
    let html = r#"<div class="price-block"><span>Договорная</span></div>"#;
    let listing = extract_listing(&detail_url(1), html)?;

    assert_eq!(listing.price, "");
    Ok(())
}
