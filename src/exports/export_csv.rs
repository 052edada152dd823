use crate::domain::listing::Listing;
use crate::errors::ExportError;
use encoding_rs::WINDOWS_1251;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Fixed column order. Downstream spreadsheets match on these names.
pub const CSV_HEADERS: [&str; 15] = [
    "ID объявления",
    "Дата публикации",
    "Название объявления",
    "Стоимость сдачи",
    "Имя владельца",
    "Контактные телефоны",
    "Контактный email",
    "GPS координаты",
    "Область",
    "Населенный пункт",
    "Район области",
    "Направление",
    "Адрес",
    "Вид объекта",
    "URL объявления",
];

pub fn csv_row(listing: &Listing) -> [String; 15] {
    [
        listing.id.clone(),
        listing.published.clone(),
        listing.title.clone(),
        listing.price.clone(),
        listing.agent.name.clone(),
        listing.agent.phones_literal(),
        listing.agent.email.clone(),
        listing.location.coordinates(),
        listing.location.region.clone(),
        listing.location.locality.clone(),
        listing.location.region_district.clone(),
        listing.location.direction.clone(),
        listing.location.address.clone(),
        listing.object_type.clone(),
        listing.url.clone(),
    ]
}

/// Semicolon-delimited CSV, still UTF-8 but already limited to characters
/// windows-1251 can hold. See [`cp1251_field`].
pub fn write_csv(listings: &[Listing]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .terminator(csv::Terminator::CRLF)
        .from_writer(vec![]);

    writer.write_record(CSV_HEADERS)?;
    for listing in listings {
        let row = csv_row(listing);
        let fields: Vec<Cow<str>> = row.iter().map(|f| cp1251_field(f)).collect();
        writer.write_record(fields.iter().map(|f| f.as_bytes()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;

    // Every field went in as a &str, so the buffer is valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Replaces characters windows-1251 lacks ("²", emoji) with `?`.
///
/// Done per field, before the writer quotes anything: the encoder's own
/// fallback (`&#178;`) ends in `;` and would split the column.
pub fn cp1251_field(value: &str) -> Cow<'_, str> {
    let (_, _, had_unmappable) = WINDOWS_1251.encode(value);
    if !had_unmappable {
        return Cow::Borrowed(value);
    }

    warn!(value, "Characters not representable in windows-1251 replaced with '?'");
    let mut buf = [0u8; 4];
    Cow::Owned(
        value
            .chars()
            .map(|c| {
                let (_, _, unmappable) = WINDOWS_1251.encode(c.encode_utf8(&mut buf));
                if unmappable {
                    '?'
                } else {
                    c
                }
            })
            .collect(),
    )
}

/// Windows-1251 bytes of text built from [`cp1251_field`]-cleaned fields.
pub fn encode_cp1251(text: &str) -> Vec<u8> {
    let (bytes, _, had_unmappable) = WINDOWS_1251.encode(text);
    if had_unmappable {
        warn!("Unexpected characters outside windows-1251 in CSV output");
    }
    bytes.into_owned()
}

pub fn save_to_csv(listings: &[Listing], path: &Path) -> Result<(), ExportError> {
    let text = write_csv(listings)?;
    fs::write(path, encode_cp1251(&text)).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
