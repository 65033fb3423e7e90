//! Positional CSV parsing for facility extracts.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use parkmap_core::{
    is_valid_coordinates, Availability, Coordinates, FacilityCatalog, Park, StallCounts, Toilet,
    ToiletAccessibility, ToiletFixtures,
};

use crate::columns::{park, toilet};
use crate::error::LoadError;

/// Returns the trimmed cell at `idx`, or `""` when the row is too short.
fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map_or("", str::trim)
}

fn count(record: &StringRecord, idx: usize) -> Option<u32> {
    field(record, idx).parse::<u32>().ok()
}

/// A row becomes a facility only with a name and usable coordinates.
fn is_materializable(name: &str, coordinates: &Coordinates) -> bool {
    !name.is_empty() && is_valid_coordinates(coordinates)
}

fn park_from_record(record: &StringRecord) -> Option<Park> {
    let park = Park {
        id: field(record, park::ID).to_owned(),
        name: field(record, park::NAME).to_owned(),
        address: field(record, park::ADDRESS).to_owned(),
        coordinates: Coordinates::new(
            field(record, park::LATITUDE),
            field(record, park::LONGITUDE),
        ),
    };
    is_materializable(&park.name, &park.coordinates).then_some(park)
}

fn toilet_from_record(record: &StringRecord) -> Option<Toilet> {
    let toilet = Toilet {
        id: field(record, toilet::ID).to_owned(),
        name: field(record, toilet::NAME).to_owned(),
        address: field(record, toilet::ADDRESS).to_owned(),
        coordinates: Coordinates::new(
            field(record, toilet::LATITUDE),
            field(record, toilet::LONGITUDE),
        ),
        fixtures: ToiletFixtures {
            men: StallCounts {
                total: count(record, toilet::MEN_TOTAL),
                urinal: count(record, toilet::MEN_URINAL),
                squat: count(record, toilet::MEN_SQUAT),
                western: count(record, toilet::MEN_WESTERN),
            },
            women: StallCounts {
                total: count(record, toilet::WOMEN_TOTAL),
                urinal: None,
                squat: count(record, toilet::WOMEN_SQUAT),
                western: count(record, toilet::WOMEN_WESTERN),
            },
            unisex: StallCounts {
                total: count(record, toilet::UNISEX_TOTAL),
                urinal: None,
                squat: count(record, toilet::UNISEX_SQUAT),
                western: count(record, toilet::UNISEX_WESTERN),
            },
            multifunction: count(record, toilet::MULTIFUNCTION),
        },
        accessibility: ToiletAccessibility {
            wheelchair: Availability::from_source(field(record, toilet::WHEELCHAIR)),
            baby_room: Availability::from_source(field(record, toilet::BABY_ROOM)),
            ostomy: Availability::from_source(field(record, toilet::OSTOMY)),
        },
    };
    is_materializable(&toilet.name, &toilet.coordinates).then_some(toilet)
}

/// Walks every data row (the header row is skipped), keeping the ones
/// `build` accepts.
///
/// Rows that cannot be decoded (for example invalid UTF-8) are dropped like
/// any other malformed row; only I/O failures abort the parse.
fn parse_records<R, T, F>(source: R, context: &str, mut build: F) -> Result<Vec<T>, LoadError>
where
    R: Read,
    F: FnMut(&StringRecord) -> Option<T>,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let mut kept = Vec::new();
    let mut dropped = 0usize;
    for result in reader.records() {
        match result {
            Ok(record) => match build(&record) {
                Some(item) => kept.push(item),
                None => {
                    tracing::debug!(
                        context,
                        line = record.position().map(csv::Position::line),
                        "dropping row without name or valid coordinates"
                    );
                    dropped += 1;
                }
            },
            Err(source) if source.is_io_error() => {
                return Err(LoadError::Csv {
                    context: context.to_owned(),
                    source,
                });
            }
            Err(error) => {
                tracing::warn!(context, error = %error, "dropping undecodable row");
                dropped += 1;
            }
        }
    }

    tracing::info!(context, kept = kept.len(), dropped, "parsed facility extract");
    Ok(kept)
}

/// Parses a park extract.
///
/// # Errors
///
/// Returns [`LoadError::Csv`] if the underlying reader fails.
pub fn parse_parks<R: Read>(source: R) -> Result<Vec<Park>, LoadError> {
    parse_records(source, "park extract", park_from_record)
}

/// Parses a public-toilet extract.
///
/// # Errors
///
/// Returns [`LoadError::Csv`] if the underlying reader fails.
pub fn parse_toilets<R: Read>(source: R) -> Result<Vec<Toilet>, LoadError> {
    parse_records(source, "toilet extract", toilet_from_record)
}

async fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses the park extract at `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, or
/// [`LoadError::Csv`] if parsing fails.
pub async fn read_parks_csv(path: &Path) -> Result<Vec<Park>, LoadError> {
    let bytes = read_file(path).await?;
    parse_parks(bytes.as_slice())
}

/// Reads and parses the toilet extract at `path`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, or
/// [`LoadError::Csv`] if parsing fails.
pub async fn read_toilets_csv(path: &Path) -> Result<Vec<Toilet>, LoadError> {
    let bytes = read_file(path).await?;
    parse_toilets(bytes.as_slice())
}

/// Loads parks, returning an empty list if the extract is unreadable.
pub async fn load_parks(path: &Path) -> Vec<Park> {
    read_parks_csv(path).await.unwrap_or_else(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to load park data");
        Vec::new()
    })
}

/// Loads toilets, returning an empty list if the extract is unreadable.
///
/// Uses the same soft-fail policy as [`load_parks`].
pub async fn load_toilets(path: &Path) -> Vec<Toilet> {
    read_toilets_csv(path).await.unwrap_or_else(|e| {
        tracing::error!(path = %path.display(), error = %e, "failed to load toilet data");
        Vec::new()
    })
}

/// Loads both extracts concurrently into a catalog.
pub async fn load_catalog(park_path: &Path, toilet_path: &Path) -> FacilityCatalog {
    let (parks, toilets) = tokio::join!(load_parks(park_path), load_toilets(toilet_path));
    FacilityCatalog::new(parks, toilets)
}
