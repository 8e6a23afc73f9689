//! Tile catalogs: the immutable set of connection tiles a search may place.
//!
//! A tile-set is loaded once from configuration, where each tile is a section
//! named `<TileSet>.<index>` declaring up to two connection points. Loading is
//! all-or-nothing: a single malformed entry fails the whole tile-set.

pub mod ini;

use crate::constants::*;
use crate::direction::*;
use crate::error::CatalogError;
use crate::location::*;
use crate::socket::*;
use crate::tile::*;
use fnv::FnvHashMap;
use ini::*;
use itertools::Itertools;
use log::*;
use std::sync::{Arc, OnceLock};

/// Every connection tile of one named tile-set, ordered by tile index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionTileSet {
    name: String,
    tiles: Vec<ConnectionTile>,
}

impl ConnectionTileSet {
    pub fn new(name: impl Into<String>, tiles: Vec<ConnectionTile>) -> Self {
        ConnectionTileSet {
            name: name.into(),
            tiles,
        }
    }

    /// Parse the tile-set `tile_set` out of a configuration source.
    pub fn load(source: &str, tile_set: &str) -> Result<ConnectionTileSet, CatalogError> {
        let document = IniDocument::parse(source)?;
        Self::from_document(&document, tile_set)
    }

    pub fn from_document(
        document: &IniDocument,
        tile_set: &str,
    ) -> Result<ConnectionTileSet, CatalogError> {
        let sections = document
            .sections
            .iter()
            .filter(|section| {
                split_section_name(&section.name)
                    .map(|(prefix, _)| prefix.eq_ignore_ascii_case(tile_set))
                    .unwrap_or(false)
            })
            .collect_vec();

        if sections.is_empty() {
            return Err(CatalogError::UnknownTileSet {
                name: tile_set.to_string(),
            });
        }

        let mut tiles: Vec<ConnectionTile> = Vec::with_capacity(sections.len());
        for section in sections {
            let index = split_section_name(&section.name)
                .and_then(|(_, suffix)| suffix.parse::<u32>().ok())
                .ok_or_else(|| CatalogError::InvalidSectionIndex {
                    section: section.name.clone(),
                })?;

            if tiles.iter().any(|tile| tile.index == index) {
                return Err(CatalogError::DuplicateSection {
                    section: section.name.clone(),
                });
            }

            tiles.push(parse_tile(section, tile_set, index)?);
        }

        tiles.sort_by_key(|tile| tile.index);

        debug!("Loaded tile-set '{}' with {} tiles", tile_set, tiles.len());

        Ok(ConnectionTileSet::new(tile_set, tiles))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tiles(&self) -> &[ConnectionTile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Position of a tile within this set. Search nodes refer to tiles by
    /// this position.
    pub fn get(&self, position: usize) -> Option<&ConnectionTile> {
        self.tiles.get(position)
    }

    /// Look up a tile by its tile-set index.
    pub fn by_index(&self, index: u32) -> Option<&ConnectionTile> {
        self.tiles.iter().find(|tile| tile.index == index)
    }
}

/// All tile-sets found in a configuration source.
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    sets: FnvHashMap<String, Arc<ConnectionTileSet>>,
}

impl TileCatalog {
    /// Load every tile-set in `source`.
    ///
    /// Sections whose name does not end in `.<number>` are not tiles and are
    /// skipped.
    pub fn load_all(source: &str) -> Result<TileCatalog, CatalogError> {
        let document = IniDocument::parse(source)?;

        let names = document
            .sections
            .iter()
            .filter_map(|section| split_section_name(&section.name))
            .filter(|(_, suffix)| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
            .map(|(prefix, _)| prefix.to_string())
            .unique_by(|name| name.to_ascii_lowercase())
            .collect_vec();

        let mut sets = FnvHashMap::default();
        for name in names {
            let set = ConnectionTileSet::from_document(&document, &name)?;
            sets.insert(name.to_ascii_lowercase(), Arc::new(set));
        }

        debug!("Loaded tile catalog with {} tile-sets", sets.len());

        Ok(TileCatalog { sets })
    }

    /// Shared handle to a tile-set. Names ignore ASCII case.
    pub fn tile_set(&self, name: &str) -> Result<Arc<ConnectionTileSet>, CatalogError> {
        self.sets
            .get(&name.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| CatalogError::UnknownTileSet {
                name: name.to_string(),
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.sets.values().map(|set| set.name()).sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// A catalog parsed on first use and shared read-only afterwards.
///
/// Suitable for a `static`, so every search in the process reads the same
/// catalog without locking.
pub struct LazyCatalog {
    source: &'static str,
    catalog: OnceLock<TileCatalog>,
}

impl LazyCatalog {
    pub const fn new(source: &'static str) -> Self {
        LazyCatalog {
            source,
            catalog: OnceLock::new(),
        }
    }

    pub fn get(&self) -> Result<&TileCatalog, CatalogError> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog);
        }

        let loaded = TileCatalog::load_all(self.source)?;

        // A concurrent first use may have won the race; both parsed the same
        // source so either value is fine.
        Ok(self.catalog.get_or_init(|| loaded))
    }
}

/// Split `Cliff.12` into `("Cliff", "12")` at the last dot.
fn split_section_name(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once('.')
}

fn parse_tile(
    section: &IniSection,
    tile_set: &str,
    index: u32,
) -> Result<ConnectionTile, CatalogError> {
    let mut sockets = Vec::with_capacity(MAX_CONNECTION_POINTS);

    for point in 0..MAX_CONNECTION_POINTS {
        let key = format!("{}{}", CONNECTION_POINT_KEY, point);
        let coordinates = section.get(&key);
        let directions = section.get(&format!("{}{}", key, DIRECTIONS_KEY_SUFFIX));

        let missing = || CatalogError::MissingConnectionPoint {
            section: section.name.clone(),
            point,
        };

        let (coordinates, directions) = match (coordinates, directions) {
            (Some(c), Some(d)) => (c, d),
            (None, None) if point > 0 => break,
            _ => return Err(missing()),
        };

        let offset = parse_coordinates(coordinates).ok_or_else(|| {
            CatalogError::InvalidCoordinates {
                section: section.name.clone(),
                point,
                value: coordinates.to_string(),
            }
        })?;

        let connects_to =
            ConnectionMask::parse(directions).ok_or_else(|| CatalogError::InvalidDirections {
                section: section.name.clone(),
                point,
                value: directions.to_string(),
            })?;

        let side = match section.get(&format!("{}{}", key, SIDE_KEY_SUFFIX)) {
            Some(value) => value.parse::<Side>().map_err(|_| CatalogError::InvalidSide {
                section: section.name.clone(),
                point,
                value: value.to_string(),
            })?,
            None => Side::Front,
        };

        sockets.push(ConnectionSocket::new(offset, connects_to, side));
    }

    for key in section.keys() {
        if let Some(point) = connection_point_number(key) {
            if point >= MAX_CONNECTION_POINTS {
                warn!(
                    "[{}] ignoring {}: tiles support at most {} connection points",
                    section.name, key, MAX_CONNECTION_POINTS
                );
            }
        }
    }

    Ok(ConnectionTile::new(tile_set, index, sockets))
}

/// `ConnectionPoint3.Side` -> `Some(3)`.
fn connection_point_number(key: &str) -> Option<usize> {
    let rest = key
        .get(..CONNECTION_POINT_KEY.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(CONNECTION_POINT_KEY))
        .map(|_| &key[CONNECTION_POINT_KEY.len()..])?;
    let digits = rest.split('.').next()?;
    digits.parse().ok()
}

fn parse_coordinates(value: &str) -> Option<Point> {
    let (x, y) = value.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}
