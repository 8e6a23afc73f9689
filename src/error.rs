use thiserror::Error;

/// A tile-set configuration that cannot be turned into a catalog.
///
/// Raised at load time only. A failed load never yields a partial tile-set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("line {line}: cannot parse `{content}`")]
    MalformedLine { line: usize, content: String },

    #[error("section [{section}] appears more than once")]
    DuplicateSection { section: String },

    #[error("section [{section}] does not end in a tile index")]
    InvalidSectionIndex { section: String },

    #[error("[{section}] ConnectionPoint{point}.Directions `{value}` must be 8 characters of 0/1")]
    InvalidDirections {
        section: String,
        point: usize,
        value: String,
    },

    #[error("[{section}] ConnectionPoint{point}.Side `{value}` must be `front` or `back`")]
    InvalidSide {
        section: String,
        point: usize,
        value: String,
    },

    #[error("[{section}] ConnectionPoint{point} `{value}` is not an `x,y` coordinate pair")]
    InvalidCoordinates {
        section: String,
        point: usize,
        value: String,
    },

    #[error("[{section}] ConnectionPoint{point} is missing its coordinates or directions")]
    MissingConnectionPoint { section: String, point: usize },

    #[error("no tile-set named `{name}`")]
    UnknownTileSet { name: String },
}

/// Why a search produced no chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Every reachable placement was explored without reaching the destination.
    #[error("no connection path found after {expanded} expansions")]
    NotFound { expanded: usize },

    /// A configured limit stopped the search before it reached a verdict.
    #[error("search budget exhausted after {expanded} expansions")]
    BudgetExhausted { expanded: usize },
}
