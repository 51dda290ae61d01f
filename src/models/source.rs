use indexmap::IndexMap;
use serde::Deserialize;

/// One entry from the source's rated-films export.
///
/// Ratings are on the source's 10-point half-star scale (a 9 is four and a
/// half stars). Every field tolerates absence; the export omits keys it has
/// no data for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceFilm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub liked: bool,
}

/// The slug-keyed rated-films map.
///
/// Keyed and iterated in the source's own order; downstream tie-breaking
/// relies on that order surviving deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilms {
    #[serde(default)]
    pub movies: IndexMap<String, SourceFilm>,
}

/// One entry from the source's watchlist export
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceWatchlistEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

/// The slug-keyed watchlist map, source-ordered like [`UserFilms`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserWatchlist {
    #[serde(default)]
    pub data: IndexMap<String, SourceWatchlistEntry>,
}

/// Profile counters; missing counters read as zero
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SourceStats {
    #[serde(default)]
    pub films: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub followers: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceProfile {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub stats: SourceStats,
}
