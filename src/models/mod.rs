mod catalog;
mod film;
mod responses;
mod source;

pub use catalog::CatalogMovie;
pub use film::{Film, SortOrder, TopRatedSort, WatchlistFilm, WatchlistSort};
pub use responses::{TopRatedResponse, UserProfileResponse, UserStats, WatchlistResponse};
pub use source::{
    SourceFilm, SourceProfile, SourceStats, SourceWatchlistEntry, UserFilms, UserWatchlist,
};
