use crate::models::{Film, SourceWatchlistEntry, UserFilms, WatchlistFilm};

/// Public site prefix film URLs are built from
const FILM_URL_BASE: &str = "https://letterboxd.com/film";

/// Extracts the rated-and-liked view from a user's film map.
///
/// A film qualifies only when it carries a positive rating and the liked
/// flag. Source ratings are on a 10-point scale and come out halved, on the
/// public five-star scale. Source order is preserved; later sorting relies
/// on it for tie-breaking.
pub fn rated_and_liked_films(films: &UserFilms) -> Vec<Film> {
    films
        .movies
        .iter()
        .filter_map(|(slug, film)| {
            let rating = film.rating.filter(|&rating| rating > 0)?;
            if !film.liked {
                return None;
            }

            Some(Film {
                title: film.name.clone(),
                slug: slug.clone(),
                year: film.year,
                rating: f64::from(rating) / 2.0,
                url: format!("{FILM_URL_BASE}/{slug}/"),
            })
        })
        .collect()
}

/// Projects one watchlist entry into its response shape.
///
/// The slug is unused but kept for signature symmetry with the rated-films
/// extraction; watchlist URLs come from the source verbatim.
pub fn normalize_watchlist_film(_slug: &str, entry: &SourceWatchlistEntry) -> WatchlistFilm {
    WatchlistFilm {
        title: entry.name.clone(),
        year: entry.year,
        url: entry.url.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Film-map fixtures are parsed from raw JSON rather than `json!`; the
    // macro's sorted Map would alphabetize the slugs and destroy the source
    // order these tests assert on.
    fn films_fixture() -> UserFilms {
        serde_json::from_str(
            r#"{
                "movies": {
                    "the-godfather": {"name": "The Godfather", "year": 1972, "rating": 10, "liked": true},
                    "the-room": {"name": "The Room", "year": 2003, "rating": 8, "liked": false},
                    "skyfall": {"name": "Skyfall", "year": 2012, "rating": 0, "liked": true},
                    "unrated-gem": {"name": "Unrated Gem", "year": 2019, "liked": true},
                    "dune": {"name": "Dune", "year": 2021, "rating": 9, "liked": true}
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_includes_only_rated_and_liked() {
        let films = rated_and_liked_films(&films_fixture());
        let titles: Vec<_> = films.iter().map(|f| f.title.as_deref().unwrap()).collect();
        assert_eq!(titles, vec!["The Godfather", "Dune"]);
    }

    #[test]
    fn test_rating_is_halved() {
        let films = rated_and_liked_films(&films_fixture());
        assert_eq!(films[0].rating, 5.0);
        assert_eq!(films[1].rating, 4.5);
    }

    #[test]
    fn test_minimum_rating_converts_to_half_star() {
        let films: UserFilms = serde_json::from_str(
            r#"{"movies": {"obscure": {"name": "Obscure", "rating": 1, "liked": true}}}"#,
        )
        .unwrap();
        assert_eq!(rated_and_liked_films(&films)[0].rating, 0.5);
    }

    #[test]
    fn test_url_is_built_from_slug() {
        let films = rated_and_liked_films(&films_fixture());
        assert_eq!(films[0].slug, "the-godfather");
        assert_eq!(films[0].url, "https://letterboxd.com/film/the-godfather/");
    }

    #[test]
    fn test_missing_title_still_included() {
        let films: UserFilms =
            serde_json::from_str(r#"{"movies": {"mystery-film": {"rating": 7, "liked": true}}}"#)
                .unwrap();

        let extracted = rated_and_liked_films(&films);
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].title, None);
        assert_eq!(extracted[0].rating, 3.5);
    }

    #[test]
    fn test_source_order_is_preserved() {
        let films: UserFilms = serde_json::from_str(
            r#"{
                "movies": {
                    "zulu": {"name": "Zulu", "rating": 6, "liked": true},
                    "alpha": {"name": "Alpha", "rating": 8, "liked": true},
                    "mike": {"name": "Mike", "rating": 7, "liked": true}
                }
            }"#,
        )
        .unwrap();

        let slugs: Vec<_> = rated_and_liked_films(&films)
            .into_iter()
            .map(|f| f.slug)
            .collect();
        assert_eq!(slugs, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_empty_film_map() {
        assert!(rated_and_liked_films(&UserFilms::default()).is_empty());
    }

    #[test]
    fn test_normalize_watchlist_film_copies_fields() {
        let entry: SourceWatchlistEntry = serde_json::from_value(json!({
            "name": "Dune: Part Two",
            "year": 2024,
            "url": "https://letterboxd.com/film/dune-part-two/"
        }))
        .unwrap();

        let film = normalize_watchlist_film("dune-part-two", &entry);
        assert_eq!(film.title.as_deref(), Some("Dune: Part Two"));
        assert_eq!(film.year, Some(2024));
        assert_eq!(
            film.url.as_deref(),
            Some("https://letterboxd.com/film/dune-part-two/")
        );
    }

    #[test]
    fn test_normalize_watchlist_film_passes_through_absent_fields() {
        let entry: SourceWatchlistEntry = serde_json::from_value(json!({})).unwrap();
        let film = normalize_watchlist_film("unknown", &entry);
        assert_eq!(film.title, None);
        assert_eq!(film.year, None);
        assert_eq!(film.url, None);
    }
}
