use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A rated-and-liked film in the top-rated view.
///
/// `rating` is on the public five-star scale. Absent fields are omitted from
/// JSON output entirely rather than serialized as null.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Film {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub rating: f64,
    pub url: String,
}

/// A watchlist entry. Fields come straight from the source and may be null.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WatchlistFilm {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub url: Option<String>,
}

/// Sort direction accepted by the listing endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn is_descending(self) -> bool {
        matches!(self, SortOrder::Desc)
    }
}

/// Sort keys available on the watchlist endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchlistSort {
    #[default]
    Title,
    Year,
}

impl WatchlistSort {
    pub fn compare(self, a: &WatchlistFilm, b: &WatchlistFilm) -> Ordering {
        match self {
            WatchlistSort::Title => {
                title_key(a.title.as_deref()).cmp(&title_key(b.title.as_deref()))
            }
            WatchlistSort::Year => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
        }
    }
}

/// Sort keys available on the top-rated endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopRatedSort {
    #[default]
    Rating,
    Title,
    Year,
}

impl TopRatedSort {
    pub fn compare(self, a: &Film, b: &Film) -> Ordering {
        match self {
            TopRatedSort::Rating => a.rating.total_cmp(&b.rating),
            TopRatedSort::Title => {
                title_key(a.title.as_deref()).cmp(&title_key(b.title.as_deref()))
            }
            TopRatedSort::Year => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
        }
    }
}

/// Case-insensitive title key; a missing title sorts as the empty string.
fn title_key(title: Option<&str>) -> String {
    title.unwrap_or_default().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(title: Option<&str>, year: Option<i32>, rating: f64) -> Film {
        Film {
            title: title.map(String::from),
            slug: "slug".to_string(),
            year,
            rating,
            url: "https://letterboxd.com/film/slug/".to_string(),
        }
    }

    #[test]
    fn test_film_omits_absent_fields() {
        let value = serde_json::to_value(film(None, None, 4.5)).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("title"));
        assert!(!object.contains_key("year"));
        assert_eq!(object["rating"], 4.5);
    }

    #[test]
    fn test_watchlist_film_serializes_nulls() {
        let entry = WatchlistFilm {
            title: None,
            year: None,
            url: None,
        };
        let value = serde_json::to_value(entry).unwrap();
        assert!(value["title"].is_null());
        assert!(value["year"].is_null());
        assert!(value["url"].is_null());
    }

    #[test]
    fn test_sort_enums_deserialize_lowercase() {
        assert_eq!(
            serde_json::from_str::<WatchlistSort>("\"year\"").unwrap(),
            WatchlistSort::Year
        );
        assert_eq!(
            serde_json::from_str::<TopRatedSort>("\"rating\"").unwrap(),
            TopRatedSort::Rating
        );
        assert_eq!(
            serde_json::from_str::<SortOrder>("\"desc\"").unwrap(),
            SortOrder::Desc
        );
        assert!(serde_json::from_str::<TopRatedSort>("\"director\"").is_err());
    }

    #[test]
    fn test_title_compare_is_case_insensitive() {
        let a = film(Some("apple"), None, 1.0);
        let b = film(Some("Banana"), None, 1.0);
        assert_eq!(TopRatedSort::Title.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_missing_title_sorts_first_ascending() {
        let missing = film(None, None, 1.0);
        let named = film(Some("Alien"), None, 1.0);
        assert_eq!(TopRatedSort::Title.compare(&missing, &named), Ordering::Less);
    }

    #[test]
    fn test_missing_year_sorts_as_zero() {
        let unknown = WatchlistFilm {
            title: Some("No Year".to_string()),
            year: None,
            url: None,
        };
        let dated = WatchlistFilm {
            title: Some("Dated".to_string()),
            year: Some(1999),
            url: None,
        };
        assert_eq!(WatchlistSort::Year.compare(&unknown, &dated), Ordering::Less);
    }

    #[test]
    fn test_rating_compare() {
        let low = film(Some("Low"), None, 3.5);
        let high = film(Some("High"), None, 5.0);
        assert_eq!(TopRatedSort::Rating.compare(&low, &high), Ordering::Less);
        assert_eq!(TopRatedSort::Rating.compare(&high, &low), Ordering::Greater);
        assert_eq!(TopRatedSort::Rating.compare(&low, &low), Ordering::Equal);
    }
}
