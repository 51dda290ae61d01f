use serde::Serialize;

use crate::{models::Film, services::providers::Catalog};

/// Outcome of replacing a list's contents with a set of films
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SyncReport {
    pub success: bool,
    pub total_films: usize,
    pub matched: usize,
    pub not_matched: Vec<String>,
    pub added: usize,
}

impl SyncReport {
    fn new(total_films: usize) -> Self {
        Self {
            success: false,
            total_films,
            matched: 0,
            not_matched: Vec::new(),
            added: 0,
        }
    }
}

/// Replaces the contents of a catalog list with the given films.
///
/// Films are matched against the catalog one at a time in input order, then
/// all matches are added in a single bulk call. A failed clear aborts the
/// whole run; failed searches only mark the film as unmatched.
pub async fn update_list_with_films(
    catalog: &dyn Catalog,
    list_id: u64,
    films: &[Film],
    clear_first: bool,
) -> SyncReport {
    let mut report = SyncReport::new(films.len());

    if films.is_empty() {
        report.success = true;
        return report;
    }

    if clear_first {
        match catalog.clear_list(list_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::error!(list_id, "List clear refused, aborting sync");
                return report;
            }
            Err(error) => {
                tracing::error!(list_id, error = %error, "List clear failed, aborting sync");
                return report;
            }
        }
    }

    let mut movie_ids = Vec::with_capacity(films.len());
    for film in films {
        let Some(title) = film.title.as_deref() else {
            tracing::warn!(year = ?film.year, "Skipping film without a title");
            continue;
        };

        match catalog.search_movie(title, film.year).await {
            Ok(Some(movie)) => {
                movie_ids.push(movie.id);
                report.matched += 1;
            }
            Ok(None) => {
                report.not_matched.push(unmatched_label(title, film.year));
            }
            Err(error) => {
                tracing::warn!(title = %title, error = %error, "Catalog search failed");
                report.not_matched.push(unmatched_label(title, film.year));
            }
        }
    }

    if movie_ids.is_empty() {
        // nothing matched; the run itself still succeeded
        report.success = true;
        return report;
    }

    match catalog.add_movies(list_id, &movie_ids).await {
        Ok(true) => {
            report.added = movie_ids.len();
            report.success = true;
        }
        Ok(false) => {
            tracing::error!(list_id, movies = movie_ids.len(), "List add refused");
        }
        Err(error) => {
            tracing::error!(list_id, error = %error, "List add failed");
        }
    }

    report
}

fn unmatched_label(title: &str, year: Option<i32>) -> String {
    match year {
        Some(year) => format!("{title} ({year})"),
        None => format!("{title} (unknown)"),
    }
}
