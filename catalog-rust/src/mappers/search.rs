/// Search mapper
/// /search/multi result → SearchItem (movie / tv / person only)

use crate::types::catalog::{MediaType, SearchItem, SearchResults};
use crate::types::tmdb::{TmdbMultiItem, TmdbSearchPage};

use super::image::{proxied_image, year_of};

const SEARCH_RESULT_LIMIT: usize = 20;
const KNOWN_FOR_LIMIT: usize = 3;

fn map_person(item: &TmdbMultiItem) -> SearchItem {
    let name = item.name.clone().unwrap_or_default();
    let known_for = item
        .known_for
        .iter()
        .filter_map(|credit| match credit.media_type.as_deref() {
            Some("movie") => credit.title.clone(),
            _ => credit.name.clone(),
        })
        .filter(|t| !t.is_empty())
        .take(KNOWN_FOR_LIMIT)
        .collect();

    SearchItem {
        id: item.id,
        media_type: MediaType::Person,
        original_title: item.original_name.clone().unwrap_or_else(|| name.clone()),
        title: name,
        overview: item.known_for_department.clone().unwrap_or_default(),
        year: None,
        rating: None,
        vote_count: None,
        popularity: item.popularity,
        poster_path: item.profile_path.clone(),
        backdrop_path: None,
        genre_ids: Vec::new(),
        origin_countries: Vec::new(),
        known_for_department: item.known_for_department.clone(),
        known_for,
        poster: proxied_image(item.profile_path.as_deref(), "w300"),
        backdrop: None,
    }
}

fn map_title(media_type: MediaType, item: &TmdbMultiItem) -> SearchItem {
    let (title, original, date) = match media_type {
        MediaType::Movie => (&item.title, &item.original_title, &item.release_date),
        _ => (&item.name, &item.original_name, &item.first_air_date),
    };

    SearchItem {
        id: item.id,
        media_type,
        title: title.clone().unwrap_or_default(),
        original_title: original.clone().unwrap_or_default(),
        overview: item.overview.clone().unwrap_or_default(),
        year: year_of(date.as_deref()),
        rating: item.vote_average,
        vote_count: item.vote_count,
        popularity: item.popularity,
        poster_path: item.poster_path.clone(),
        backdrop_path: item.backdrop_path.clone(),
        genre_ids: item.genre_ids.clone(),
        origin_countries: item.origin_country.clone(),
        known_for_department: None,
        known_for: Vec::new(),
        poster: proxied_image(item.poster_path.as_deref(), "w500"),
        backdrop: proxied_image(item.backdrop_path.as_deref(), "w780"),
    }
}

pub fn map_search_item(item: &TmdbMultiItem) -> Option<SearchItem> {
    match item.media_type.as_deref()? {
        "movie" => Some(map_title(MediaType::Movie, item)),
        "tv" => Some(map_title(MediaType::Tv, item)),
        "person" => Some(map_person(item)),
        _ => None,
    }
}

pub fn map_search_page(payload: &TmdbSearchPage) -> SearchResults {
    SearchResults {
        page: payload.page,
        total_pages: payload.total_pages,
        total_results: payload.total_results,
        results: payload
            .results
            .iter()
            .filter_map(map_search_item)
            .take(SEARCH_RESULT_LIMIT)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_media_types_are_dropped() {
        let page: TmdbSearchPage = serde_json::from_value(json!({
            "page": 1, "total_pages": 1, "total_results": 3,
            "results": [
                {"id": 1, "media_type": "movie", "title": "Akira", "release_date": "1988-07-16", "poster_path": "/a.jpg"},
                {"id": 2, "media_type": "collection", "name": "Box"},
                {"id": 3, "media_type": "person", "name": "Hayao Miyazaki", "profile_path": "/m.jpg",
                 "known_for_department": "Directing",
                 "known_for": [{"media_type": "movie", "title": "Spirited Away"}, {"media_type": "tv", "name": "Conan"}]}
            ]
        })).unwrap();
        let results = map_search_page(&page);
        assert_eq!(results.results.len(), 2);

        let movie = &results.results[0];
        assert_eq!(movie.year.as_deref(), Some("1988"));
        assert_eq!(movie.poster.as_deref(), Some("/api/image/w500/a.jpg"));

        let person = &results.results[1];
        assert_eq!(person.media_type, MediaType::Person);
        assert_eq!(person.known_for, vec!["Spirited Away", "Conan"]);
        assert_eq!(person.poster.as_deref(), Some("/api/image/w300/m.jpg"));
        assert_eq!(person.original_title, "Hayao Miyazaki");
    }
}
