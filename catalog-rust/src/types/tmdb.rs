/// TMDB API payloads (raw)
/// Only the fields the mappers read. TMDB sends null freely: Option, or null → default.

use serde::{Deserialize, Deserializer};

use super::catalog::{Country, NamedRef};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{ "results": [...] }` wrapper used by several append_to_response blocks
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TmdbResults<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<T>,
}

impl<T> Default for TmdbResults<T> {
    fn default() -> Self {
        Self { results: Vec::new() }
    }
}

// --- /search/multi ---

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbSearchPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_results: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<TmdbMultiItem>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbMultiItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_country: Vec<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub known_for: Vec<TmdbMultiItem>,
    #[serde(default)]
    pub character: Option<String>,
}

// --- /{movie|tv}/{id} ---

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbTitle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub number_of_seasons: Option<u32>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seasons: Vec<TmdbSeasonSummary>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub last_air_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub production_countries: Vec<Country>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_dates: Option<TmdbResults<TmdbReleaseDates>>,
    #[serde(default)]
    pub content_ratings: Option<TmdbResults<TmdbContentRating>>,
    #[serde(default)]
    pub credits: Option<TmdbCredits>,
    #[serde(default)]
    pub videos: Option<TmdbResults<TmdbVideo>>,
    #[serde(default)]
    pub images: Option<TmdbImages>,
    #[serde(default)]
    pub recommendations: Option<TmdbResults<TmdbMultiItem>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbSeasonSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season_number: u32,
    #[serde(default)]
    pub episode_count: Option<u32>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbReleaseDates {
    #[serde(default, deserialize_with = "null_as_default")]
    pub iso_3166_1: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_dates: Vec<TmdbCertification>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbCertification {
    #[serde(default)]
    pub certification: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbContentRating {
    #[serde(default, deserialize_with = "null_as_default")]
    pub iso_3166_1: String,
    #[serde(default)]
    pub rating: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbCredits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<TmdbCastPerson>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbCastPerson {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
    /// aggregate_credits only
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<TmdbRole>,
    #[serde(default)]
    pub total_episode_count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbRole {
    #[serde(default)]
    pub character: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbVideo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub video_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub official: bool,
    #[serde(default)]
    pub size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbImages {
    #[serde(default, deserialize_with = "null_as_default")]
    pub backdrops: Vec<TmdbImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profiles: Vec<TmdbImage>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbImage {
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: u32,
}

// --- /tv/{id}/season/{n} ---

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbSeason {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season_number: u32,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub episodes: Vec<TmdbEpisode>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbEpisode {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub episode_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub still_path: Option<String>,
}

// --- /person/{id} ---

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbPerson {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub also_known_as: Vec<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub images: Option<TmdbImages>,
    #[serde(default)]
    pub external_ids: Option<TmdbExternalIds>,
    #[serde(default)]
    pub combined_credits: Option<TmdbCombinedCredits>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbExternalIds {
    #[serde(default)]
    pub instagram_id: Option<String>,
    #[serde(default)]
    pub twitter_id: Option<String>,
    #[serde(default)]
    pub tiktok_id: Option<String>,
    #[serde(default)]
    pub youtube_id: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbCombinedCredits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<TmdbMultiItem>,
}
