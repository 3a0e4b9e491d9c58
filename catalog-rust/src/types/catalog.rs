/// Normalized catalog records
/// Stable field names, independent of the TMDB schema

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    Person,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Person => "person",
        }
    }

    pub fn is_title(self) -> bool {
        matches!(self, MediaType::Movie | MediaType::Tv)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            "person" => Ok(MediaType::Person),
            _ => Err(()),
        }
    }
}

/// Value stored in the detail cache
#[derive(Debug, Clone)]
pub enum DetailRecord {
    Title(Box<TitleDetails>),
    Person(Box<PersonDetails>),
}

/// Which tier served a detail lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheSource {
    Memory,
    None,
}

/// Detail payload + cache indicator, as the API returns it
#[derive(Debug, Clone, Serialize)]
pub struct Cached<T> {
    #[serde(flatten)]
    pub data: T,
    pub cache: CacheSource,
}

// --- search ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub results: Vec<SearchItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub original_title: String,
    pub overview: String,
    pub year: Option<String>,
    pub rating: Option<f64>,
    pub vote_count: Option<u64>,
    pub popularity: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genre_ids: Vec<u32>,
    pub origin_countries: Vec<String>,
    pub known_for_department: Option<String>,
    pub known_for: Vec<String>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
}

// --- title details ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleDetails {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub original_title: String,
    pub tagline: Option<String>,
    pub overview: String,
    pub runtime: Option<u32>,
    pub episode_run_time: Vec<u32>,
    pub seasons_count: Option<u32>,
    pub episodes_count: Option<u32>,
    pub seasons: Vec<SeasonSummary>,
    pub status: Option<String>,
    pub release_date: Option<String>,
    pub end_date: Option<String>,
    pub genres: Vec<NamedRef>,
    pub countries: Vec<Country>,
    pub rating: Option<f64>,
    pub vote_count: Option<u64>,
    pub certification: Option<String>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub cast: Vec<CastMember>,
    pub popular_media: PopularMedia,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub id: u64,
    pub name: String,
    pub season_number: u32,
    pub episode_count: Option<u32>,
    pub air_date: Option<String>,
    pub overview: String,
    pub rating: Option<f64>,
    pub poster: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct PopularMedia {
    pub videos: Vec<Video>,
    pub backdrops: Vec<Backdrop>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub video_type: String,
    pub youtube_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Backdrop {
    pub image: Option<String>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub year: Option<String>,
    pub rating: Option<f64>,
    pub poster: Option<String>,
}

// --- season ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDetails {
    pub id: u64,
    pub name: String,
    pub season_number: u32,
    pub overview: String,
    pub air_date: Option<String>,
    pub episode_count: usize,
    pub poster: Option<String>,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: u64,
    pub episode_number: u32,
    pub name: String,
    pub air_date: Option<String>,
    pub runtime: Option<u32>,
    pub overview: String,
    pub still: Option<String>,
}

// --- cast page ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleCast {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub cast: Vec<CastCredit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CastCredit {
    pub id: u64,
    pub name: String,
    pub character: Option<String>,
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
    pub order: u32,
}

// --- person ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub id: u64,
    pub name: String,
    pub original_name: String,
    pub biography: String,
    pub known_for_department: Option<String>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub profile: Option<String>,
    pub profiles: Vec<String>,
    pub external: ExternalLinks,
    pub credits: Vec<PersonCredit>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ExternalLinks {
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub tiktok: Option<String>,
    pub youtube: Option<String>,
    pub imdb: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonCredit {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub year: Option<String>,
    pub character: Option<String>,
    pub popularity: f64,
    pub poster: Option<String>,
}

// --- shelf cards ---

/// Lightweight summary for shelf grids
#[derive(Debug, Clone, Serialize)]
pub struct TitleCard {
    #[serde(rename = "ref")]
    pub title_ref: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub id: u64,
    pub title: String,
    pub year: Option<String>,
    pub rating: Option<f64>,
    pub poster: Option<String>,
    pub href: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_round_trips_through_str() {
        for t in [MediaType::Movie, MediaType::Tv, MediaType::Person] {
            assert_eq!(t.as_str().parse::<MediaType>(), Ok(t));
        }
        assert!("anime".parse::<MediaType>().is_err());
        assert!(!MediaType::Person.is_title());
    }

    #[test]
    fn cached_flattens_with_indicator() {
        let card = TitleCard {
            title_ref: "movie/550".into(),
            media_type: MediaType::Movie,
            id: 550,
            title: "Fight Club".into(),
            year: Some("1999".into()),
            rating: Some(8.4),
            poster: None,
            href: "/title/movie/550".into(),
        };
        let value = serde_json::to_value(Cached { data: card, cache: CacheSource::Memory }).unwrap();
        assert_eq!(value["ref"], "movie/550");
        assert_eq!(value["type"], "movie");
        assert_eq!(value["cache"], "memory");
    }
}
