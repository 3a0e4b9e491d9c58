/// Title mapper
/// TMDB movie/tv payload → TitleDetails / TitleCard / SeasonDetails / TitleCast

use crate::types::catalog::{
    Backdrop, CastCredit, CastMember, Episode, MediaType, PopularMedia, Recommendation,
    SeasonDetails, SeasonSummary, TitleCard, TitleCast, TitleDetails, Video,
};
use crate::types::tmdb::{TmdbCredits, TmdbMultiItem, TmdbSeason, TmdbTitle};

use super::image::{proxied_image, year_of};

/// Region used to pick age certification
pub const CERTIFICATION_REGION: &str = "RU";

const DETAIL_CAST_LIMIT: usize = 8;
const VIDEO_LIMIT: usize = 6;
const BACKDROP_LIMIT: usize = 8;
const RECOMMENDATION_LIMIT: usize = 12;
const CAST_PAGE_LIMIT: usize = 80;

fn pick<'a>(media_type: MediaType, movie: &'a Option<String>, tv: &'a Option<String>) -> Option<&'a str> {
    match media_type {
        MediaType::Movie => movie.as_deref(),
        _ => tv.as_deref(),
    }
}

fn title_of(media_type: MediaType, payload: &TmdbTitle) -> String {
    pick(media_type, &payload.title, &payload.name)
        .unwrap_or_default()
        .to_string()
}

fn release_of(media_type: MediaType, payload: &TmdbTitle) -> Option<String> {
    pick(media_type, &payload.release_date, &payload.first_air_date).map(String::from)
}

fn certification(media_type: MediaType, payload: &TmdbTitle) -> Option<String> {
    let value = match media_type {
        MediaType::Movie => {
            let results = &payload.release_dates.as_ref()?.results;
            let info = results
                .iter()
                .find(|r| r.iso_3166_1 == CERTIFICATION_REGION)
                .or_else(|| results.first())?;
            info.release_dates.first()?.certification.clone()
        }
        _ => {
            let results = &payload.content_ratings.as_ref()?.results;
            let info = results
                .iter()
                .find(|r| r.iso_3166_1 == CERTIFICATION_REGION)
                .or_else(|| results.first())?;
            info.rating.clone()
        }
    };
    value.filter(|c| !c.is_empty())
}

fn map_videos(payload: &TmdbTitle) -> Vec<Video> {
    let mut videos: Vec<_> = payload
        .videos
        .as_ref()
        .map(|v| v.results.iter().filter(|v| v.site == "YouTube").collect())
        .unwrap_or_default();

    // official first, then larger resolution
    videos.sort_by(|a, b| {
        b.official
            .cmp(&a.official)
            .then(b.size.unwrap_or(0).cmp(&a.size.unwrap_or(0)))
    });

    videos
        .into_iter()
        .take(VIDEO_LIMIT)
        .map(|v| Video {
            id: v.id.clone(),
            name: v.name.clone(),
            video_type: v.video_type.clone(),
            youtube_url: format!("https://www.youtube.com/watch?v={}", v.key),
        })
        .collect()
}

fn map_recommendation(media_type: MediaType, item: &TmdbMultiItem) -> Recommendation {
    let (title, date) = match media_type {
        MediaType::Movie => (item.title.as_deref(), item.release_date.as_deref()),
        _ => (item.name.as_deref(), item.first_air_date.as_deref()),
    };
    Recommendation {
        id: item.id,
        media_type,
        title: title.unwrap_or_default().to_string(),
        year: year_of(date),
        rating: item.vote_average,
        poster: proxied_image(item.poster_path.as_deref(), "w342"),
    }
}

pub fn map_title_details(media_type: MediaType, payload: &TmdbTitle) -> TitleDetails {
    let is_tv = media_type == MediaType::Tv;

    let seasons = if is_tv {
        payload
            .seasons
            .iter()
            .map(|s| SeasonSummary {
                id: s.id,
                name: s.name.clone().unwrap_or_default(),
                season_number: s.season_number,
                episode_count: s.episode_count,
                air_date: s.air_date.clone(),
                overview: s.overview.clone().unwrap_or_default(),
                rating: s.vote_average,
                poster: proxied_image(s.poster_path.as_deref(), "w342"),
            })
            .collect()
    } else {
        Vec::new()
    };

    let cast = payload
        .credits
        .as_ref()
        .map(|c| {
            c.cast
                .iter()
                .take(DETAIL_CAST_LIMIT)
                .map(|p| CastMember {
                    id: p.id,
                    name: p.name.clone(),
                    character: p.character.clone(),
                    profile: proxied_image(p.profile_path.as_deref(), "w185"),
                })
                .collect()
        })
        .unwrap_or_default();

    let backdrops = payload
        .images
        .as_ref()
        .map(|i| {
            i.backdrops
                .iter()
                .take(BACKDROP_LIMIT)
                .map(|b| Backdrop {
                    image: proxied_image(b.file_path.as_deref(), "w780"),
                    width: b.width,
                    height: b.height,
                })
                .collect()
        })
        .unwrap_or_default();

    let recommendations = payload
        .recommendations
        .as_ref()
        .map(|r| {
            r.results
                .iter()
                .take(RECOMMENDATION_LIMIT)
                .map(|item| map_recommendation(media_type, item))
                .collect()
        })
        .unwrap_or_default();

    TitleDetails {
        id: payload.id,
        media_type,
        title: title_of(media_type, payload),
        original_title: pick(media_type, &payload.original_title, &payload.original_name)
            .unwrap_or_default()
            .to_string(),
        tagline: payload.tagline.clone(),
        overview: payload.overview.clone().unwrap_or_default(),
        runtime: if is_tv { None } else { payload.runtime },
        episode_run_time: if is_tv { payload.episode_run_time.clone() } else { Vec::new() },
        seasons_count: if is_tv { payload.number_of_seasons } else { None },
        episodes_count: if is_tv { payload.number_of_episodes } else { None },
        seasons,
        status: payload.status.clone(),
        release_date: release_of(media_type, payload),
        end_date: if is_tv { payload.last_air_date.clone() } else { None },
        genres: payload.genres.clone(),
        countries: payload.production_countries.clone(),
        rating: payload.vote_average,
        vote_count: payload.vote_count,
        certification: certification(media_type, payload),
        poster: proxied_image(payload.poster_path.as_deref(), "w780"),
        backdrop: proxied_image(payload.backdrop_path.as_deref(), "w1280"),
        cast,
        popular_media: PopularMedia {
            videos: map_videos(payload),
            backdrops,
        },
        recommendations,
    }
}

/// Parses "movie/550" or "tv/1399"
pub fn parse_title_ref(value: &str) -> Option<(MediaType, u64)> {
    let (kind, id) = value.trim().split_once('/')?;
    let media_type = match kind {
        "movie" => MediaType::Movie,
        "tv" => MediaType::Tv,
        _ => return None,
    };
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((media_type, id.parse().ok()?))
}

pub fn map_title_card(title_ref: &str, media_type: MediaType, id: u64, payload: &TmdbTitle) -> TitleCard {
    let title = title_of(media_type, payload);
    TitleCard {
        title_ref: title_ref.to_string(),
        media_type,
        id,
        title: if title.is_empty() { title_ref.to_string() } else { title },
        year: year_of(release_of(media_type, payload).as_deref()),
        rating: payload.vote_average.filter(|r| *r > 0.0),
        poster: proxied_image(payload.poster_path.as_deref(), "w500"),
        href: format!("/title/{}/{}", media_type, id),
    }
}

pub fn map_season_details(payload: &TmdbSeason) -> SeasonDetails {
    SeasonDetails {
        id: payload.id,
        name: payload.name.clone().unwrap_or_default(),
        season_number: payload.season_number,
        overview: payload.overview.clone().unwrap_or_default(),
        air_date: payload.air_date.clone(),
        episode_count: payload.episodes.len(),
        poster: proxied_image(payload.poster_path.as_deref(), "w500"),
        episodes: payload
            .episodes
            .iter()
            .map(|e| Episode {
                id: e.id,
                episode_number: e.episode_number,
                name: e.name.clone().unwrap_or_default(),
                air_date: e.air_date.clone(),
                runtime: e.runtime,
                overview: e.overview.clone().unwrap_or_default(),
                still: proxied_image(e.still_path.as_deref(), "w300"),
            })
            .collect(),
    }
}

/// tv uses aggregate_credits (roles + episode counts)
pub fn map_title_cast(media_type: MediaType, id: u64, title: &TmdbTitle, credits: &TmdbCredits) -> TitleCast {
    let mut cast: Vec<CastCredit> = credits
        .cast
        .iter()
        .map(|p| {
            let (character, episodes) = if media_type == MediaType::Tv {
                (
                    p.roles.first().and_then(|r| r.character.clone()),
                    Some(p.total_episode_count.unwrap_or(0)),
                )
            } else {
                (p.character.clone(), None)
            };
            CastCredit {
                id: p.id,
                name: p.name.clone(),
                character: character.filter(|c| !c.is_empty()),
                profile: proxied_image(p.profile_path.as_deref(), "w185"),
                episodes,
                order: p.order.unwrap_or(u32::MAX),
            }
        })
        .collect();

    cast.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then(b.episodes.unwrap_or(0).cmp(&a.episodes.unwrap_or(0)))
    });
    cast.truncate(CAST_PAGE_LIMIT);

    TitleCast {
        id,
        media_type,
        title: title_of(media_type, title),
        cast,
    }
}
