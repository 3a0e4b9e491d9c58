/// Person mapper
/// TMDB person payload → PersonDetails. Biography is resolved by the caller.

use crate::types::catalog::{ExternalLinks, MediaType, PersonCredit, PersonDetails};
use crate::types::tmdb::TmdbPerson;

use super::image::{proxied_image, year_of};

const CREDIT_LIMIT: usize = 24;
const PROFILE_LIMIT: usize = 10;

fn non_empty(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}

pub fn map_person_details(payload: &TmdbPerson, biography: String) -> PersonDetails {
    let mut credits: Vec<PersonCredit> = payload
        .combined_credits
        .as_ref()
        .map(|c| c.cast.as_slice())
        .unwrap_or_default()
        .iter()
        .filter_map(|item| {
            let (media_type, title, date) = match item.media_type.as_deref()? {
                "movie" => (MediaType::Movie, &item.title, &item.release_date),
                "tv" => (MediaType::Tv, &item.name, &item.first_air_date),
                _ => return None,
            };
            Some(PersonCredit {
                id: item.id,
                media_type,
                title: title.clone().unwrap_or_default(),
                year: year_of(date.as_deref()),
                character: non_empty(&item.character),
                popularity: item.popularity.unwrap_or(0.0),
                poster: proxied_image(item.poster_path.as_deref(), "w342"),
            })
        })
        .collect();

    credits.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
    credits.truncate(CREDIT_LIMIT);

    let external = payload
        .external_ids
        .as_ref()
        .map(|ids| ExternalLinks {
            instagram: non_empty(&ids.instagram_id),
            twitter: non_empty(&ids.twitter_id),
            tiktok: non_empty(&ids.tiktok_id),
            youtube: non_empty(&ids.youtube_id),
            imdb: non_empty(&ids.imdb_id),
        })
        .unwrap_or_default();

    PersonDetails {
        id: payload.id,
        name: payload.name.clone(),
        original_name: payload
            .also_known_as
            .first()
            .cloned()
            .unwrap_or_else(|| payload.name.clone()),
        biography,
        known_for_department: non_empty(&payload.known_for_department),
        birthday: non_empty(&payload.birthday),
        deathday: non_empty(&payload.deathday),
        place_of_birth: non_empty(&payload.place_of_birth),
        profile: proxied_image(payload.profile_path.as_deref(), "w500"),
        profiles: payload
            .images
            .as_ref()
            .map(|i| {
                i.profiles
                    .iter()
                    .take(PROFILE_LIMIT)
                    .filter_map(|p| proxied_image(p.file_path.as_deref(), "w300"))
                    .collect()
            })
            .unwrap_or_default(),
        external,
        credits,
    }
}
