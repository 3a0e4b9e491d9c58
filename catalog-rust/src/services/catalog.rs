/// Catalog service
/// TMDB lookups behind the detail / title-card caches. Biography falls back to en-US.

use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::cache::keys::{card_key, detail_key, EntryKind};
use crate::cache::metadata::MetadataCache;
use crate::error::FetchError;
use crate::mappers::person::map_person_details;
use crate::mappers::search::map_search_page;
use crate::mappers::title::{
    map_season_details, map_title_card, map_title_cast, map_title_details, parse_title_ref,
};
use crate::tmdb_client::client::TmdbClient;
use crate::types::catalog::{
    CacheSource, Cached, DetailRecord, MediaType, PersonDetails, SearchResults, SeasonDetails,
    TitleCard, TitleCast, TitleDetails,
};
use crate::types::tmdb::{TmdbCredits, TmdbPerson, TmdbSearchPage, TmdbSeason, TmdbTitle};

/// Biography fallback language
pub const FALLBACK_LANGUAGE: &str = "en-US";

pub struct CatalogService {
    client: TmdbClient,
    details: MetadataCache<DetailRecord>,
    cards: MetadataCache<TitleCard>,
}

fn titles_only(media_type: MediaType) -> Result<(), FetchError> {
    if media_type.is_title() {
        Ok(())
    } else {
        Err(FetchError::NotATitle(media_type))
    }
}

impl CatalogService {
    pub fn new(client: TmdbClient) -> Self {
        Self {
            client,
            details: MetadataCache::new(EntryKind::Detail),
            cards: MetadataCache::new(EntryKind::TitleCard),
        }
    }

    pub fn details_cache(&self) -> &MetadataCache<DetailRecord> {
        &self.details
    }

    pub fn cards_cache(&self) -> &MetadataCache<TitleCard> {
        &self.cards
    }

    pub async fn search_titles(
        &self,
        query: &str,
        language: &str,
        page: u32,
    ) -> Result<SearchResults, FetchError> {
        let payload: TmdbSearchPage = self
            .client
            .fetch(
                "/search/multi",
                &[
                    ("query", query.to_string()),
                    ("include_adult", "false".into()),
                    ("language", language.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        Ok(map_search_page(&payload))
    }

    pub async fn title_details(
        &self,
        media_type: MediaType,
        id: u64,
        language: &str,
    ) -> Result<Cached<TitleDetails>, FetchError> {
        titles_only(media_type)?;
        let key = detail_key(media_type, id, language);

        if let Some(DetailRecord::Title(details)) = self.details.get_fresh(&key) {
            return Ok(Cached {
                data: *details,
                cache: CacheSource::Memory,
            });
        }

        let append = match media_type {
            MediaType::Movie => "credits,images,videos,release_dates,recommendations",
            _ => "credits,images,videos,content_ratings,recommendations",
        };
        let image_language = format!(
            "{},en,null",
            language.split('-').next().unwrap_or(language)
        );

        let payload: TmdbTitle = self
            .client
            .fetch(
                &format!("/{}/{}", media_type, id),
                &[
                    ("language", language.to_string()),
                    ("append_to_response", append.into()),
                    ("include_image_language", image_language),
                ],
            )
            .await?;

        let details = map_title_details(media_type, &payload);
        self.details
            .put(key, DetailRecord::Title(Box::new(details.clone())));

        Ok(Cached {
            data: details,
            cache: CacheSource::None,
        })
    }

    /// Not cached
    pub async fn season_details(
        &self,
        id: u64,
        season_number: u32,
        language: &str,
    ) -> Result<SeasonDetails, FetchError> {
        let payload: TmdbSeason = self
            .client
            .fetch(
                &format!("/tv/{}/season/{}", id, season_number),
                &[("language", language.to_string())],
            )
            .await?;
        Ok(map_season_details(&payload))
    }

    pub async fn title_cast(
        &self,
        media_type: MediaType,
        id: u64,
        language: &str,
    ) -> Result<TitleCast, FetchError> {
        titles_only(media_type)?;
        let params = [("language", language.to_string())];

        let title: TmdbTitle = self
            .client
            .fetch(&format!("/{}/{}", media_type, id), &params)
            .await?;

        let credits_endpoint = match media_type {
            MediaType::Tv => format!("/tv/{}/aggregate_credits", id),
            _ => format!("/movie/{}/credits", id),
        };
        let credits: TmdbCredits = self.client.fetch(&credits_endpoint, &params).await?;

        Ok(map_title_cast(media_type, id, &title, &credits))
    }

    pub async fn person_details(
        &self,
        id: u64,
        language: &str,
    ) -> Result<Cached<PersonDetails>, FetchError> {
        let key = detail_key(MediaType::Person, id, language);

        if let Some(DetailRecord::Person(details)) = self.details.get_fresh(&key) {
            return Ok(Cached {
                data: *details,
                cache: CacheSource::Memory,
            });
        }

        let payload: TmdbPerson = self
            .client
            .fetch(
                &format!("/person/{}", id),
                &[
                    ("language", language.to_string()),
                    ("append_to_response", "combined_credits,images,external_ids".into()),
                ],
            )
            .await?;

        let biography = self.resolve_biography(id, payload.biography.clone()).await;
        let details = map_person_details(&payload, biography);
        self.details
            .put(key, DetailRecord::Person(Box::new(details.clone())));

        Ok(Cached {
            data: details,
            cache: CacheSource::None,
        })
    }

    /// Empty localized biography → one en-US refetch. Empty or failed fallback keeps "".
    async fn resolve_biography(&self, id: u64, localized: Option<String>) -> String {
        let localized = localized.unwrap_or_default();
        if !localized.is_empty() {
            return localized;
        }

        debug!("[CATALOG] person {} has no localized biography, trying {}", id, FALLBACK_LANGUAGE);
        match self
            .client
            .fetch::<TmdbPerson>(
                &format!("/person/{}", id),
                &[("language", FALLBACK_LANGUAGE.to_string())],
            )
            .await
        {
            Ok(fallback) => fallback.biography.unwrap_or_default(),
            Err(e) => {
                warn!("[CATALOG] biography fallback for person {} failed: {}", id, e);
                String::new()
            }
        }
    }

    /// Refs like "movie/550". Unknown refs and failed lookups are left out.
    pub async fn title_cards_by_refs(
        &self,
        refs: &[String],
        language: &str,
    ) -> HashMap<String, TitleCard> {
        let mut seen = HashSet::new();
        let unique: Vec<&str> = refs
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty() && seen.insert(*r))
            .collect();

        let cards = join_all(unique.iter().map(|r| self.title_card(r, language))).await;

        cards
            .into_iter()
            .flatten()
            .map(|card| (card.title_ref.clone(), card))
            .collect()
    }

    async fn title_card(&self, title_ref: &str, language: &str) -> Option<TitleCard> {
        let (media_type, id) = parse_title_ref(title_ref)?;
        let key = card_key(media_type, id, language);

        if let Some(card) = self.cards.get_fresh(&key) {
            // "movie/0550" and "movie/550" share a key
            return Some(TitleCard {
                title_ref: title_ref.to_string(),
                ..card
            });
        }

        let payload: TmdbTitle = match self
            .client
            .fetch(
                &format!("/{}/{}", media_type, id),
                &[("language", language.to_string())],
            )
            .await
        {
            Ok(payload) => payload,
            Err(e) => {
                warn!("[CATALOG] title card {} failed: {}", title_ref, e);
                return None;
            }
        };

        let card = map_title_card(title_ref, media_type, id, &payload);
        self.cards.put(key, card.clone());
        Some(card)
    }
}
