/// Query / path parameter normalization

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ApiError;
use crate::types::catalog::MediaType;

pub const DEFAULT_LANGUAGE: &str = "ru-RU";
pub const MAX_PAGE: u32 = 50;
pub const MAX_SEASON_NUMBER: u32 = 100;
pub const MAX_QUERY_CHARS: usize = 120;

static LANGUAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2}-[A-Z]{2}$").unwrap());

/// "en-US" style tags only, anything else → ru-RU
pub fn normalize_language(input: Option<&str>) -> String {
    match input.map(str::trim) {
        Some(tag) if LANGUAGE_TAG.is_match(tag) => tag.to_string(),
        _ => DEFAULT_LANGUAGE.to_string(),
    }
}

pub fn normalize_page(input: Option<&str>) -> u32 {
    match input.and_then(|v| v.trim().parse::<f64>().ok()) {
        Some(page) if page >= 1.0 => page.min(MAX_PAGE as f64).trunc() as u32,
        _ => 1,
    }
}

/// None for negative or non-numeric input
pub fn normalize_season_number(input: &str) -> Option<u32> {
    let season = input.trim().parse::<f64>().ok().filter(|n| n.is_finite())?;
    if season < 0.0 {
        return None;
    }
    Some(season.trunc().min(MAX_SEASON_NUMBER as f64) as u32)
}

pub fn sanitize_query(input: Option<&str>) -> String {
    input
        .map(|q| q.trim().chars().take(MAX_QUERY_CHARS).collect())
        .unwrap_or_default()
}

pub fn parse_title_type(raw: &str) -> Result<MediaType, ApiError> {
    match raw.parse::<MediaType>() {
        Ok(media_type) if media_type.is_title() => Ok(media_type),
        _ => Err(ApiError::bad_request("invalid_type", "type must be movie or tv")),
    }
}

pub fn parse_positive_id(raw: &str) -> Result<u64, ApiError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request("invalid_id", "id must be a positive number")),
    }
}
