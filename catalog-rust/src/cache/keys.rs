/// Cache key derivation + TTL table
/// Keys are pure functions of (kind, type, id, language)

use std::time::Duration;

use crate::types::catalog::MediaType;

/// Detail records: 10 minutes
pub const DETAIL_TTL: Duration = Duration::from_secs(10 * 60);
/// Title cards: 30 minutes, requested in bulk by shelves
pub const TITLE_CARD_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Detail,
    TitleCard,
}

impl EntryKind {
    pub fn ttl(self) -> Duration {
        match self {
            EntryKind::Detail => DETAIL_TTL,
            EntryKind::TitleCard => TITLE_CARD_TTL,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            EntryKind::Detail => "detail",
            EntryKind::TitleCard => "card",
        }
    }
}

pub fn detail_key(media_type: MediaType, id: u64, language: &str) -> String {
    make_key(EntryKind::Detail, media_type, id, language)
}

pub fn card_key(media_type: MediaType, id: u64, language: &str) -> String {
    make_key(EntryKind::TitleCard, media_type, id, language)
}

// language goes last: the other segments never contain ':'
fn make_key(kind: EntryKind, media_type: MediaType, id: u64, language: &str) -> String {
    format!("{}:{}:{}:{}", kind.prefix(), media_type.as_str(), id, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic() {
        assert_eq!(
            detail_key(MediaType::Movie, 550, "ru-RU"),
            detail_key(MediaType::Movie, 550, "ru-RU")
        );
        assert_eq!(card_key(MediaType::Tv, 1399, "en-US"), "card:tv:1399:en-US");
    }

    #[test]
    fn every_input_changes_the_key() {
        let base = detail_key(MediaType::Movie, 550, "ru-RU");
        assert_ne!(base, detail_key(MediaType::Tv, 550, "ru-RU"));
        assert_ne!(base, detail_key(MediaType::Person, 550, "ru-RU"));
        assert_ne!(base, detail_key(MediaType::Movie, 551, "ru-RU"));
        assert_ne!(base, detail_key(MediaType::Movie, 550, "en-US"));
        assert_ne!(base, card_key(MediaType::Movie, 550, "ru-RU"));
    }

    #[test]
    fn ttl_table() {
        assert_eq!(EntryKind::Detail.ttl(), Duration::from_secs(600));
        assert_eq!(EntryKind::TitleCard.ttl(), Duration::from_secs(1800));
    }
}
