/// Image path → proxy URL
/// All poster/profile/still references go through /api/image

pub const IMAGE_PROXY_PREFIX: &str = "/api/image";

pub fn proxied_image(path: Option<&str>, size: &str) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    if path.starts_with('/') {
        Some(format!("{}/{}{}", IMAGE_PROXY_PREFIX, size, path))
    } else {
        Some(format!("{}/{}/{}", IMAGE_PROXY_PREFIX, size, path))
    }
}

/// "2019-05-01" → "2019"
pub fn year_of(date: Option<&str>) -> Option<String> {
    let date = date?;
    let year: String = date.chars().take(4).collect();
    if year.is_empty() {
        None
    } else {
        Some(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxied_image_paths() {
        assert_eq!(
            proxied_image(Some("/abc.jpg"), "w500").as_deref(),
            Some("/api/image/w500/abc.jpg")
        );
        assert_eq!(
            proxied_image(Some("abc.jpg"), "w185").as_deref(),
            Some("/api/image/w185/abc.jpg")
        );
        assert!(proxied_image(Some(""), "w500").is_none());
        assert!(proxied_image(None, "w500").is_none());
    }

    #[test]
    fn year_extraction() {
        assert_eq!(year_of(Some("1999-10-15")).as_deref(), Some("1999"));
        assert!(year_of(Some("")).is_none());
        assert!(year_of(None).is_none());
    }
}
