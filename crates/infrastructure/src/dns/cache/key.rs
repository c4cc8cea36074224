use compact_str::CompactString;

/// Normalised cache key: ASCII lowercase, without the trailing root dot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(CompactString);

impl CacheKey {
    #[inline]
    pub fn new(domain: &str) -> Self {
        let trimmed = domain.strip_suffix('.').unwrap_or(domain);
        if trimmed.bytes().any(|b| b.is_ascii_uppercase()) {
            Self(CompactString::from(trimmed.to_ascii_lowercase()))
        } else {
            Self(CompactString::from(trimmed))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
