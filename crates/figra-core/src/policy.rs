//! Name filters for the two selection passes.
//!
//! Both policies hold lowercase patterns and are matched against the
//! lowercased, trimmed node name. Frames use *prefix* includes, elements use
//! *substring* includes; both use substring bans.

/// Filter and limit for the frame pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FramePolicy {
    /// Maximum number of frames returned. Zero yields nothing.
    pub limit: usize,
    /// Reject names containing any of these.
    pub banned: Vec<String>,
    /// When non-empty, keep only names starting with one of these.
    pub include: Vec<String>,
}

impl FramePolicy {
    /// Build a policy from raw configuration values.
    ///
    /// Patterns are trimmed and lowercased; blank patterns are dropped. A
    /// negative `limit` is treated as zero.
    pub fn new<B, I>(limit: i64, banned: B, include: I) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            limit: usize::try_from(limit).unwrap_or(0),
            banned: normalize(banned),
            include: normalize(include),
        }
    }

    /// Whether a lowercased frame name passes the ban and include rules.
    #[must_use]
    pub fn accepts(&self, lower: &str) -> bool {
        if self.banned.iter().any(|b| lower.contains(b.as_str())) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| lower.starts_with(p.as_str()))
    }
}

/// Filter for the element pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementPolicy {
    /// Reject names containing any of these.
    pub banned: Vec<String>,
    /// When non-empty, keep only names containing one of these.
    pub include: Vec<String>,
}

impl ElementPolicy {
    /// Build a policy from raw configuration values, normalized like
    /// [`FramePolicy::new`].
    pub fn new<B, I>(banned: B, include: I) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            banned: normalize(banned),
            include: normalize(include),
        }
    }

    /// Whether a lowercased element name passes the ban and include rules.
    #[must_use]
    pub fn accepts(&self, lower: &str) -> bool {
        if self.banned.iter().any(|b| lower.contains(b.as_str())) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| lower.contains(p.as_str()))
    }
}

fn normalize<T>(patterns: T) -> Vec<String>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|p| p.as_ref().trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect()
}
