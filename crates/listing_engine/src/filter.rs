use crate::schema::Normalization;
use crate::ExtractedListing;

/// Decides whether an extracted listing is kept.
pub trait ListingFilter: Send + Sync {
    fn accept(&self, listing: &ExtractedListing) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMode {
    /// Keep listings whose skills mention the keyword.
    Include,
    /// Keep listings whose skills do not mention the keyword.
    Exclude,
}

/// Case-insensitive skill keyword match, optionally limited to recent posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillFilter {
    keyword: String,
    mode: KeywordMode,
    recent_marker: Option<String>,
}

impl SkillFilter {
    pub fn including(keyword: &str) -> Self {
        Self::new(keyword, KeywordMode::Include)
    }

    pub fn excluding(keyword: &str) -> Self {
        Self::new(keyword, KeywordMode::Exclude)
    }

    fn new(keyword: &str, mode: KeywordMode) -> Self {
        Self {
            keyword: keyword.trim().to_lowercase(),
            mode,
            recent_marker: None,
        }
    }

    /// Cleans the keyword the way the skills text was cleaned, so
    /// "machine learning" still matches skills stripped to "MachineLearning".
    pub fn normalized(mut self, normalization: Normalization) -> Self {
        self.keyword = normalization.apply(&self.keyword);
        self
    }

    /// Also require the posted text to contain `marker` (e.g. "few" in
    /// "Posted few days ago"). Listings without posted text are dropped.
    pub fn posted_recently(mut self, marker: &str) -> Self {
        self.recent_marker = Some(marker.to_lowercase());
        self
    }

    fn mentions_keyword(&self, skills: &str) -> bool {
        skills.to_lowercase().contains(&self.keyword)
    }

    fn is_recent(&self, posted: Option<&str>) -> bool {
        match &self.recent_marker {
            None => true,
            Some(marker) => posted.is_some_and(|text| text.to_lowercase().contains(marker)),
        }
    }
}

impl ListingFilter for SkillFilter {
    fn accept(&self, listing: &ExtractedListing) -> bool {
        if !self.is_recent(listing.posted.as_deref()) {
            return false;
        }
        let mentioned = self.mentions_keyword(&listing.record.skills);
        match self.mode {
            KeywordMode::Include => mentioned,
            KeywordMode::Exclude => !mentioned,
        }
    }
}
