//! Declarative descriptions of the listing sites.
//!
//! A [`SiteSchema`] says where listings live on a search-results page and
//! where each record field sits inside one listing. The extractor and the
//! collector are driven entirely by these values.

use url::Url;

pub const TIMESJOBS_SEARCH_URL: &str = "https://www.timesjobs.com/candidate/job-search.html";
pub const TIMESJOBS_DEFAULT_KEYWORDS: &str = "internship computer science";
pub const INTERNSHALA_JOBS_URL: &str = "https://internshala.com/jobs/";
pub const INTERNSHALA_ORIGIN: &str = "https://internshala.com";

/// How extracted text is cleaned before it lands in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Trim leading and trailing whitespace only.
    #[default]
    Trim,
    /// Drop every whitespace character, e.g. `" python , sql "` -> `"python,sql"`.
    StripSpaces,
}

impl Normalization {
    pub fn apply(self, text: &str) -> String {
        match self {
            Normalization::Trim => text.trim().to_string(),
            Normalization::StripSpaces => text.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }
}

/// Text field located by a CSS selector relative to the listing node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub selector: String,
}

impl FieldSpec {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

/// Attribute holding the detail link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    /// Descendant carrying the attribute; `None` reads it from the listing node itself.
    pub selector: Option<String>,
    pub attribute: String,
    /// Prefix for relative links.
    pub base: Option<String>,
}

/// Marks a listing as recently posted when its posted text contains `marker`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencySpec {
    pub selector: String,
    pub marker: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSchema {
    pub name: String,
    pub base_url: String,
    pub query: Vec<(String, String)>,
    /// Query parameter carrying the 1-based page index, if the site paginates.
    pub page_param: Option<String>,
    pub listing: String,
    pub title: FieldSpec,
    pub skills: Option<FieldSpec>,
    pub link: LinkSpec,
    pub recency: Option<RecencySpec>,
    pub skills_normalization: Normalization,
}

impl SiteSchema {
    pub fn paginates(&self) -> bool {
        self.page_param.is_some()
    }

    pub fn target(&self, page_index: u32) -> FetchTarget {
        let mut query = self.query.clone();
        if let Some(param) = &self.page_param {
            query.push((param.clone(), page_index.to_string()));
        }
        FetchTarget {
            base_url: self.base_url.clone(),
            query,
            page_index,
        }
    }

    pub fn with_skills_normalization(mut self, normalization: Normalization) -> Self {
        self.skills_normalization = normalization;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// One page request, built per page and discarded after the fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTarget {
    pub base_url: String,
    pub query: Vec<(String, String)>,
    pub page_index: u32,
}

impl FetchTarget {
    pub fn url(&self) -> Result<Url, url::ParseError> {
        if self.query.is_empty() {
            return Url::parse(&self.base_url);
        }
        Url::parse_with_params(&self.base_url, &self.query)
    }
}

/// TimesJobs keyword search; `keywords` is sent as `txtKeywords`.
pub fn timesjobs(keywords: &str) -> SiteSchema {
    let query = [
        ("searchType", "personalizedSearch"),
        ("from", "submit"),
        ("searchTextSrc", ""),
        ("searchTextText", ""),
        ("txtKeywords", keywords.trim()),
        ("txtLocation", ""),
        ("luceneResultSize", "25"),
        ("postWeek", "60"),
        ("pDate", "Y"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    SiteSchema {
        name: "TimesJobs".to_string(),
        base_url: TIMESJOBS_SEARCH_URL.to_string(),
        query,
        page_param: Some("sequence".to_string()),
        listing: "li.clearfix.job-bx.wht-shd-bx".to_string(),
        title: FieldSpec::new("h3.joblist-comp-name"),
        skills: Some(FieldSpec::new("span.srp-skills")),
        link: LinkSpec {
            selector: Some("header h2 a".to_string()),
            attribute: "href".to_string(),
            base: None,
        },
        recency: Some(RecencySpec {
            selector: "span.sim-posted span".to_string(),
            marker: "few".to_string(),
        }),
        skills_normalization: Normalization::Trim,
    }
}

/// Internshala's static jobs page. Listings carry no skills.
pub fn internshala() -> SiteSchema {
    SiteSchema {
        name: "Internshala".to_string(),
        base_url: INTERNSHALA_JOBS_URL.to_string(),
        query: Vec::new(),
        page_param: None,
        listing: "div.individual_internship".to_string(),
        title: FieldSpec::new("h3.job-internship-name"),
        skills: None,
        link: LinkSpec {
            selector: None,
            attribute: "data-href".to_string(),
            base: Some(INTERNSHALA_ORIGIN.to_string()),
        },
        recency: None,
        skills_normalization: Normalization::Trim,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timesjobs_target_bakes_keyword_and_page() {
        let url = timesjobs("rust developer").target(3).url().unwrap();
        assert_eq!(url.host_str(), Some("www.timesjobs.com"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("txtKeywords".into(), "rust developer".into())));
        assert!(pairs.contains(&("luceneResultSize".into(), "25".into())));
        assert_eq!(pairs.last(), Some(&("sequence".into(), "3".into())));
    }

    #[test]
    fn internshala_target_has_no_query() {
        let schema = internshala();
        assert!(!schema.paginates());
        assert_eq!(
            schema.target(1).url().unwrap().as_str(),
            "https://internshala.com/jobs/"
        );
    }

    #[test]
    fn normalization_modes() {
        assert_eq!(Normalization::Trim.apply("  python , sql \n"), "python , sql");
        assert_eq!(
            Normalization::StripSpaces.apply("  python , sql \n"),
            "python,sql"
        );
    }
}
