use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::schema::{Normalization, SiteSchema};
use crate::{ExtractedListing, ListingRecord, NOT_AVAILABLE};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("invalid {field} selector {selector:?}: {message}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        message: String,
    },
    #[error("invalid link base {base:?}: {message}")]
    InvalidBase { base: String, message: String },
}

/// Pulls records out of listing nodes according to one [`SiteSchema`].
///
/// Every field is extracted on its own: a missing element or attribute puts
/// [`NOT_AVAILABLE`] into that field and leaves the others alone. A listing is
/// never dropped for missing data.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    listing: Selector,
    title: Selector,
    skills: Option<Selector>,
    link: Option<Selector>,
    link_attribute: String,
    link_base: Option<Url>,
    recency: Option<Selector>,
    skills_normalization: Normalization,
}

impl FieldExtractor {
    pub fn new(schema: &SiteSchema) -> Result<Self, SchemaError> {
        let link_base = schema
            .link
            .base
            .as_deref()
            .map(|base| {
                Url::parse(base).map_err(|err| SchemaError::InvalidBase {
                    base: base.to_string(),
                    message: err.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            listing: compile("listing", &schema.listing)?,
            title: compile("title", &schema.title.selector)?,
            skills: schema
                .skills
                .as_ref()
                .map(|spec| compile("skills", &spec.selector))
                .transpose()?,
            link: schema
                .link
                .selector
                .as_deref()
                .map(|sel| compile("link", sel))
                .transpose()?,
            link_attribute: schema.link.attribute.clone(),
            link_base,
            recency: schema
                .recency
                .as_ref()
                .map(|spec| compile("recency", &spec.selector))
                .transpose()?,
            skills_normalization: schema.skills_normalization,
        })
    }

    /// All listings on the page, in document order.
    pub fn extract_page(&self, document: &Html) -> Vec<ExtractedListing> {
        document
            .select(&self.listing)
            .map(|node| self.extract(node))
            .collect()
    }

    pub fn extract(&self, node: ElementRef<'_>) -> ExtractedListing {
        let title = first_text(node, &self.title, Normalization::Trim);
        let skills = self
            .skills
            .as_ref()
            .and_then(|sel| first_text(node, sel, self.skills_normalization));
        let link = self.link(node);
        let posted = self
            .recency
            .as_ref()
            .and_then(|sel| first_text(node, sel, Normalization::Trim));

        ExtractedListing {
            record: ListingRecord::new(
                title.unwrap_or_else(not_available),
                skills.unwrap_or_else(not_available),
                link.unwrap_or_else(not_available),
            ),
            posted,
        }
    }

    fn link(&self, node: ElementRef<'_>) -> Option<String> {
        let holder = match &self.link {
            Some(sel) => node.select(sel).next()?,
            None => node,
        };
        let raw = holder.value().attr(&self.link_attribute)?.trim();
        if raw.is_empty() {
            return None;
        }
        match &self.link_base {
            Some(base) => Some(
                base.join(raw)
                    .map(String::from)
                    .unwrap_or_else(|_| format!("{}{raw}", base.as_str().trim_end_matches('/'))),
            ),
            None => Some(raw.to_string()),
        }
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, SchemaError> {
    Selector::parse(selector).map_err(|err| SchemaError::InvalidSelector {
        field,
        selector: selector.to_string(),
        message: format!("{err:?}"),
    })
}

fn first_text(
    node: ElementRef<'_>,
    selector: &Selector,
    normalization: Normalization,
) -> Option<String> {
    let element = node.select(selector).next()?;
    let text = normalization.apply(&element.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}
