use log::{error, warn};
use url::Url;

use crate::content::{ContentError, LandingContent, LANDING_JSON};

pub const OFFER_LINK_PLACEHOLDER: &str = "[INSERT OFFER LINK]";

/// Offer destination, set with `OFFER_URL` when building.
pub fn offer_url_raw() -> &'static str {
    option_env!("OFFER_URL").unwrap_or(OFFER_LINK_PLACEHOLDER)
}

pub fn price_override(plan_id: &str) -> Option<String> {
    let raw = match plan_id {
        "injectable" => option_env!("PRICE_INJECTABLE"),
        "oral" => option_env!("PRICE_ORAL"),
        _ => None,
    };
    raw.map(str::trim)
        .filter(|price| !price.is_empty())
        .map(str::to_string)
}

#[derive(Clone, Debug, PartialEq)]
pub enum OfferLink {
    Ready(Url),
    Unconfigured(String),
}

impl OfferLink {
    pub fn parse(raw: &str) -> Result<Url, ContentError> {
        let url = Url::parse(raw.trim()).map_err(|e| ContentError::OfferLink {
            raw: raw.to_string(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ContentError::OfferLink {
                raw: raw.to_string(),
                reason: format!("unsupported scheme {}", scheme),
            }),
        }
    }

    pub fn from_raw(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(url) => OfferLink::Ready(url),
            Err(e) => {
                warn!("{}", e);
                OfferLink::Unconfigured(raw.to_string())
            }
        }
    }

    pub fn href(&self) -> Option<&str> {
        match self {
            OfferLink::Ready(url) => Some(url.as_str()),
            OfferLink::Unconfigured(_) => None,
        }
    }
}

/// Everything the landing page reads, resolved once before the first render.
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    pub content: LandingContent,
    pub offer: OfferLink,
}

pub fn load_site() -> Site {
    let mut content = match LandingContent::from_json(LANDING_JSON) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to load landing content: {}", e);
            LandingContent::default()
        }
    };
    content.apply_prices(price_override);

    Site {
        content,
        offer: OfferLink::from_raw(offer_url_raw()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_link_is_unconfigured() {
        let link = OfferLink::from_raw(OFFER_LINK_PLACEHOLDER);
        assert_eq!(link, OfferLink::Unconfigured(OFFER_LINK_PLACEHOLDER.to_string()));
        assert_eq!(link.href(), None);
    }

    #[test]
    fn https_link_is_ready() {
        let link = OfferLink::from_raw("https://offers.example.com/start?ref=landing");
        assert_eq!(link.href(), Some("https://offers.example.com/start?ref=landing"));
    }

    #[test]
    fn non_web_schemes_are_rejected() {
        let err = OfferLink::parse("javascript:alert(1)").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme javascript"));
    }

    #[test]
    fn unknown_plans_have_no_price_override() {
        assert_eq!(price_override("annual"), None);
    }

    #[test]
    fn site_loads_embedded_content() {
        let site = load_site();
        assert_eq!(site.content.pricing.plans.len(), 2);
        assert!(!site.content.hero.cta.is_empty());
    }
}
