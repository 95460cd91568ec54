use serde::Deserialize;
use thiserror::Error;

use crate::components::icons::Icon;

/// Copy for the whole landing page, baked into the binary at build time.
pub const LANDING_JSON: &str = include_str!("../content/landing.json");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("landing content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("landing content has no {0}")]
    Empty(&'static str),
    #[error("testimonial by {author} has rating {rating}, expected 1 to 5")]
    Rating { author: String, rating: u8 },
    #[error("offer link {raw:?} is not usable: {reason}")]
    OfferLink { raw: String, reason: String },
}

#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct LandingContent {
    pub hero: Hero,
    pub how_it_works: HowItWorks,
    pub benefits: Benefits,
    pub testimonials: Testimonials,
    pub pricing: Pricing,
    pub faq: Faq,
    pub final_cta: FinalCta,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Hero {
    pub headline: String,
    pub highlight: String,
    pub subtitle: String,
    pub cta: String,
    pub image: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct HowItWorks {
    pub title: String,
    pub subtitle: String,
    pub steps: Vec<Step>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Step {
    pub step: String,
    pub title: String,
    pub description: String,
    pub icon: Icon,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Benefits {
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub image_alt: String,
    pub items: Vec<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Testimonials {
    pub title: String,
    pub aggregate_rating: String,
    pub items: Vec<Testimonial>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Testimonial {
    pub text: String,
    pub author: String,
    pub rating: u8,
    /// CSS class picking the card's gradient.
    pub tone: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Pricing {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    pub plans: Vec<Plan>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Plan {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub price: String,
    pub features: Vec<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Faq {
    pub title: String,
    pub subtitle: String,
    pub items: Vec<FaqEntry>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Default)]
pub struct FinalCta {
    pub title: String,
    pub subtitle: String,
    pub cta: String,
    pub image: String,
    pub badges: Vec<Badge>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Badge {
    pub icon: Icon,
    pub text: String,
}

impl LandingContent {
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let content: LandingContent = serde_json::from_str(raw)?;
        content.validate()?;
        Ok(content)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.how_it_works.steps.is_empty() {
            return Err(ContentError::Empty("steps"));
        }
        if self.pricing.plans.is_empty() {
            return Err(ContentError::Empty("pricing plans"));
        }
        if self.faq.items.is_empty() {
            return Err(ContentError::Empty("faq entries"));
        }
        for testimonial in &self.testimonials.items {
            if !(1..=5).contains(&testimonial.rating) {
                return Err(ContentError::Rating {
                    author: testimonial.author.clone(),
                    rating: testimonial.rating,
                });
            }
        }
        Ok(())
    }

    /// Replaces plan prices with externally supplied figures, keyed by plan id.
    pub fn apply_prices<F>(&mut self, price_for: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for plan in &mut self.pricing.plans {
            if let Some(price) = price_for(&plan.id) {
                plan.price = price;
            }
        }
    }
}
