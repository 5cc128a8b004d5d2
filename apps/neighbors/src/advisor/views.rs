//! Askama view models for the single-page form UI.

use askama::Template;

use crate::advisor::prompts::ListingDetails;
use crate::llm_client::LlmError;

/// The five menu entries of the form UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Listing,
    SalePlan,
    OfferReview,
    OfferComparison,
    Roi,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Listing,
        Action::SalePlan,
        Action::OfferReview,
        Action::OfferComparison,
        Action::Roi,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Action::Listing => "listing",
            Action::SalePlan => "sale-plan",
            Action::OfferReview => "offer-review",
            Action::OfferComparison => "offer-comparison",
            Action::Roi => "roi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Listing => "Create a compelling real estate listing description for my home",
            Action::SalePlan => {
                "Give me a step-by-step plan for selling my home in the next 90 days."
            }
            Action::OfferReview => "Help me review a single offer I received for my home",
            Action::OfferComparison => "Compare multiple offers I received for my home",
            Action::Roi => "Identify home improvements for best ROI",
        }
    }

    /// Heading shown above a generated result.
    pub fn result_heading(self) -> &'static str {
        match self {
            Action::Listing => "🏡 Listing Description",
            Action::SalePlan => "🗓️ 90-Day Sale Plan",
            Action::OfferReview => "📝 Offer Review",
            Action::OfferComparison => "📊 Offer Comparison",
            Action::Roi => "📈 ROI Suggestions",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }
}

pub struct ActionChoice {
    pub key: &'static str,
    pub label: &'static str,
}

pub struct ResultView {
    pub heading: &'static str,
    pub body: String,
    pub failed: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub choices: Vec<ActionChoice>,
    /// Key of the selected action, "" when nothing is selected yet.
    pub selected: &'static str,
    pub listing: ListingDetails,
    pub market_details: String,
    pub home_features: String,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub result: Option<ResultView>,
}

impl IndexPage {
    pub fn new(action: Option<Action>) -> Self {
        Self {
            choices: Action::ALL
                .into_iter()
                .map(|a| ActionChoice {
                    key: a.key(),
                    label: a.label(),
                })
                .collect(),
            selected: action.map(Action::key).unwrap_or(""),
            listing: ListingDetails::default(),
            market_details: String::new(),
            home_features: String::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            result: None,
        }
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.errors.push(message.into());
        self
    }

    pub fn with_warning(mut self, message: impl Into<String>) -> Self {
        self.warnings.push(message.into());
        self
    }

    /// Shows generated text, or the prefixed failure message in its place.
    pub fn with_outcome(mut self, action: Action, outcome: Result<String, LlmError>) -> Self {
        let (body, failed) = match outcome {
            Ok(text) => (text, false),
            Err(e) => {
                tracing::warn!("Generation failed for {}: {e}", action.key());
                (e.user_message(), true)
            }
        };
        self.result = Some(ResultView {
            heading: action.result_heading(),
            body,
            failed,
        });
        self
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub code: &'a str,
    pub message: &'a str,
}
