//! The five advisor operations shared by the CLI and the web UI.
//! Each builds one prompt and makes exactly one generator call.

pub mod handlers;
pub mod offers;
pub mod prompts;
pub mod views;

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::llm_client::{LlmError, TextGenerator};
use offers::OfferSet;

/// Minimum number of usable offers a comparison needs.
pub const MIN_COMPARISON_OFFERS: usize = 2;

#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("need at least two valid offers to compare, got {usable}")]
    NotEnoughOffers { usable: usize },

    #[error(transparent)]
    Llm(#[from] LlmError),
}

#[derive(Clone)]
pub struct Advisor {
    generator: Arc<dyn TextGenerator>,
}

impl Advisor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn listing_description(&self, details: &str) -> Result<String, LlmError> {
        info!("Generating listing description");
        self.generator
            .generate(&prompts::listing_description_prompt(details))
            .await
    }

    pub async fn sale_plan(&self, market_details: &str) -> Result<String, LlmError> {
        info!("Generating 90-day sale plan");
        self.generator
            .generate(&prompts::sale_plan_prompt(market_details))
            .await
    }

    pub async fn review_offer(&self, offer_text: &str) -> Result<String, LlmError> {
        info!("Reviewing single offer");
        self.generator
            .generate(&prompts::offer_review_prompt(offer_text))
            .await
    }

    /// Compares the offers, or reports `NotEnoughOffers` without calling the API.
    pub async fn compare_offers(&self, offers: &OfferSet) -> Result<String, ComparisonError> {
        if offers.len() < MIN_COMPARISON_OFFERS {
            return Err(ComparisonError::NotEnoughOffers {
                usable: offers.len(),
            });
        }
        info!(offers = offers.len(), "Comparing offers");
        let prompt = prompts::offer_comparison_prompt(&offers.combined_text());
        Ok(self.generator.generate(&prompt).await?)
    }

    pub async fn roi_suggestions(&self, home_features: &str) -> Result<String, LlmError> {
        info!("Suggesting ROI improvements");
        self.generator
            .generate(&prompts::roi_prompt(home_features))
            .await
    }
}
