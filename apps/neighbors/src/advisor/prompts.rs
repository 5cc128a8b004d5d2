// Prompt templates for the five advisor use cases.
// Every builder is total: any input, including "", yields a finished prompt.

use serde::Deserialize;

use crate::llm_client::prompts::with_delimited_section;

pub const LISTING_PREAMBLE: &str = "You are a professional real estate agent. \
Create a compelling and descriptive real estate listing description for a home based on the \
following details. Highlight the best features and use enticing language to attract potential \
buyers. Focus on the details provided and make the description suitable for online platforms.";

pub const SALE_PLAN_PREAMBLE: &str = "You are a real estate expert. \
Give me a step-by-step plan for selling my home in the next 90 days. The plan should be detailed \
and include tips on staging, pricing, timing, marketing, and negotiating. My goal is to sell \
quickly but at a fair price. The home is located in a market with the following characteristics:";

pub const OFFER_REVIEW_PREAMBLE: &str = "You are a professional and helpful real estate \
assistant. Your task is to analyze a real estate offer document and provide a concise, \
bullet-point summary of its key terms and potential red flags. Use the provided text from the \
offer document to form your analysis.

Based on the following offer document text, please provide:

1.  **Summary of Key Terms:**
    * Purchase price
    * Contingencies (e.g., financing, inspection, appraisal)
    * Closing date
    * Deposit amount
    * Any other significant terms (e.g., included or excluded items, seller concessions)

2.  **Potential Red Flags/Areas for Negotiation:**
    * Identify any clauses that seem unusual or are heavily in favor of the buyer.
    * Highlight any tight deadlines or difficult-to-meet conditions.
    * Suggest a few points that the seller might want to negotiate.";

pub const OFFER_COMPARISON_PREAMBLE: &str = "You are a professional real estate expert. \
Your task is to analyze and compare multiple real estate offers side-by-side. Based on the \
following offer documents, provide a detailed comparison in a structured format.

Your analysis should cover the following key areas:

1.  **Summary Table:** Create a table or a clear bullet-point list that compares the key terms \
for each offer.     Include at least:
    -   Purchase Price
    -   Contingencies (Inspection, Appraisal, Financing)
    -   Closing Date
    -   Earnest Money Deposit (EMD)
    -   Any Seller Concessions (e.g., closing cost credits)
    -   Buyer's Loan Type and Down Payment

2.  **Pros and Cons:** For each offer, provide a brief bullet-point list of its key advantages and disadvantages from the seller's perspective.

3.  **Overall Recommendation:** Provide a high-level summary and your professional \
recommendation on which offer is strongest and why.     Consider the price, certainty of closing, \
and timeline.";

pub const ROI_PREAMBLE: &str = "You are a home improvement and real estate expert. \
Review the following details about a home and tell me what improvements should be made before \
listing to maximize my return on investment (ROI). My budget is flexible, but I want to \
prioritize cost-effective changes. Please prioritize curb appeal, bathrooms, and kitchen if \
relevant.";

pub fn listing_description_prompt(details: &str) -> String {
    with_delimited_section(LISTING_PREAMBLE, "Home Details", details)
}

pub fn sale_plan_prompt(market_details: &str) -> String {
    with_delimited_section(SALE_PLAN_PREAMBLE, "Market Details", market_details)
}

pub fn offer_review_prompt(offer_text: &str) -> String {
    with_delimited_section(OFFER_REVIEW_PREAMBLE, "Offer Document Text", offer_text)
}

/// `combined_offers` is expected to carry one `--- Offer: <label> ---` block per offer,
/// as produced by [`super::offers::OfferSet::combined_text`].
pub fn offer_comparison_prompt(combined_offers: &str) -> String {
    with_delimited_section(
        OFFER_COMPARISON_PREAMBLE,
        "Offer Documents for Comparison",
        combined_offers,
    )
}

pub fn roi_prompt(home_features: &str) -> String {
    with_delimited_section(ROI_PREAMBLE, "Home Details", home_features)
}

/// Structured property fields collected by the web form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingDetails {
    pub address: String,
    pub sqft: String,
    pub beds: String,
    pub baths: String,
    pub features: String,
    pub neighborhood: String,
}

impl ListingDetails {
    /// True when every field is blank.
    pub fn is_empty(&self) -> bool {
        [
            &self.address,
            &self.sqft,
            &self.beds,
            &self.baths,
            &self.features,
            &self.neighborhood,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }

    /// Flattens the fields into the free-text block the listing prompt takes.
    pub fn render(&self) -> String {
        format!(
            "Address: {}\nSquare Footage: {}\nBeds: {}\nBaths: {}\nKey Features: {}\nNeighborhood: {}",
            self.address, self.sqft, self.beds, self.baths, self.features, self.neighborhood
        )
    }
}
