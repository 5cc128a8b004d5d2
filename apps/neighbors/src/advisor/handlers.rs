//! Axum route handlers for the form UI.
//!
//! Every handler renders the full page: the selected action's widgets plus
//! any inline errors, warnings and the generated result.

use askama::Template;
use axum::{
    body::Bytes,
    extract::{Multipart, Query, State},
    response::Html,
    Form,
};
use serde::Deserialize;
use tracing::warn;

use crate::advisor::offers::OfferSet;
use crate::advisor::prompts::ListingDetails;
use crate::advisor::views::{Action, IndexPage};
use crate::advisor::ComparisonError;
use crate::documents::{extract_text_from_bytes, usable_text, ExtractError};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub action: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SalePlanForm {
    pub market_details: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoiForm {
    pub home_features: String,
}

/// One uploaded file from a multipart form.
struct Upload {
    file_name: String,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_index(Query(query): Query<IndexQuery>) -> Result<Html<String>, AppError> {
    let action = query.action.as_deref().and_then(Action::from_key);
    render(IndexPage::new(action))
}

/// POST /listing
pub async fn handle_listing(
    State(state): State<AppState>,
    Form(details): Form<ListingDetails>,
) -> Result<Html<String>, AppError> {
    let mut page = IndexPage::new(Some(Action::Listing));
    if details.is_empty() {
        page.listing = details;
        return render(
            page.with_error("Please fill in at least some details to generate a description."),
        );
    }

    let outcome = state.advisor.listing_description(&details.render()).await;
    page.listing = details;
    render(page.with_outcome(Action::Listing, outcome))
}

/// POST /sale-plan
pub async fn handle_sale_plan(
    State(state): State<AppState>,
    Form(form): Form<SalePlanForm>,
) -> Result<Html<String>, AppError> {
    let mut page = IndexPage::new(Some(Action::SalePlan));
    if form.market_details.trim().is_empty() {
        return render(page.with_error("Please provide some market and home details."));
    }

    let outcome = state.advisor.sale_plan(&form.market_details).await;
    page.market_details = form.market_details;
    render(page.with_outcome(Action::SalePlan, outcome))
}

/// POST /offer-review
pub async fn handle_offer_review(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let page = IndexPage::new(Some(Action::OfferReview));
    let uploads = collect_uploads(&mut multipart, "file").await?;
    let Some(upload) = uploads.into_iter().next() else {
        return render(page.with_error("Please upload a PDF offer document."));
    };

    let offer_text = match extract(upload.data).await? {
        Ok(text) => text,
        Err(e) => {
            warn!("Could not extract {}: {e}", upload.file_name);
            return render(
                page.with_error(format!("An error occurred while processing the PDF: {e}")),
            );
        }
    };
    let Some(offer_text) = usable_text(offer_text) else {
        return render(page.with_error(
            "Could not extract text from the PDF. Please ensure it is not a scanned image.",
        ));
    };

    let outcome = state.advisor.review_offer(&offer_text).await;
    render(page.with_outcome(Action::OfferReview, outcome))
}

/// POST /offer-comparison
pub async fn handle_offer_comparison(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let mut page = IndexPage::new(Some(Action::OfferComparison));
    let uploads = collect_uploads(&mut multipart, "files").await?;

    // Offers are parsed one at a time, in upload order.
    let mut offers = OfferSet::new();
    for upload in uploads {
        match extract(upload.data).await? {
            Ok(text) => {
                if !offers.insert(format!("Offer from {}", upload.file_name), text) {
                    page = page.with_warning(format!(
                        "Could not extract text from {}. Skipping this offer.",
                        upload.file_name
                    ));
                }
            }
            Err(e) => {
                warn!("Could not extract {}: {e}", upload.file_name);
                page = page.with_error(format!(
                    "An error occurred while processing {}: {e}",
                    upload.file_name
                ));
            }
        }
    }

    let page = match state.advisor.compare_offers(&offers).await {
        Ok(text) => page.with_outcome(Action::OfferComparison, Ok(text)),
        Err(ComparisonError::Llm(e)) => page.with_outcome(Action::OfferComparison, Err(e)),
        Err(ComparisonError::NotEnoughOffers { usable: 1 }) => {
            page.with_warning("Please upload at least two valid offers to compare.")
        }
        Err(ComparisonError::NotEnoughOffers { .. }) => {
            page.with_error("No valid offers were uploaded. Please try again.")
        }
    };
    render(page)
}

/// POST /roi
pub async fn handle_roi(
    State(state): State<AppState>,
    Form(form): Form<RoiForm>,
) -> Result<Html<String>, AppError> {
    let mut page = IndexPage::new(Some(Action::Roi));
    if form.home_features.trim().is_empty() {
        return render(page.with_error("Please describe your home to get suggestions."));
    }

    let outcome = state.advisor.roi_suggestions(&form.home_features).await;
    page.home_features = form.home_features;
    render(page.with_outcome(Action::Roi, outcome))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn render(page: IndexPage) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}

/// Reads every non-empty file part named `field_name`.
/// Browsers send an empty, unnamed part when no file was chosen; those are dropped.
async fn collect_uploads(
    multipart: &mut Multipart,
    field_name: &str,
) -> Result<Vec<Upload>, AppError> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        if file_name.is_empty() && data.is_empty() {
            continue;
        }
        uploads.push(Upload { file_name, data });
    }
    Ok(uploads)
}

/// Runs the CPU-bound PDF parse off the async worker.
async fn extract(data: Bytes) -> Result<Result<String, ExtractError>, AppError> {
    tokio::task::spawn_blocking(move || extract_text_from_bytes(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))
}
