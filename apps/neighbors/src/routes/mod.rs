pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::advisor::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_index))
        .route("/listing", post(handlers::handle_listing))
        .route("/sale-plan", post(handlers::handle_sale_plan))
        .route("/offer-review", post(handlers::handle_offer_review))
        .route("/offer-comparison", post(handlers::handle_offer_comparison))
        .route("/roi", post(handlers::handle_roi))
        .layer(upload_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::advisor::Advisor;
    use crate::config::Config;
    use crate::documents::test_pdf;
    use crate::llm_client::testing::ScriptedGenerator;

    const BOUNDARY: &str = "neighbors-test-boundary";

    fn app_with(generator: Arc<ScriptedGenerator>) -> Router {
        let config = Config::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some("test".to_string()),
            _ => None,
        })
        .unwrap();
        build_router(AppState {
            advisor: Advisor::new(generator),
            config,
        })
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(uri: &str, field: &str, files: &[(&str, Vec<u8>)]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, data) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                     filename=\"{name}\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(ScriptedGenerator::replying("unused")));
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "neighbors");
    }

    #[tokio::test]
    async fn test_index_renders_selected_action() {
        let app = app_with(Arc::new(ScriptedGenerator::replying("unused")));
        let request = Request::get("/?action=roi").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Get ROI Suggestions"));
    }

    #[tokio::test]
    async fn test_listing_combines_fields_and_shows_result() {
        let generator = Arc::new(ScriptedGenerator::replying("Charming bungalow"));
        let app = app_with(generator.clone());
        let (status, body) = send(
            app,
            form_request("/listing", "address=12+Elm+St&beds=3&features=new+roof"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Charming bungalow"));
        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("Address: 12 Elm St\nSquare Footage: \nBeds: 3"));
        assert!(prompt.contains("Key Features: new roof"));
    }

    #[tokio::test]
    async fn test_blank_listing_is_rejected_inline() {
        let generator = Arc::new(ScriptedGenerator::replying("unused"));
        let app = app_with(generator.clone());
        let (status, body) = send(app, form_request("/listing", "address=&beds=")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Please fill in at least some details"));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_sale_plan_and_roi_require_input() {
        let generator = Arc::new(ScriptedGenerator::replying("unused"));
        let (_, body) = send(
            app_with(generator.clone()),
            form_request("/sale-plan", "market_details=+++"),
        )
        .await;
        assert!(body.contains("Please provide some market and home details."));

        let (_, body) = send(app_with(generator.clone()), form_request("/roi", "")).await;
        assert!(body.contains("Please describe your home to get suggestions."));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_api_failure_is_shown_as_prefixed_message() {
        let app = app_with(Arc::new(ScriptedGenerator::failing()));
        let (status, body) = send(
            app,
            form_request("/sale-plan", "market_details=Austin%2C+TX"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Error calling Gemini API: "));
    }

    #[tokio::test]
    async fn test_offer_review_uses_pdf_text() {
        let generator = Arc::new(ScriptedGenerator::replying("Looks fair"));
        let app = app_with(generator.clone());
        let pdf = test_pdf::with_pages(&["Purchase price 450000"]);
        let (status, body) = send(
            app,
            multipart_request("/offer-review", "file", &[("offer.pdf", pdf)]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Looks fair"));
        assert!(generator.prompts()[0].contains("Purchase price 450000"));
    }

    #[tokio::test]
    async fn test_offer_review_without_text_is_reported() {
        let generator = Arc::new(ScriptedGenerator::replying("unused"));
        let app = app_with(generator.clone());
        let (_, body) = send(
            app,
            multipart_request(
                "/offer-review",
                "file",
                &[("scan.pdf", test_pdf::with_pages(&[""]))],
            ),
        )
        .await;

        assert!(body.contains("Could not extract text from the PDF"));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_offer_review_without_upload_is_reported() {
        let generator = Arc::new(ScriptedGenerator::replying("unused"));
        let (status, body) = send(
            app_with(generator.clone()),
            multipart_request("/offer-review", "file", &[("", Vec::new())]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Please upload a PDF offer document."));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_offer_review_of_unreadable_pdf_is_reported() {
        let generator = Arc::new(ScriptedGenerator::replying("unused"));
        let (status, body) = send(
            app_with(generator.clone()),
            multipart_request("/offer-review", "file", &[("offer.pdf", b"garbage".to_vec())]),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("An error occurred while processing the PDF: "));
        assert!(!body.contains("An error occurred while reading the PDF"));
        assert!(generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_offer_comparison_skips_unusable_files() {
        let generator = Arc::new(ScriptedGenerator::replying("Offer A wins"));
        let app = app_with(generator.clone());
        let files = [
            ("a.pdf", test_pdf::with_pages(&["Price 500000"])),
            ("b.pdf", test_pdf::with_pages(&[""])),
            ("c.pdf", test_pdf::with_pages(&["Price 480000"])),
        ];
        let (status, body) =
            send(app, multipart_request("/offer-comparison", "files", &files)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Offer A wins"));
        assert!(body.contains("Could not extract text from b.pdf. Skipping this offer."));

        let prompt = &generator.prompts()[0];
        assert!(prompt.contains("--- Offer: Offer from a.pdf ---"));
        assert!(prompt.contains("--- Offer: Offer from c.pdf ---"));
        assert!(!prompt.contains("Offer from b.pdf"));
    }

    #[tokio::test]
    async fn test_offer_comparison_needs_two_valid_files() {
        let generator = Arc::new(ScriptedGenerator::replying("unused"));
        let files = [
            ("a.pdf", test_pdf::with_pages(&["Price 500000"])),
            ("broken.pdf", b"not a pdf".to_vec()),
        ];
        let (_, body) = send(
            app_with(generator.clone()),
            multipart_request("/offer-comparison", "files", &files),
        )
        .await;
        assert!(body.contains("An error occurred while processing broken.pdf"));
        assert!(body.contains("Please upload at least two valid offers to compare."));

        let (_, body) = send(
            app_with(generator.clone()),
            // What a browser sends when no file was chosen.
            multipart_request("/offer-comparison", "files", &[("", Vec::new())]),
        )
        .await;
        assert!(body.contains("No valid offers were uploaded. Please try again."));
        assert!(generator.prompts().is_empty());
    }
}
