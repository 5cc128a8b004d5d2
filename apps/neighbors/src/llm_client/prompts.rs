// Shared prompt fragments and prompt-building utilities.
// Use-case prompts live in advisor::prompts; this file holds the pieces
// every prompt is assembled from.

/// Opening and closing marker of the user-supplied section.
pub const SECTION_DELIMITER: &str = "---";

/// Appends `heading` and the delimited `body` to a preamble.
///
/// The body is interpolated verbatim: no trimming, escaping or sanitising.
pub fn with_delimited_section(preamble: &str, heading: &str, body: &str) -> String {
    format!("{preamble}\n\n{heading}:\n{SECTION_DELIMITER}{body}{SECTION_DELIMITER}")
}
