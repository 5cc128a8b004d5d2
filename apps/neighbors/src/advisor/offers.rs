//! Offer documents gathered for a single comparison request.

/// One purchase offer: a user-facing label and the text extracted from its PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferDocument {
    pub label: String,
    pub text: String,
}

/// Offers keyed by label, kept in insertion order.
///
/// Only documents with usable text are admitted, so `len()` is always the
/// number of offers that can take part in a comparison.
#[derive(Debug, Clone, Default)]
pub struct OfferSet {
    offers: Vec<OfferDocument>,
}

impl OfferSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an offer. Returns `false` (and stores nothing) when `text` is blank.
    /// A label that is already present has its text replaced in place.
    pub fn insert(&mut self, label: impl Into<String>, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            return false;
        }
        let label = label.into();
        match self.offers.iter_mut().find(|o| o.label == label) {
            Some(existing) => existing.text = text,
            None => self.offers.push(OfferDocument { label, text }),
        }
        true
    }

    pub(crate) fn len(&self) -> usize {
        self.offers.len()
    }

    /// All offers joined into the single block the comparison prompt takes.
    pub fn combined_text(&self) -> String {
        self.offers
            .iter()
            .map(|o| {
                format!(
                    "\n\n--- Offer: {} ---\n{}\n---------------------\n",
                    o.label, o.text
                )
            })
            .collect()
    }
}
