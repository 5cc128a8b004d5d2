//! Interactive console front end.
//!
//! A blocking menu loop over any `BufRead`/`Write` pair. Multi-line answers
//! are read up to a sentinel line; each menu action makes at most one API call.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::warn;

use crate::advisor::offers::OfferSet;
use crate::advisor::{Advisor, ComparisonError};
use crate::documents::{extract_text_from_path, usable_text, ExtractError};
use crate::llm_client::LlmError;
use crate::storage::{self, COMPARISON_FILE, LISTING_FILE};

/// Line that ends multi-line console input.
pub const SENTINEL: &str = "END";

const BANNER: &str = "
    ---------------------------------------
        Real Estate AI
    ---------------------------------------
";

const MENU: &str = "
Choose an action:
1. Create a compelling real estate listing description for my home
2. Give me a step-by-step plan for selling my home in the next 90 days.
3. Help me review an offer I received for my home.
4. Compare multiple offers I received for my home.
5. Increase my ROI on my sale.
6. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Listing,
    SalePlan,
    ReviewOffer,
    CompareOffers,
    Roi,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Listing),
            "2" => Some(MenuChoice::SalePlan),
            "3" => Some(MenuChoice::ReviewOffer),
            "4" => Some(MenuChoice::CompareOffers),
            "5" => Some(MenuChoice::Roi),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Reads lines until one equals `sentinel` (trimmed, case-insensitive) or input ends.
/// The sentinel line itself is not returned.
pub fn read_until_sentinel<R: BufRead>(reader: &mut R, sentinel: &str) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    while let Some(line) = read_line(reader)? {
        if line.trim().eq_ignore_ascii_case(sentinel) {
            break;
        }
        lines.push(line);
    }
    Ok(lines)
}

/// One line without its terminator, or `None` at end of input.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Prints `prompt` without a newline and reads the answer.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        read_line(&mut self.input)
    }

    fn ask_multiline(&mut self, prompt: &str) -> io::Result<String> {
        self.say(prompt)?;
        self.output.flush()?;
        Ok(read_until_sentinel(&mut self.input, SENTINEL)?.join("\n"))
    }
}

/// Runs the menu loop until the user exits or input ends.
pub struct Session {
    advisor: Advisor,
    output_dir: PathBuf,
}

impl Session {
    pub fn new(advisor: Advisor, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            advisor,
            output_dir: output_dir.into(),
        }
    }

    pub async fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        console.say(BANNER)?;

        loop {
            console.say(MENU)?;
            let Some(answer) = console.ask("Enter your choice (1-6): ")? else {
                console.say("")?;
                break;
            };

            match MenuChoice::parse(&answer) {
                Some(MenuChoice::Listing) => self.listing(console).await?,
                Some(MenuChoice::SalePlan) => self.sale_plan(console).await?,
                Some(MenuChoice::ReviewOffer) => self.review_offer(console).await?,
                Some(MenuChoice::CompareOffers) => self.compare_offers(console).await?,
                Some(MenuChoice::Roi) => self.roi(console).await?,
                Some(MenuChoice::Exit) => {
                    console.say("Exiting Real Estate AI. Goodbye!")?;
                    return Ok(());
                }
                None => console.say("Invalid choice. Please enter a number between 1 and 6.")?,
            }
        }

        Ok(())
    }

    async fn listing<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let details = console.ask_multiline(&format!(
            "\nEnter the property details (finish with a line containing {SENTINEL}):"
        ))?;
        if details.trim().is_empty() {
            console.say("No property details entered. Nothing to describe.")?;
            return Ok(());
        }

        console.say("\nGenerating Description...")?;
        let outcome = self.advisor.listing_description(&details).await;
        if let Some(text) = show(console, "--- Listing Description ---", outcome)? {
            self.save(console, LISTING_FILE, &text).await?;
        }
        Ok(())
    }

    async fn sale_plan<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let details = console.ask_multiline(&format!(
            "\nDescribe your market and home (finish with a line containing {SENTINEL}):"
        ))?;
        if details.trim().is_empty() {
            console.say("Please provide some market and home details.")?;
            return Ok(());
        }

        console.say("\nGenerating your personalized plan...")?;
        let outcome = self.advisor.sale_plan(&details).await;
        show(console, "--- 90-Day Sale Plan ---", outcome)?;
        Ok(())
    }

    async fn review_offer<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let Some(path) = console.ask("Enter the path to the PDF offer document: ")? else {
            return Ok(());
        };

        let Some(offer_text) = self.read_offer(console, Path::new(path.trim()))? else {
            console.say("Could not process the PDF. Please try again.")?;
            return Ok(());
        };

        console.say("\nReviewing offer...")?;
        let outcome = self.advisor.review_offer(&offer_text).await;
        show(console, "--- Offer Review ---", outcome)?;
        Ok(())
    }

    async fn compare_offers<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        let Some(answer) = console.ask("How many offers would you like to compare? ")? else {
            return Ok(());
        };
        let Ok(count) = answer.trim().parse::<usize>() else {
            console.say("Please enter the number of offers as a whole number.")?;
            return Ok(());
        };

        let mut offers = OfferSet::new();
        for i in 1..=count {
            let Some(label) = console.ask(&format!(
                "Enter a name for Offer {i} (e.g., 'Offer A', 'Offer from Smith Family'): "
            ))?
            else {
                break;
            };
            let Some(path) = console.ask(&format!("Enter the path to the PDF for '{label}': "))?
            else {
                break;
            };

            let admitted = match self.read_offer(console, Path::new(path.trim()))? {
                Some(text) => offers.insert(label.clone(), text),
                None => false,
            };
            if !admitted {
                console.say(&format!(
                    "Warning: Could not process '{label}' PDF. Skipping this offer."
                ))?;
            }
        }

        match self.advisor.compare_offers(&offers).await {
            Ok(text) => {
                console.say("\n--- Offer Comparison ---")?;
                console.say(&text)?;
                self.save(console, COMPARISON_FILE, &text).await?;
            }
            Err(ComparisonError::Llm(e)) => {
                show(console, "--- Offer Comparison ---", Err(e))?;
            }
            Err(ComparisonError::NotEnoughOffers { usable: 1 }) => console.say(
                "You only provided one valid offer. Use option 3 for a single offer review.",
            )?,
            Err(ComparisonError::NotEnoughOffers { .. }) => {
                console.say("No valid offers were provided. Please try again.")?
            }
        }
        Ok(())
    }

    async fn roi<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let features = console.ask_multiline(&format!(
            "\nDescribe your home's features, condition and budget (finish with a line containing {SENTINEL}):"
        ))?;
        if features.trim().is_empty() {
            console.say("Please describe your home to get suggestions.")?;
            return Ok(());
        }

        console.say("\nAnalyzing and suggesting improvements...")?;
        let outcome = self.advisor.roi_suggestions(&features).await;
        show(console, "--- ROI Suggestions ---", outcome)?;
        Ok(())
    }

    /// Extracts an offer PDF, printing why when there is no usable text.
    fn read_offer<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        path: &Path,
    ) -> io::Result<Option<String>> {
        match extract_text_from_path(path) {
            Ok(text) => Ok(usable_text(text)),
            Err(ExtractError::Extraction(cause)) => {
                console.say(&format!("An error occurred while reading the PDF: {cause}"))?;
                Ok(None)
            }
            Err(e) => {
                console.say(&format!("Error: {e}"))?;
                Ok(None)
            }
        }
    }

    async fn save<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        file_name: &str,
        content: &str,
    ) -> io::Result<()> {
        let path = self.output_dir.join(file_name);
        if let Err(e) = storage::save(&path, content).await {
            warn!("Could not save {}: {e}", path.display());
            console.say(&format!("Could not save the result: {e}"))?;
        }
        Ok(())
    }
}

/// Prints the heading and the text, or the failure message in its place.
/// Returns the text only when generation succeeded.
fn show<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    heading: &str,
    outcome: Result<String, LlmError>,
) -> io::Result<Option<String>> {
    console.say(&format!("\n{heading}"))?;
    match outcome {
        Ok(text) => {
            console.say(&text)?;
            Ok(Some(text))
        }
        Err(e) => {
            warn!("Generation failed: {e}");
            console.say(&e.user_message())?;
            Ok(None)
        }
    }
}
