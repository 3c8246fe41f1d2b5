//! Extraction of topic records from listing page markup.
//!
//! Each listing page embeds its data as a `__PRELOADED_STATE__ = {...};`
//! assignment inside a script tag. Extraction finds the first script
//! carrying the marker, decodes the JSON after it, and returns the records
//! under `topicsList.list`.
//!
//! Extraction never fails: markup without the marker produces an empty
//! list, and so does a blob that doesn't decode to the expected shape. The
//! pagination loop cannot tell those apart from a genuinely empty page, and
//! stops either way. The distinction is only logged.

use crate::models::{PreloadedState, TopicRecord};
use crate::utils::truncate_for_log;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Marker preceding the embedded JSON blob in a listing page's script tag.
pub const STATE_MARKER: &str = "__PRELOADED_STATE__ = ";

static SCRIPT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("script").unwrap());

/// Pull all topic records out of one page's markup.
///
/// Records come back in the order the page presents them, untouched.
pub fn extract_topics(html: &str) -> Vec<TopicRecord> {
    let document = Html::parse_document(html);

    let Some(script) = find_state_script(&document) else {
        debug!("No script tag carries the state marker");
        return Vec::new();
    };

    match decode_topics(&script) {
        Ok(records) => records,
        Err(e) => {
            warn!(
                error = %e,
                script_preview = %truncate_for_log(&script, 200),
                "State blob did not decode to a topic listing"
            );
            Vec::new()
        }
    }
}

/// Text of the first script tag containing the state marker, if any.
fn find_state_script(document: &Html) -> Option<String> {
    document
        .select(&SCRIPT_SELECTOR)
        .map(|element| element.text().collect::<String>())
        .find(|text| text.contains(STATE_MARKER))
}

/// Decode the JSON after the marker and navigate to the record list.
///
/// The blob ends with a `;` statement terminator that has to go before the
/// text parses as JSON.
fn decode_topics(script: &str) -> Result<Vec<TopicRecord>, serde_json::Error> {
    let blob = script
        .split_once(STATE_MARKER)
        .map_or(script, |(_, rest)| rest);
    let blob = blob.trim_end().trim_end_matches(';').trim_end();
    let state: PreloadedState = serde_json::from_str(blob)?;
    Ok(state.topics_list.list)
}
