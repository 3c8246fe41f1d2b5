//! Output generation for the collected topics.
//!
//! # Submodules
//!
//! - [`json`]: Writes the accumulated records to a date-stamped JSON file
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── yahoo_news_20240101.json
//! ```

pub mod json;
