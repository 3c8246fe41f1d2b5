//! The page walk: fetch listing pages, extract embedded topics, accumulate.
//!
//! Collection follows a consistent three-stage pattern per page:
//!
//! 1. **Fetching** ([`fetcher`]): one GET per page number, with the response
//!    classified by status
//! 2. **Extraction** ([`extract`]): pull the topic records out of the page's
//!    embedded `__PRELOADED_STATE__` blob
//! 3. **Pagination** ([`pages`]): walk page numbers upward from 1 until the
//!    listing runs out
//!
//! Pages are fetched strictly one at a time. The upstream has no "last page"
//! field; it signals the end of the range by answering 404, so a 404 here is
//! a success condition rather than an error.

pub mod extract;
pub mod fetcher;
pub mod pages;
