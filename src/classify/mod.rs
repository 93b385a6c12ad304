//! URL Classifier
//!
//! Decides whether a navigated URL's host sits under a standard,
//! conventionally delegated TLD or needs the resolution bridge.
//!
//! # Example
//!
//! ```rust
//! use tldbridge::classify::{parse, TldAllowList};
//!
//! let tlds = TldAllowList::standard();
//! let url = parse("https://mysite.hns/").unwrap();
//! assert_eq!(url.tld(), "hns");
//! assert!(!tlds.is_standard(&url));
//! ```

mod tld;
mod url;

pub use tld::TldAllowList;
pub use url::{parse, ParsedUrl};

/// Whether `parsed`'s TLD is in `tlds`.
pub fn is_standard_tld(parsed: &ParsedUrl, tlds: &TldAllowList) -> bool {
    tlds.is_standard(parsed)
}
