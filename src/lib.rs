//! # domhash
//!
//! Structure-aware fingerprinting of HTML/DOM trees.
//!
//! ## Features
//!
//! - **Structural hashing**: canonicalize an element tree (tags, filtered attributes) and digest it
//! - **Shape vectors**: run-length compressed tag sequences for fuzzy comparison
//! - **Layout-aware hashing**: fingerprint display/visibility/opacity/position per element
//! - **Scoring**: heuristic resilience and structural-informativeness scores
//! - **Comparison**: edit-distance, Jaccard, LCS, cosine and token edit similarity plus a structural diff
//!
//! ## Command Line
//!
//! ```bash
//! # Fingerprint a file with a shape vector and layout hash
//! cargo run --bin domhash -- page.html --shape --layout
//!
//! # Compare two pages and print a Markdown report
//! cargo run --bin domhash -- a.html --compare b.html --diff --output markdown
//! ```
//!
//! ## Library Usage
//!
//! ### Fingerprinting
//!
//! ```rust,no_run
//! use domhash::{DomHashOptions, HashAlgorithm, domhash, parse_html};
//!
//! # fn main() -> domhash::Result<()> {
//! let root = parse_html("<ul><li>One</li><li>Two</li></ul>")?;
//! let options = DomHashOptions::default()
//!     .algorithm(HashAlgorithm::Murmur3)
//!     .shape_vector(true)
//!     .layout_aware(true);
//!
//! let result = domhash(&root, &options)?;
//! println!("{} {:?}", result.hash, result.shape);
//! # Ok(())
//! # }
//! ```
//!
//! ### Comparing
//!
//! ```rust,no_run
//! use domhash::{CompareOptions, DomHashOptions, ShapeMetric, compare_results, domhash, parse_html};
//!
//! # fn main() -> domhash::Result<()> {
//! let options = DomHashOptions::default().shape_vector(true);
//! let a = domhash(&parse_html("<div><p></p></div>")?, &options)?;
//! let b = domhash(&parse_html("<div><span></span></div>")?, &options)?;
//!
//! let comparison = compare_results(&a, &b, &CompareOptions::default().shape_metric(ShapeMetric::Lcs));
//! println!("similarity: {:.2}", comparison.similarity);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`dom`]: element tree model and style resolution
//! - [`source`]: HTML parsing and input acquisition (HTTP fetch, or headless Chrome with the `chrome` feature)
//! - [`fingerprint`]: canonicalization, shape vectors, layout features and the [`domhash`] aggregate
//! - [`digest`]: named hash algorithms
//! - [`score`]: resilience and structural scoring
//! - [`compare`]: similarity metrics, structural diff and result comparison
//! - [`format`]: JSON, Markdown and HTML reports
//! - [`config`]: options, loadable from JSON
//! - [`error`]: error types and result aliases

pub mod compare;
pub mod config;
pub mod digest;
pub mod dom;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod score;
pub mod source;

pub use compare::{ComparisonResult, ShapeMetric, compare_results, structural_diff};
pub use config::{CompareOptions, DomHashOptions};
pub use digest::{HashAlgorithm, digest};
pub use dom::{ComputedStyle, DomNode, DomTree, ElementNode, StyleFacts};
pub use error::{DomHashError, Result};
pub use fingerprint::{DomHashResult, DomNodeShape, LayoutFeature, Stats, domhash, domhash_with};
pub use format::{OutputFormat, format_result};
pub use score::{Label, ScoreBreakdown};
pub use source::{load_element, parse_html, read_input};
