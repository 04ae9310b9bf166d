//! textlens keyword-map classifier.
//!
//! Maps a text to exactly one category label by counting which of each
//! category's trigger substrings appear in it.
//!
//! ## Pure function guarantee
//!
//! No I/O, no models, no randomness. Same lexicon and same text give the
//! same label on any machine. Ties are settled by lexicon declaration
//! order, never by hash-map iteration.
//!
//! ## Example
//!
//! ```
//! use classify::{classify, CategoryLexicon};
//!
//! let lexicon = CategoryLexicon::default();
//! assert_eq!(classify("Learn Rust programming on GitHub", &lexicon), "Technology");
//! assert_eq!(classify("", &lexicon), "Other");
//! ```

mod classifier;
mod error;
mod lexicon;

pub use crate::classifier::{classify, score, CategoryScore};
pub use crate::error::LexiconError;
pub use crate::lexicon::{CategoryEntry, CategoryLexicon, DEFAULT_LEXICON, OTHER};
