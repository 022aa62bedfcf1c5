//! Entity structs for all Lexi domain objects.
//!
//! Each entity maps to a table (or an aggregate query) in the libSQL database.
//! All structs derive `Serialize` and `Deserialize` for JSON output.

mod callback;
mod stats;
mod word;

pub use callback::CallbackRecord;
pub use stats::WordStats;
pub use word::{NewWord, WordEntry, normalize_word};
