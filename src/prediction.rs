//! Category predictions
//!
//! A read-only cache over the prediction blob that an external generation
//! run leaves in the key-value store.

mod cache;
mod category;

pub use cache::{ContentCache, PredictionMap, FALLBACK_TEXT, PREDICTION_KEY};
pub use category::CategoryKey;
