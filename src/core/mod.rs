// Core logic exports
pub mod matching;
pub mod render;
pub mod triggers;

pub use matching::{
    dedup_by_id, postings_by_keywords, postings_for_profile, profiles_for_posting, today_kst,
};
pub use triggers::{classify_source, classify_trigger, ChangeSource, Trigger};
