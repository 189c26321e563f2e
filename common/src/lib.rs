//! Cat Discovery Common Library
//!
//! CLIとWeb(WASM)で共有される型・除外判定・ディスカバリーループ

pub mod types;
pub mod error;
pub mod exclusion;
pub mod discovery;
pub mod api;

pub use types::{Breed, Candidate};
pub use error::{Error, FetchError, Result};
pub use exclusion::{
    AttributeKind, ExclusionList, ExclusionRule, ban_targets, is_excluded, preset_rules,
};
pub use discovery::{CandidateSource, Discovery, MAX_ATTEMPTS, discover, discover_with_limit};
pub use api::{API_KEY_HEADER, DEFAULT_API_BASE, parse_search_response, search_url, take_first};
