// Wed Oct 14 2026 - Alex

pub mod api_level;
pub mod error;
pub mod parser;
pub mod tags;

pub use api_level::{parse_api_level, ApiLevel, FUTURE_API_LEVEL};
pub use error::VersionScriptError;
pub use parser::{ErrorHandler, LineScope, VersionScriptParser};
pub use tags::{ParsedTags, POSSIBLE_ARCHES};
