// Wed Oct 14 2026 - Alex

pub type ApiLevel = i32;

/// Sentinel level that admits `future`-tagged symbols.
pub const FUTURE_API_LEVEL: ApiLevel = 10000;

pub fn parse_api_level(s: &str) -> Option<ApiLevel> {
    match s {
        "current" | "future" => Some(FUTURE_API_LEVEL),
        _ => s.parse::<ApiLevel>().ok(),
    }
}
