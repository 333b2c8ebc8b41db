//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default page size for list requests.
const fn default_page_size() -> u32 {
    20
}

const fn default_upcoming_exam_limit() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Page size sent with list requests when the caller gives none.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// How many exams the upcoming-exams endpoint is asked for.
    #[serde(default = "default_upcoming_exam_limit")]
    pub upcoming_exam_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            upcoming_exam_limit: default_upcoming_exam_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.upcoming_exam_limit, 5);
    }
}
