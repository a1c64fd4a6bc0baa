//! Domain primitives: TimeMs and entity id newtypes.

use serde::{Deserialize, Serialize};

/// Milliseconds in one whole day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Time in milliseconds since Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeMs(pub i64);

impl TimeMs {
    /// Create a TimeMs from milliseconds.
    pub fn new(ms: i64) -> Self {
        TimeMs(ms)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        TimeMs(chrono::Utc::now().timestamp_millis())
    }

    /// Get the underlying milliseconds value.
    pub fn as_ms(&self) -> i64 {
        self.0
    }

    /// Whole days elapsed from `earlier` to `self`, floored.
    ///
    /// A stage timestamp in the future counts as zero days elapsed.
    pub fn whole_days_since(&self, earlier: TimeMs) -> i64 {
        let elapsed = self.0 - earlier.0;
        if elapsed <= 0 {
            0
        } else {
            elapsed / DAY_MS
        }
    }
}

/// Partner account identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PartnerId(pub String);

impl PartnerId {
    pub fn new(id: String) -> Self {
        PartnerId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Referral record identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReferralId(pub String);

impl ReferralId {
    pub fn new(id: String) -> Self {
        ReferralId(id)
    }

    /// Mint a fresh random id.
    pub fn generate() -> Self {
        ReferralId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferralId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Commission record identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommissionId(pub String);

impl CommissionId {
    pub fn new(id: String) -> Self {
        CommissionId(id)
    }

    /// Mint a fresh random id.
    pub fn generate() -> Self {
        CommissionId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_days_since_floors() {
        let start = TimeMs::new(0);
        assert_eq!(TimeMs::new(DAY_MS - 1).whole_days_since(start), 0);
        assert_eq!(TimeMs::new(DAY_MS).whole_days_since(start), 1);
        assert_eq!(TimeMs::new(3 * DAY_MS + 500).whole_days_since(start), 3);
    }

    #[test]
    fn test_whole_days_since_future_timestamp() {
        let now = TimeMs::new(1000);
        assert_eq!(now.whole_days_since(TimeMs::new(5000)), 0);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(ReferralId::generate(), ReferralId::generate());
        assert_ne!(CommissionId::generate(), CommissionId::generate());
    }

    #[test]
    fn test_timems_ordering() {
        assert!(TimeMs::new(1000) < TimeMs::new(2000));
    }
}
