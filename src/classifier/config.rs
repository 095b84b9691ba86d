/// Thresholds and scoring constants for the spoilage verdict.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Primary-channel level above which food is called spoiled (strictly greater).
    pub spoiled_threshold: f64,

    /// Confidence at the threshold, and per-unit growth away from it, for each side
    pub spoiled_base: f64,
    pub spoiled_slope: f64,
    pub fresh_base: f64,
    pub fresh_slope: f64,

    /// Upper bound on any reported confidence
    pub confidence_cap: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            spoiled_threshold: 300.0,
            spoiled_base: 85.0,
            spoiled_slope: 0.1,
            fresh_base: 90.0,
            fresh_slope: 0.05,
            confidence_cap: 99.9,
        }
    }
}
