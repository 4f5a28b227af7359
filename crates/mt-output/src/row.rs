//! Plain data row types written by output backends.

/// One entity's rendered position at one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRow {
    pub entity: u64,
    pub frame:  u64,
    pub lat:    f64,
    pub lon:    f64,
}

/// One recorded snapshot, summarised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummaryRow {
    pub frame:    u64,
    pub entities: u64,
    /// The offset in effect, or `None` before the first scrub.
    pub offset:   Option<i32>,
}
