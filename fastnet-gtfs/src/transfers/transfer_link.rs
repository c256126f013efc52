use super::TransferType;
use chrono::Duration;
use std::collections::BTreeMap;

/// one row of the merged transfer relation: a directed pedestrian connection
/// between two transit stops, keyed on (from_stop, to_stop).
///
/// built by [super::TransferCatalog::load], enriched in place by the derive
/// and resolve steps, then read-only for the rest of the network load.
#[derive(Debug, Clone)]
pub struct TransferLink {
    /// origin stop identifier
    pub from_stop: String,
    /// destination stop identifier
    pub to_stop: String,
    /// origin stop numeric id; None until resolved against the stop registry
    pub from_stop_num: Option<usize>,
    /// destination stop numeric id; None until resolved
    pub to_stop_num: Option<usize>,
    pub transfer_type: TransferType,
    /// minimum transfer time in seconds. nonzero only for minimum-time
    /// transfers.
    pub min_transfer_time_sec: f64,
    /// minimum transfer time in minutes, derived from the seconds value
    pub min_transfer_time_min: f64,
    /// link walk distance in miles, from the supplemental file. absent only
    /// for rows that never matched a supplemental declaration.
    pub distance_miles: Option<f64>,
    /// link walk time in minutes, derived from distance and walk speed and
    /// floored by min_transfer_time_min
    pub walk_time_min: Option<f64>,
    /// duration mirror of walk_time_min, kept in memory for callers that
    /// want time arithmetic; not exported
    pub walk_time: Option<Duration>,
    /// origin route restricting this link's applicability. loaded but not
    /// yet applied anywhere.
    pub from_route: Option<String>,
    /// destination route restricting this link's applicability. loaded but
    /// not yet applied anywhere.
    pub to_route: Option<String>,
    /// opaque passthrough
    pub schedule_precedence: Option<String>,
    /// descriptive supplemental columns (elevation gain, densities, ...)
    /// carried through untouched to the export
    pub extras: BTreeMap<String, String>,
    /// generic link cost, fixed at load time. downstream weighting may vary
    /// it later.
    pub penalty: f64,
}

impl TransferLink {
    pub const PENALTY: f64 = 1.0;
}
