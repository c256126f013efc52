use serde::{Deserialize, Serialize};

/// explicit configuration for the transfer pipeline. the defaults match the
/// values the routing extension was calibrated against; tests and callers
/// with unusual networks can override them per instance.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TransferConfig {
    /// assumed pedestrian speed used to derive walk times from link distance
    pub walk_speed_mph: f64,
    /// upper bound on any derived walk time, in minutes. links above the
    /// bound fail the whole load.
    pub max_walk_time_min: f64,
    /// name of the supplemental transfers file within the input directory
    pub input_filename: String,
    /// name of the intermediate file written for the routing extension
    pub output_filename: String,
}

impl TransferConfig {
    pub const DEFAULT_WALK_SPEED_MPH: f64 = 3.0;
    /// a 13 hour walk transfer is suspicious
    pub const DEFAULT_MAX_WALK_TIME_MIN: f64 = 780.0;
    pub const DEFAULT_INPUT_FILENAME: &str = "transfers_ft.txt";
    pub const DEFAULT_OUTPUT_FILENAME: &str = "ft_intermediate_transfers.txt";
}

impl Default for TransferConfig {
    fn default() -> Self {
        TransferConfig {
            walk_speed_mph: Self::DEFAULT_WALK_SPEED_MPH,
            max_walk_time_min: Self::DEFAULT_MAX_WALK_TIME_MIN,
            input_filename: Self::DEFAULT_INPUT_FILENAME.to_string(),
            output_filename: Self::DEFAULT_OUTPUT_FILENAME.to_string(),
        }
    }
}
