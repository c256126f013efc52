use serde::{Deserialize, Serialize};

/// policy code governing how a transfer's time is computed, following the
/// GTFS transfers.txt taxonomy restricted to the codes this model consumes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferType {
    /// recommended transfer point between routes
    #[default]
    Recommended,
    /// the departing vehicle is expected to wait for the arriving one
    Timed,
    /// transfer requires a minimum time between arrival and departure,
    /// given by the declared min_transfer_time
    MinimumTime,
    /// transfers are not possible between routes at this location
    Infeasible,
}

impl TransferType {
    pub fn from_code(code: u8) -> Option<TransferType> {
        match code {
            0 => Some(TransferType::Recommended),
            1 => Some(TransferType::Timed),
            2 => Some(TransferType::MinimumTime),
            3 => Some(TransferType::Infeasible),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            TransferType::Recommended => 0,
            TransferType::Timed => 1,
            TransferType::MinimumTime => 2,
            TransferType::Infeasible => 3,
        }
    }
}
