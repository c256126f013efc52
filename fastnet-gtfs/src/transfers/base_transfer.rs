use serde::{Deserialize, Serialize};

/// a transfer declaration from the base feed's transfer list. the base feed
/// is parsed elsewhere during network construction; this is the record shape
/// handed to the catalog.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BaseTransfer {
    pub from_stop_id: String,
    pub to_stop_id: String,
    /// policy code; absent means recommended
    pub transfer_type: Option<u8>,
    /// minimum transfer time in seconds. arrives as text; an empty string
    /// means no minimum was declared.
    pub min_transfer_time: Option<String>,
}
