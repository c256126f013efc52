//! transfer link preprocessing for the fastnet path assignment engine.
//! merges a base feed's transfer declarations with the GTFS-PLUS style
//! supplemental transfers file, derives walk time metrics, resolves numeric
//! stop ids, and writes the intermediate file the engine consumes.
pub mod transfers;
