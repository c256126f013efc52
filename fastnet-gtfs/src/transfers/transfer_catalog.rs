use super::base_transfer::BaseTransfer;
use super::export_ops;
use super::stop_id_resolver::StopIdResolver;
use super::supplemental_row::{self, SupplementalRow};
use super::transfer_config::TransferConfig;
use super::transfer_error::TransferError;
use super::transfer_link::TransferLink;
use super::transfer_type::TransferType;
use chrono::Duration;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// name the base feed's transfer list is reported under in diagnostics
const BASE_TRANSFERS_FILENAME: &str = "transfers.txt";

/// the unified transfer link relation for one network load.
///
/// built once from the base feed and the supplemental transfers file,
/// enriched in place with derived walk times and numeric stop ids, then
/// read-only for the rest of the process. the export step works on a
/// derived copy and never mutates the relation.
pub struct TransferCatalog {
    pub links: Vec<TransferLink>,
    config: TransferConfig,
    output_directory: PathBuf,
}

impl TransferCatalog {
    /// merges the base feed's transfer declarations with the supplemental
    /// transfers file found in `input_dir`.
    ///
    /// the supplemental file drives the merge: every one of its rows
    /// survives, with or without a base feed counterpart, while base feed
    /// declarations for pairs it does not list are dropped. this keeps
    /// links to and from locations the base feed does not know about, such
    /// as park-and-ride lots.
    pub fn load(
        base_transfers: &[BaseTransfer],
        input_dir: &Path,
        output_directory: &Path,
        config: TransferConfig,
    ) -> Result<TransferCatalog, TransferError> {
        let supplemental =
            supplemental_row::read_supplemental_file(input_dir, &config.input_filename)?;

        let links = if supplemental.is_empty() {
            // nothing to join against; base declarations pass through unchanged
            let mut links = Vec::with_capacity(base_transfers.len());
            for record in base_transfers {
                let (transfer_type, min_transfer_time_sec) = coerce_base(record)?;
                links.push(TransferLink {
                    from_stop: record.from_stop_id.clone(),
                    to_stop: record.to_stop_id.clone(),
                    from_stop_num: None,
                    to_stop_num: None,
                    transfer_type,
                    min_transfer_time_sec,
                    min_transfer_time_min: 0.0,
                    distance_miles: None,
                    walk_time_min: None,
                    walk_time: None,
                    from_route: None,
                    to_route: None,
                    schedule_precedence: None,
                    extras: BTreeMap::new(),
                    penalty: TransferLink::PENALTY,
                });
            }
            links
        } else {
            // index the base declarations by stop pair. the base feed does
            // not guarantee unique pairs; the first declaration wins.
            let mut index: HashMap<(&str, &str), (TransferType, f64)> = HashMap::new();
            for record in base_transfers {
                let coerced = coerce_base(record)?;
                index
                    .entry((record.from_stop_id.as_str(), record.to_stop_id.as_str()))
                    .or_insert(coerced);
            }

            let mut links = Vec::with_capacity(supplemental.len());
            for row in supplemental {
                let (transfer_type, min_transfer_time_sec) = match index
                    .get(&(row.from_stop_id.as_str(), row.to_stop_id.as_str()))
                {
                    Some(base_values) => *base_values,
                    None => supplemental_policy(&row, &config.input_filename)?,
                };
                // the minimum only applies to minimum-time transfers
                let min_transfer_time_sec = match transfer_type {
                    TransferType::MinimumTime => min_transfer_time_sec,
                    _ => 0.0,
                };
                links.push(TransferLink {
                    from_stop: row.from_stop_id,
                    to_stop: row.to_stop_id,
                    from_stop_num: None,
                    to_stop_num: None,
                    transfer_type,
                    min_transfer_time_sec,
                    min_transfer_time_min: 0.0,
                    distance_miles: Some(row.dist),
                    walk_time_min: None,
                    walk_time: None,
                    from_route: row.from_route_id,
                    to_route: row.to_route_id,
                    schedule_precedence: row.schedule_precedence,
                    extras: row.extras,
                    penalty: TransferLink::PENALTY,
                });
            }
            links
        };

        let catalog = TransferCatalog {
            links,
            config,
            output_directory: output_directory.to_path_buf(),
        };
        catalog.log_relation();
        Ok(catalog)
    }

    /// computes walk times from link distance, verifies them against the
    /// configured bound, and applies the minimum transfer time floor.
    ///
    /// a bound violation fails the whole load: distances that produce
    /// multi-hour walk transfers almost always mean the supplemental file
    /// recorded meters or feet where miles were expected, and letting them
    /// through would corrupt every downstream path cost.
    pub fn derive_metrics(&mut self) -> Result<(), TransferError> {
        if self.links.is_empty() {
            return Ok(());
        }
        let walk_speed_mph = self.config.walk_speed_mph;
        for link in self.links.iter_mut() {
            link.min_transfer_time_min = link.min_transfer_time_sec / 60.0;
            link.walk_time_min = link
                .distance_miles
                .map(|dist| dist * 60.0 / walk_speed_mph);
        }

        let too_long = self
            .links
            .iter()
            .filter(|link| {
                matches!(link.walk_time_min, Some(walk) if walk > self.config.max_walk_time_min)
            })
            .collect_vec();
        if !too_long.is_empty() {
            let message = format!(
                "found {} excessively long transfer links out of {} total transfer links. expected distances are in miles. unit problem?",
                too_long.len(),
                self.links.len()
            );
            log::error!("{message}");
            for link in too_long.iter().take(5) {
                log::error!("{link:?}");
            }
            return Err(TransferError::InputFormatError {
                filename: self.config.input_filename.clone(),
                message,
            });
        }

        for link in self.links.iter_mut() {
            if let Some(walk_time_min) = link.walk_time_min {
                let floored = walk_time_min.max(link.min_transfer_time_min);
                link.walk_time_min = Some(floored);
                link.walk_time = Some(Duration::milliseconds((floored * 60_000.0).round() as i64));
            }
        }
        Ok(())
    }

    /// resolves both stop id columns against the registry and, once both
    /// are complete, writes the intermediate file for the routing
    /// extension.
    ///
    /// an id the registry does not know is logged and left unresolved; the
    /// row stays in the relation but cannot be exported.
    pub fn attach_stop_ids(
        &mut self,
        registry: &dyn StopIdResolver,
    ) -> Result<(), TransferError> {
        if self.links.is_empty() {
            return Ok(());
        }
        for link in self.links.iter_mut() {
            link.from_stop_num = registry.resolve(&link.from_stop);
            if link.from_stop_num.is_none() {
                log::warn!(
                    "numeric stop id not found for transfer from_stop_id '{}'",
                    link.from_stop
                );
            }
        }
        for link in self.links.iter_mut() {
            link.to_stop_num = registry.resolve(&link.to_stop);
            if link.to_stop_num.is_none() {
                log::warn!(
                    "numeric stop id not found for transfer to_stop_id '{}'",
                    link.to_stop
                );
            }
        }
        self.write_extension_file()
    }

    /// writes the long-form transfer attributes file consumed by the
    /// routing extension.
    pub fn write_extension_file(&self) -> Result<(), TransferError> {
        export_ops::write_extension_file(&self.links, &self.output_directory, &self.config)
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    fn log_relation(&self) {
        let head = self.links.iter().take(5).collect_vec();
        log::debug!("=== transfers === {head:#?}");
        log::info!(
            "read {:7} transfers from {}, {}",
            self.links.len(),
            BASE_TRANSFERS_FILENAME,
            self.config.input_filename
        );
    }
}

/// normalizes one base feed declaration into a policy code and a minimum
/// transfer time in seconds.
fn coerce_base(record: &BaseTransfer) -> Result<(TransferType, f64), TransferError> {
    let transfer_type = match record.transfer_type {
        None => TransferType::default(),
        Some(code) => {
            TransferType::from_code(code).ok_or_else(|| TransferError::InputFormatError {
                filename: BASE_TRANSFERS_FILENAME.to_string(),
                message: format!(
                    "unknown transfer_type code {code} for transfer from '{}' to '{}'",
                    record.from_stop_id, record.to_stop_id
                ),
            })?
        }
    };
    let min_transfer_time_sec = match &record.min_transfer_time {
        None => 0.0,
        Some(text) if text.trim().is_empty() => 0.0,
        Some(text) => {
            text.trim()
                .parse::<f64>()
                .map_err(|e| TransferError::InputFormatError {
                    filename: BASE_TRANSFERS_FILENAME.to_string(),
                    message: format!(
                        "min_transfer_time '{text}' for transfer from '{}' to '{}' is not numeric: {e}",
                        record.from_stop_id, record.to_stop_id
                    ),
                })?
        }
    };
    let min_transfer_time_sec = match transfer_type {
        TransferType::MinimumTime => min_transfer_time_sec,
        _ => 0.0,
    };
    Ok((transfer_type, min_transfer_time_sec))
}

/// policy values for a supplemental row with no base feed counterpart
fn supplemental_policy(
    row: &SupplementalRow,
    filename: &str,
) -> Result<(TransferType, f64), TransferError> {
    let transfer_type = match row.transfer_type {
        None => TransferType::default(),
        Some(code) => {
            TransferType::from_code(code).ok_or_else(|| TransferError::InputFormatError {
                filename: filename.to_string(),
                message: format!(
                    "unknown transfer_type code {code} for transfer from '{}' to '{}'",
                    row.from_stop_id, row.to_stop_id
                ),
            })?
        }
    };
    Ok((transfer_type, row.min_transfer_time.unwrap_or(0.0)))
}
