mod base_transfer;
mod export_ops;
mod stop_id_resolver;
mod supplemental_row;
mod transfer_catalog;
mod transfer_config;
mod transfer_error;
mod transfer_link;
mod transfer_type;

pub use base_transfer::BaseTransfer;
pub use stop_id_resolver::StopIdResolver;
pub use supplemental_row::SupplementalRow;
pub use transfer_catalog::TransferCatalog;
pub use transfer_config::TransferConfig;
pub use transfer_error::TransferError;
pub use transfer_link::TransferLink;
pub use transfer_type::TransferType;
