#[derive(thiserror::Error, Debug)]
pub enum TransferError {
    #[error("'{filename}' is missing required column '{column}'")]
    MissingColumnError { filename: String, column: String },
    #[error("failed reading '{filename}': {error}")]
    ReadError { filename: String, error: String },
    #[error("invalid input in '{filename}': {message}")]
    InputFormatError { filename: String, message: String },
    #[error("failed writing '{filename}': {error}")]
    WriteError { filename: String, error: String },
}
