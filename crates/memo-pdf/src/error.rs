use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoPdfError {
    #[error("Failed to assemble PDF: {0}")]
    Assembly(String),

    #[error("Failed to decode signature image: {0}")]
    SignatureDecode(String),
}
