use thiserror::Error;

/// Errors that can arise while interacting with the warp registry.
#[derive(Debug, Error)]
pub enum WarpsError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when a flow requires a record that is not present.
    #[error("warp not found: {0}")]
    NotFound(String),

    /// Returned when deserializing a record with an unexpected schema version.
    #[error("schema mismatch for warp {id}: expected {expected}, got {found}")]
    SchemaMismatch {
        id: uuid::Uuid,
        expected: u8,
        found: u8,
    },

    /// A player already owns a warp with this name.
    #[error("{owner_name} already owns a warp named '{name}'")]
    DuplicateName { owner_name: String, name: String },

    /// No price is configured for this ownership ordinal.
    #[error("warp number {ordinal} is not purchasable")]
    NotPurchasable { ordinal: u32 },

    /// The requested warp name failed validation.
    #[error("invalid warp name: {0}")]
    NameInvalid(#[from] crate::validation::WarpNameError),
}
