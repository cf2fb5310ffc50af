use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnubisError {
    /// Represents a jector configured with an LSB depth outside of `1..=8`
    #[error("Invalid configuration: LSB depth {lsb_depth} is out of range, expected 1..=8")]
    InvalidConfiguration { lsb_depth: u8 },

    /// Represents a message (payload plus EOF marker) that does not fit into the carrier
    #[error(
        "Capacity Error: the message needs {required} bits but the carrier can hold only {available} bits"
    )]
    InsufficientCapacity { required: u64, available: u64 },

    /// Represents an eject where the required EOF marker was not found in the recovered data
    #[error("The end of file marker was not found in the recovered data")]
    EofNotFound,

    /// Represents a WAV container with missing, truncated or inconsistent header fields
    #[error("Corrupt WAV container: {0}")]
    CorruptContainer(&'static str),

    /// Represents a container that is not a RIFF/WAVE file, or has an unexpected chunk layout
    #[error("Unrecognized container, unexpected chunk tag {0:?}")]
    UnrecognizedContainer(String),

    /// Represents a transfer that was stopped by its cancellation token
    #[error("The operation was cancelled")]
    Cancelled,

    /// Represents an unsupported carrier media. For example, a Movie file is not supported
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: No jector type set, name the carrier type or use a known file extension")]
    MissingJectorType,

    #[error("API Error: Missing payload, provide a message or a data file")]
    MissingPayload,
}
