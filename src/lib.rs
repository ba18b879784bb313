//! Restores recovered file fragments by inspecting their content.
//!
//! [`detect_file`] infers a format from binary signatures,
//! [`document_timestamp`] recovers a last-saved time from document metadata
//! and [`recovery`] renames a whole folder of fragments with both.

pub mod detection;
mod error;
pub mod io;
pub mod metadata;
pub mod recovery;
pub mod types;

pub use detection::{detect_bytes, detect_file};
pub use error::{CoreError, Result};
pub use metadata::{document_timestamp, document_timestamp_bytes};
pub use recovery::{recover_directory, RecoveryError, RecoveryOptions, RecoveryReport};
pub use types::{DocumentTimestamp, FileType};
