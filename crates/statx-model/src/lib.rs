pub mod artifact;
pub mod error;
pub mod request;
pub mod response;

pub use artifact::ExportArtifact;
pub use error::{ExportError, FaultCategory, ResourceKind, Result};
pub use request::{ExportOption, ExportRequest};
pub use response::{EXPORT_SUCCESS_MESSAGE, ErrorResponse, ExportResponse};
