use std::path::Path;

use copo_model::AttainmentPayload;

use crate::error::{IngestError, Result};

/// Reads a scoring collaborator's JSON response.
pub fn read_attainment_payload(path: &Path) -> Result<AttainmentPayload> {
    let contents = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })
}
