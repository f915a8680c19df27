use serde::{Deserialize, Serialize};

use crate::error::{DiaryError, DiaryResult};
use crate::render::Renderer;

use super::{DiaryEngine, DiarySnapshot};

pub const DIARY_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiarySnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: DiarySnapshot,
}

impl DiarySnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> DiaryResult<String> {
        let payload = DiarySnapshotJsonContractV1 {
            schema_version: DIARY_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DiaryError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> DiaryResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<DiarySnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: DiarySnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            DiaryError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != DIARY_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(DiaryError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> DiaryEngine<R> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> DiaryResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }

    pub fn restore_from_json(&mut self, input: &str) -> DiaryResult<()> {
        let snapshot = DiarySnapshot::from_json_compat_str(input)?;
        self.restore(&snapshot)
    }
}
