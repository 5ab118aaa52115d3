use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

use super::AxisAppearance;

pub const AXIS_APPEARANCE_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisAppearanceJsonContractV1 {
    pub schema_version: u32,
    pub appearance: AxisAppearance,
}

impl AxisAppearance {
    pub fn to_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AxisError::InvalidConfig(format!("failed to serialize axis appearance: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> AxisResult<String> {
        let payload = AxisAppearanceJsonContractV1 {
            schema_version: AXIS_APPEARANCE_JSON_SCHEMA_V1,
            appearance: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            AxisError::InvalidConfig(format!(
                "failed to serialize axis appearance contract v1: {e}"
            ))
        })
    }

    /// Accepts a bare appearance object or a versioned contract payload.
    /// Missing appearance fields take their defaults; the result is validated.
    pub fn from_json_compat_str(input: &str) -> AxisResult<Self> {
        let raw: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            AxisError::InvalidConfig(format!("failed to parse axis appearance json: {e}"))
        })?;

        let appearance = if raw.get("schema_version").is_some() {
            let payload: AxisAppearanceJsonContractV1 =
                serde_json::from_value(raw).map_err(|e| {
                    AxisError::InvalidConfig(format!(
                        "failed to parse axis appearance contract: {e}"
                    ))
                })?;
            if payload.schema_version != AXIS_APPEARANCE_JSON_SCHEMA_V1 {
                return Err(AxisError::InvalidConfig(format!(
                    "unsupported axis appearance schema version: {}",
                    payload.schema_version
                )));
            }
            payload.appearance
        } else {
            serde_json::from_value(raw).map_err(|e| {
                AxisError::InvalidConfig(format!("failed to parse axis appearance: {e}"))
            })?
        };

        appearance.validate()?;
        Ok(appearance)
    }
}
