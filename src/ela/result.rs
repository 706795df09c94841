//! Result types for the ELA pipeline.

use serde::{Deserialize, Serialize};

use crate::core::errors::ForensicsError;
use crate::processors::geometry::Region;

use super::statistics::ElaStatistics;

/// Complete ELA analysis of one image pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElaAnalysis {
    /// JPEG-encoded residual, the primary output a caller forwards as the
    /// visualization payload. Not serialized; transports carry it as raw
    /// bytes alongside the JSON side channel.
    #[serde(skip)]
    pub residual_jpeg: Vec<u8>,
    /// Amplification applied to the raw difference (1.0 for identical
    /// inputs).
    #[serde(skip)]
    pub scale: f32,
    /// Distributional statistics of the decoded residual.
    pub statistics: ElaStatistics,
    /// Suspected tampering regions, in label order.
    pub tampering_regions: Vec<Region>,
}

/// Wire-shaped side-channel envelope for the ELA pipeline.
///
/// Successes carry statistics and regions with `success: true`; failures
/// carry the error message with `success: false`. Either way the caller
/// receives a well-formed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElaResponse {
    /// Residual statistics, absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ElaStatistics>,
    /// Suspected tampering regions, empty on failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tampering_regions: Vec<Region>,
    /// Human-readable failure message, absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the analysis produced a usable result.
    pub success: bool,
}

impl ElaResponse {
    /// Builds the envelope from a pipeline outcome.
    pub fn from_result(result: Result<ElaAnalysis, ForensicsError>) -> Self {
        match result {
            Ok(analysis) => Self {
                statistics: Some(analysis.statistics),
                tampering_regions: analysis.tampering_regions,
                error: None,
                success: true,
            },
            Err(error) => Self {
                statistics: None,
                tampering_regions: Vec::new(),
                error: Some(error.to_string()),
                success: false,
            },
        }
    }
}

impl From<Result<ElaAnalysis, ForensicsError>> for ElaResponse {
    fn from(result: Result<ElaAnalysis, ForensicsError>) -> Self {
        Self::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_envelope_shape() {
        let response = ElaResponse::from_result(Err(ForensicsError::invalid_input(
            "candidate image missing",
        )));
        let json = serde_json::to_value(&response).expect("serialize");

        assert_eq!(json["success"], false);
        assert!(json.get("statistics").is_none());
        assert!(json.get("tampering_regions").is_none());
        assert!(
            json["error"]
                .as_str()
                .expect("error message")
                .contains("candidate image missing")
        );
    }

    #[test]
    fn test_success_envelope_omits_residual_bytes() {
        let analysis = ElaAnalysis {
            residual_jpeg: vec![0xFF, 0xD8],
            scale: 2.5,
            statistics: ElaStatistics::from_samples(&[0, 0, 10, 10]),
            tampering_regions: vec![Region::with_intensity(5, 5, 40, 40, 1200, 180.0)],
        };
        let json = serde_json::to_value(ElaResponse::from_result(Ok(analysis))).expect("serialize");

        assert_eq!(json["success"], true);
        assert_eq!(json["statistics"]["mean"], 5.0);
        assert_eq!(json["tampering_regions"][0]["area"], 1200);
        assert!(json.get("residual_jpeg").is_none());
    }
}
