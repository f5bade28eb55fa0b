//! Claim DTOs

use serde::{Deserialize, Serialize};

use domain_items::{ClaimDetails, Item};

/// Body of `POST /api/items/:id/claim`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitClaimRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub proof_details: String,
}

impl From<SubmitClaimRequest> for ClaimDetails {
    fn from(req: SubmitClaimRequest) -> Self {
        ClaimDetails {
            description: req.description,
            contact_info: req.contact_info,
            proof_details: req.proof_details,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancelClaimResponse {
    pub message: String,
    pub item: Item,
}

/// Body of `POST /api/admin/claims/:id/:action`
///
/// Only approvals read the pickup location; the body may be omitted for
/// rejections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewClaimRequest {
    pub pickup_location: Option<String>,
}
