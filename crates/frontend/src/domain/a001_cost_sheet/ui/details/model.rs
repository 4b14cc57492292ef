use contracts::domain::a001_cost_sheet::aggregate::{
    CheckStyleResponse, CostSheetPayload, CostSheetRecord, CostSheetUpdate,
};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// What a failed save means for the caller
#[derive(Debug, Clone)]
pub enum SaveError {
    /// The style is already registered (HTTP 409)
    StyleConflict,
    Other(String),
}

pub async fn fetch_by_id(id: &str) -> Result<CostSheetRecord, String> {
    let url = api_url(&format!("/api/cost-sheets/{}", id));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    response
        .json::<CostSheetRecord>()
        .await
        .map_err(|e| format!("Bad response: {}", e))
}

pub async fn check_style(style: &str) -> Result<CheckStyleResponse, String> {
    let url = api_url(&format!(
        "/api/cost-sheets/check-style?style={}",
        urlencoding::encode(style)
    ));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    response
        .json::<CheckStyleResponse>()
        .await
        .map_err(|e| format!("Bad response: {}", e))
}

pub async fn create(payload: &CostSheetPayload) -> Result<CostSheetRecord, SaveError> {
    let request = Request::post(&api_url("/api/cost-sheets"))
        .json(payload)
        .map_err(|e| SaveError::Other(format!("Request error: {}", e)))?;
    let response = request
        .send()
        .await
        .map_err(|e| SaveError::Other(format!("Network error: {}", e)))?;
    match response.status() {
        409 => Err(SaveError::StyleConflict),
        _ if !response.ok() => Err(SaveError::Other(format!("HTTP {}", response.status()))),
        _ => response
            .json::<CostSheetRecord>()
            .await
            .map_err(|e| SaveError::Other(format!("Bad response: {}", e))),
    }
}

pub async fn update(id: &str, payload: CostSheetPayload) -> Result<CostSheetRecord, SaveError> {
    let body = CostSheetUpdate { data: payload };
    let request = Request::put(&api_url(&format!("/api/cost-sheets/{}", id)))
        .json(&body)
        .map_err(|e| SaveError::Other(format!("Request error: {}", e)))?;
    let response = request
        .send()
        .await
        .map_err(|e| SaveError::Other(format!("Network error: {}", e)))?;
    match response.status() {
        409 => Err(SaveError::StyleConflict),
        _ if !response.ok() => Err(SaveError::Other(format!("HTTP {}", response.status()))),
        _ => response
            .json::<CostSheetRecord>()
            .await
            .map_err(|e| SaveError::Other(format!("Bad response: {}", e))),
    }
}
