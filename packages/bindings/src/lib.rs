use napi::Result as NapiResult;
use napi_derive::napi;

use credit_analysis_core::{cash_flow, debt, dscr};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// DSCR
// ---------------------------------------------------------------------------

#[napi]
pub fn global_dscr(input_json: String) -> NapiResult<String> {
    let input: dscr::GlobalDscrInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = dscr::calculate_global_dscr(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn pro_forma_dscr(input_json: String) -> NapiResult<String> {
    let input: dscr::ProFormaInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = dscr::calculate_pro_forma_dscr(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn entity_dscr(input_json: String) -> NapiResult<String> {
    let input: dscr::EntityDscrInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = dscr::calculate_entity_dscr(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Debt
// ---------------------------------------------------------------------------

#[napi]
pub fn debt_service(input_json: String) -> NapiResult<String> {
    let input: debt::DebtServiceInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = debt::calculate_debt_service(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn loan_payment(input_json: String) -> NapiResult<String> {
    let input: debt::ProposedLoan = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = debt::calculate_loan_payment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Adjustments
// ---------------------------------------------------------------------------

#[napi]
pub fn adjustment_summary(input_json: String) -> NapiResult<String> {
    let input: Vec<cash_flow::Adjustment> =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = cash_flow::calculate_adjustment_summary(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
