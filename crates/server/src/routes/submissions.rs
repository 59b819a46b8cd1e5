use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap},
    Json,
};
use models::{Submission, SubmissionInput};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use service::position::{parse_position, position_from_value};

use crate::errors::{ApiError, Operation};
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct SubmissionMessage {
    pub message: &'static str,
    pub submission: Submission,
}

#[derive(Debug, Serialize)]
pub struct SubmissionOutput {
    pub submission: Submission,
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub submissions: Vec<Submission>,
    pub count: usize,
}

/// Raw query pairs in request order; repeated keys are kept.
type QueryPairs = Vec<(String, String)>;

#[derive(Debug, Deserialize)]
pub struct DeleteInput {
    #[serde(default)]
    pub index: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct EditInput {
    #[serde(default)]
    pub index: Option<Value>,
    #[serde(flatten)]
    pub fields: SubmissionInput,
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Decode a JSON request body. A body that is empty or not declared as JSON decodes as
/// `{}`, so absent fields surface as validation or bounds errors rather than decoding errors.
fn decode_body<T: DeserializeOwned>(headers: &HeaderMap, body: &Bytes) -> Result<T, ApiError> {
    let raw: &[u8] = if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        &body[..]
    };
    serde_json::from_slice(raw).map_err(ApiError::invalid_body)
}

/// Query pairs, or none if the query string could not be decoded.
fn query_pairs(query: Result<Query<QueryPairs>, QueryRejection>) -> QueryPairs {
    match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "ignoring undecodable query string");
            Vec::new()
        }
    }
}

/// Liveness check.
pub async fn ping() -> Json<bool> {
    Json(true)
}

pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmissionMessage>, ApiError> {
    let input: SubmissionInput = decode_body(&headers, &body)?;
    let submission = state
        .submissions
        .submit(input)
        .await
        .map_err(|e| ApiError::from_service(Operation::Submit, e))?;
    Ok(Json(SubmissionMessage { message: "Submission successful", submission }))
}

pub async fn read(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<SubmissionOutput>, ApiError> {
    // a repeated `index` addresses its first occurrence
    let position = query_pairs(query)
        .into_iter()
        .find(|(k, _)| k == "index")
        .and_then(|(_, v)| parse_position(&v));
    let submission = state
        .submissions
        .read(position)
        .await
        .map_err(|e| ApiError::from_service(Operation::Read, e))?;
    Ok(Json(SubmissionOutput { submission }))
}

pub async fn delete_submission(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmissionMessage>, ApiError> {
    let input: DeleteInput = decode_body(&headers, &body)?;
    let position = position_from_value(input.index.as_ref());
    let submission = state
        .submissions
        .delete(position)
        .await
        .map_err(|e| ApiError::from_service(Operation::Delete, e))?;
    Ok(Json(SubmissionMessage { message: "Submission deleted", submission }))
}

pub async fn edit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<SubmissionMessage>, ApiError> {
    let input: EditInput = decode_body(&headers, &body)?;
    let position = position_from_value(input.index.as_ref());
    let submission = state
        .submissions
        .edit(position, input.fields)
        .await
        .map_err(|e| ApiError::from_service(Operation::Edit, e))?;
    Ok(Json(SubmissionMessage { message: "Submission updated", submission }))
}

pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<SearchOutput>, ApiError> {
    let emails: Vec<String> = query_pairs(query)
        .into_iter()
        .filter(|(k, _)| k == "email")
        .map(|(_, v)| v)
        .collect();
    // a repeated `email` is a list, which never equals a stored address
    let email = match emails.as_slice() {
        [single] => Some(single.as_str()),
        _ => None,
    };
    let submissions = state
        .submissions
        .search_by_email(email)
        .await
        .map_err(|e| ApiError::from_service(Operation::Search, e))?;
    let count = submissions.len();
    Ok(Json(SearchOutput { submissions, count }))
}
