// ABOUTME: Parser for generative-model plan responses with JSON block extraction
// ABOUTME: Two-attempt recovery (direct parse, then extracted block) plus shape validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 VitalPath Health

//! Recovery of typed plan documents from model output.
//!
//! Models are instructed to answer with bare JSON but routinely wrap it in
//! markdown fences or surround it with prose. Parsing makes two attempts:
//! a direct `serde_json` parse of the full text, then a parse of the first
//! JSON object block found inside the text. A response that survives neither
//! attempt, or that parses without the required non-empty plan array, is a
//! [`MalformedAiResponse`] — callers surface it as a server-side failure and
//! never substitute a placeholder plan.
//!
//! Recovery is best-effort on the outer shape only: JSON-shaped output with
//! missing nested fields (a meal without `foods`, a day without `dinner`)
//! deserializes with defaults and flows downstream.

use serde::de::DeserializeOwned;
use thiserror::Error;
use vitalpath_core::models::{MealPlanDocument, WeeklyPlanDocument};

/// Failure to recover a usable plan document from model output.
#[derive(Debug, Error)]
pub enum MalformedAiResponse {
    /// Neither the full text nor any embedded block was a JSON object.
    #[error("no JSON object found in model response")]
    NoJsonObject,
    /// An embedded JSON block was found but did not deserialize to the plan
    /// shape.
    #[error("model response JSON did not match the plan shape: {0}")]
    InvalidShape(String),
    /// The document deserialized but its required plan array is missing or
    /// empty.
    #[error("model response is missing a non-empty '{0}' array")]
    EmptyPlan(&'static str),
}

/// Parse a base-plan response: `{ "meals": [...] }` with at least one meal.
///
/// # Errors
///
/// Returns [`MalformedAiResponse`] when no JSON object can be recovered from
/// the text or when the recovered document has no meals.
pub fn parse_meal_plan(response: &str) -> Result<MealPlanDocument, MalformedAiResponse> {
    let document: MealPlanDocument = parse_document(response)?;
    if document.meals.is_empty() {
        return Err(MalformedAiResponse::EmptyPlan("meals"));
    }
    Ok(document)
}

/// Parse a weekly-plan response: `{ "weeklyPlan": [...] }` with at least one
/// day.
///
/// # Errors
///
/// Returns [`MalformedAiResponse`] when no JSON object can be recovered from
/// the text or when the recovered document has no day plans.
pub fn parse_weekly_plan(response: &str) -> Result<WeeklyPlanDocument, MalformedAiResponse> {
    let document: WeeklyPlanDocument = parse_document(response)?;
    if document.weekly_plan.is_empty() {
        return Err(MalformedAiResponse::EmptyPlan("weeklyPlan"));
    }
    Ok(document)
}

fn parse_document<T: DeserializeOwned>(response: &str) -> Result<T, MalformedAiResponse> {
    match serde_json::from_str(response) {
        Ok(document) => Ok(document),
        Err(direct_error) => {
            tracing::debug!(
                error = %direct_error,
                "direct parse of model response failed, extracting JSON block"
            );
            let block = extract_json_object(response).ok_or(MalformedAiResponse::NoJsonObject)?;
            serde_json::from_str(block)
                .map_err(|error| MalformedAiResponse::InvalidShape(error.to_string()))
        }
    }
}

/// Locate the most plausible JSON object inside free-form model output.
///
/// Checked in order: a ` ```json ` fence, a generic ` ``` ` fence whose body
/// starts with `{`, then the first balanced `{...}` span in the raw text
/// (string-literal and escape aware, so braces inside JSON strings do not
/// unbalance the scan).
#[must_use]
pub fn extract_json_object(response: &str) -> Option<&str> {
    if let Some(start) = response.find("```json") {
        let body = &response[start + 7..];
        if let Some(end) = body.find("```") {
            let candidate = body[..end].trim();
            if !candidate.is_empty() {
                return Some(candidate);
            }
        }
    }

    if let Some(start) = response.find("```") {
        let body = &response[start + 3..];
        if let Some(line_end) = body.find('\n') {
            let body = &body[line_end + 1..];
            if let Some(end) = body.find("```") {
                let candidate = body[..end].trim();
                if candidate.starts_with('{') {
                    return Some(candidate);
                }
            }
        }
    }

    let offset = response.find('{')?;
    balanced_object_span(&response[offset..])
}

fn balanced_object_span(text: &str) -> Option<&str> {
    let mut depth = 0_i32;
    let mut in_string = false;
    let mut escaped = false;

    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..=index]);
                }
            }
            _ => {}
        }
    }
    None
}
