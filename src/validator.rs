use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use realty_core::AppError;

fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in entries {
        match kind {
            ValidationErrorsKind::Field(errors) => {
                out.extend(errors.iter().map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field))
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, out),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_messages(nested, out);
                }
            }
        }
    }
}

/// Flattens nested validation errors into a single comma separated message.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages.dedup();
    messages.join(", ")
}

/// Runs `validate` and maps failures to a 400.
pub fn validate_dto<T: Validate>(dto: &T) -> Result<(), AppError> {
    dto.validate()
        .map_err(|errors| AppError::bad_request(anyhow!("{}", format_errors(&errors))))
}

/// Turns a serde error description into a client-facing message.
pub(crate) fn describe_body_error(text: &str) -> String {
    if let Some(field) = text
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return format!("{} is required", field);
    }

    if text.contains("invalid type") {
        return "Invalid field type in request".to_string();
    }

    let detail = text
        .strip_prefix("Failed to deserialize the JSON body into the target type: ")
        .unwrap_or(text);
    let detail = detail
        .rsplit_once(" at line ")
        .map(|(head, _)| head)
        .unwrap_or(detail);

    detail.to_string()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
                    "Missing 'Content-Type: application/json' header"
                )),
                JsonRejection::JsonDataError(err) => {
                    AppError::bad_request(anyhow!(describe_body_error(&err.body_text())))
                }
                _ => AppError::bad_request(anyhow!("Invalid request body")),
            })?;

        validate_dto(&value)?;

        Ok(ValidatedJson(value))
    }
}
