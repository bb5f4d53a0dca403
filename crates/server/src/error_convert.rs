use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Convert an AppError into a ServerFnError by serializing as JSON, so the
/// client can recover it with `AppError::from_server_error`.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{AppErrorKind, CustomerInput};

    #[test]
    fn server_fn_error_round_trips_to_app_error() {
        let err = AppError::forbidden("Tailor accounts cannot access this resource");
        let wrapped = err.clone().into_server_fn_error().to_string();
        assert_eq!(AppError::from_server_error(&wrapped), Some(err));
    }

    #[test]
    fn invalid_input_reports_fields() {
        let input = CustomerInput {
            name: String::new(),
            phone: "12".to_string(),
            ..Default::default()
        };
        let err = input.validate_request().unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert!(err.field_errors.contains_key("name"));
        assert!(err.field_errors.contains_key("phone"));
    }
}
