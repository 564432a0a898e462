//! Request DTO validation

use validator::Validate;

use crate::utils::AppError;

/// Run the DTO's `validator` rules; failures become `ValidationFailed`
/// with the offending fields listed under `details.fields`.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        AppError::validation(format!("Invalid request: {}", fields.join(", ")))
            .with_detail("fields", fields)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CheckoutRequest, SaleLine};

    #[test]
    fn invalid_payload_lists_fields() {
        let req = CheckoutRequest {
            sale_id: None,
            customer_name: String::new(),
            customer_email: Some("not-an-email".into()),
            items: vec![SaleLine::new(1, "Black", "9", 1)],
        };
        let err = validate_payload(&req).unwrap_err();

        assert_eq!(err.code, shared::error::ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid request: customer_email, customer_name");
    }

    #[test]
    fn valid_payload_passes() {
        let req = CheckoutRequest {
            sale_id: Some("cart-1".into()),
            customer_name: "Ana".into(),
            customer_email: None,
            items: vec![SaleLine::new(1, "Black", "9", 2)],
        };
        assert!(validate_payload(&req).is_ok());
    }
}
