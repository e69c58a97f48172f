//! GraphQL adapter mapping for domain errors.
//!
//! Keeps the domain error type transport agnostic: resolvers surface
//! failures as field errors whose extensions carry the stable `code`, so
//! clients can distinguish the taxonomy inside the GraphQL envelope.

use async_graphql::ErrorExtensions;

use crate::domain::DomainError;

/// Convert a domain error into a GraphQL field error.
pub(crate) fn to_field_error(error: DomainError) -> async_graphql::Error {
    async_graphql::Error::new(error.message().to_owned()).extend_with(|_, ext| {
        ext.set("code", error.code().as_str());
        if let Some(details) = error.details() {
            if let Ok(value) = async_graphql::Value::from_json(details.clone()) {
                ext.set("details", value);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_errors_carry_the_stable_code() {
        let err = to_field_error(DomainError::already_exists("taken"));
        let server_error = err.into_server_error(async_graphql::Pos::default());

        let json = serde_json::to_value(&server_error).expect("error serialises");
        assert_eq!(json["extensions"]["code"], "already_exists");
    }

    #[test]
    fn details_are_forwarded_when_present() {
        let err = to_field_error(
            DomainError::invalid_argument("bad").with_details(json!({ "field": "name" })),
        );
        let server_error = err.into_server_error(async_graphql::Pos::default());

        let json = serde_json::to_value(&server_error).expect("error serialises");
        assert_eq!(json["extensions"]["details"]["field"], "name");
    }
}
