//! Error handling utilities for MCP server

use paddock_core::ListingError;
use rmcp::ErrorData;

/// Maps a core error to an MCP error, prefixed with what was attempted.
///
/// Caller mistakes become `invalid_params`, missing records
/// `resource_not_found`; everything else is an internal error.
pub fn to_mcp_error(message: &str, error: &ListingError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        ListingError::InvalidInput { .. }
        | ListingError::Incomplete { .. }
        | ListingError::DuplicateProfile { .. } => ErrorData::invalid_params(text, None),
        ListingError::ListingNotFound { .. } | ListingError::ProfileNotFound { .. } => {
            ErrorData::resource_not_found(text, None)
        }
        _ => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_error_codes() {
        let incomplete = ListingError::Incomplete {
            missing: vec!["Horse Name".to_string()],
        };
        let err = to_mcp_error("Failed to publish listing", &incomplete);
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("Horse Name"));

        let missing = to_mcp_error("Failed", &ListingError::ListingNotFound { id: 7 });
        assert_eq!(missing.code, ErrorCode::RESOURCE_NOT_FOUND);

        let storage = to_mcp_error("Failed", &ListingError::storage("disk full"));
        assert_eq!(storage.code, ErrorCode::INTERNAL_ERROR);
    }
}
