use serde::Serialize;

/// Health check payload served at `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform response envelope: `{success, data, error}`.
///
/// Success responses carry `data`; failures carry `error` with `data: null`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiResponse;

    #[test]
    fn envelope_shapes() {
        let ok = ApiResponse::ok(42u32);
        assert!(ok.success);
        assert_eq!(ok.data, Some(42));
        assert!(ok.error.is_none());

        let err: ApiResponse<u32> = ApiResponse::err("boom");
        assert!(!err.success);
        assert!(err.data.is_none());
        assert_eq!(err.error.as_deref(), Some("boom"));
    }
}
