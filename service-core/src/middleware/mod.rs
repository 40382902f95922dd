pub mod function_key;
pub mod metrics;
pub mod security_headers;
pub mod tracing;

pub use self::function_key::{FUNCTION_KEY_HEADER, FunctionKeyConfig, function_key_middleware};
pub use self::metrics::metrics_middleware;
pub use self::security_headers::security_headers_middleware;
pub use self::tracing::{REQUEST_ID_HEADER, request_id_middleware};
