//! Wire-level constants of the WHM JSON API.

/// Path prefix of every upstream call: `{host}/json-api/{function}`.
pub const JSON_API_PATH: &str = "json-api";

/// Prefix of the `Authorization` header value: `whm {user}:{token}`.
pub const WHM_AUTHORIZATION_SCHEME: &str = "whm";

/// WHM function that proxies a UAPI/API2 call on behalf of a cPanel account.
pub const IMPERSONATION_FUNCTION: &str = "cpanel";

/// Query parameter selecting WHM API 1 semantics.
pub const API_VERSION_PARAM: &str = "api.version";

/// WHM API version requested by the gateway dialect.
pub const GATEWAY_API_VERSION: &str = "1";

/// Reserved impersonation key: the cPanel account to act as.
pub const RESERVED_USER_KEY: &str = "cpanel_jsonapi_user";

/// Reserved impersonation key: the UAPI module.
pub const RESERVED_MODULE_KEY: &str = "cpanel_jsonapi_module";

/// Reserved impersonation key: the UAPI function.
pub const RESERVED_FUNCTION_KEY: &str = "cpanel_jsonapi_func";

/// Reserved impersonation key: protocol version discriminator.
pub const RESERVED_API_VERSION_KEY: &str = "cpanel_jsonapi_apiversion";

/// All reserved impersonation keys, in the order they are seeded.
pub const RESERVED_IMPERSONATION_KEYS: [&str; 4] = [
    RESERVED_USER_KEY,
    RESERVED_MODULE_KEY,
    RESERVED_FUNCTION_KEY,
    RESERVED_API_VERSION_KEY,
];

/// Impersonation protocol version used by the library client (API2 semantics).
pub const LIBRARY_IMPERSONATION_VERSION: &str = "2";

/// Impersonation protocol version used by the HTTP gateway (UAPI).
pub const GATEWAY_IMPERSONATION_VERSION: &str = "3";

/// Canonical environment variable names for the credential context.
pub const ENV_WHM_HOST: &str = "WHM_HOST";
pub const ENV_WHM_USER: &str = "WHM_USER";
pub const ENV_WHM_API_TOKEN: &str = "WHM_API_TOKEN";

/// Alias environment variable names accepted when the canonical ones are unset.
pub const ENV_CPANEL_HOST: &str = "CPANEL_HOST";
pub const ENV_CPANEL_USER: &str = "CPANEL_USER";
pub const ENV_CPANEL_API_TOKEN: &str = "CPANEL_API_TOKEN";
