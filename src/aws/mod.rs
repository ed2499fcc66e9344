//! Glue shared by the AWS-backed adapters.
//!
//! Requests are signed and sent by the AWS SDK clients; this module turns
//! adapter settings into SDK credentials and SDK failures into [`AwsError`].

use aws_credential_types::Credentials;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;

/// Name the static credentials are reported under by the SDK.
const CREDENTIALS_PROVIDER: &str = "transcoding-api";

/// Errors raised while talking to an AWS API.
///
/// Converted into [`transcoding_common::Error::Vendor`] with the message left
/// untouched.
#[derive(Debug, thiserror::Error)]
pub enum AwsError {
    /// The service answered with a modeled or unmodeled error.
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// The request failed before the service produced an error document
    /// (construction, dispatch, timeout or an undecodable response).
    #[error("{service} request failed: {message}")]
    Request {
        service: &'static str,
        message: String,
    },

    /// A successful response lacked a field the adapter depends on.
    #[error("{service} response is missing {field}")]
    MissingField {
        service: &'static str,
        field: &'static str,
    },
}

impl AwsError {
    /// Map an SDK failure, keeping the service's code and message verbatim.
    pub fn from_sdk<E, R>(service: &'static str, err: SdkError<E, R>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        if let SdkError::ServiceError(context) = &err {
            let inner = context.err();
            if let Some(code) = inner.code() {
                return Self::Service {
                    code: code.to_string(),
                    message: inner.message().unwrap_or_default().to_string(),
                };
            }
        }
        Self::Request {
            service,
            message: DisplayErrorContext(&err).to_string(),
        }
    }

    pub fn missing(service: &'static str, field: &'static str) -> Self {
        Self::MissingField { service, field }
    }
}

impl From<AwsError> for transcoding_common::Error {
    fn from(err: AwsError) -> Self {
        transcoding_common::Error::vendor(err)
    }
}

/// Static credentials for an SDK client. Empty session tokens are ignored.
pub fn credentials(
    access_key_id: &str,
    secret_access_key: &str,
    session_token: Option<&str>,
) -> Credentials {
    Credentials::new(
        access_key_id,
        secret_access_key,
        session_token
            .filter(|token| !token.is_empty())
            .map(str::to_string),
        None,
        CREDENTIALS_PROVIDER,
    )
}
