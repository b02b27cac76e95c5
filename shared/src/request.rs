use thiserror::Error;

/// Client-side failure of an API call: the request never completed, or the
/// body could not be read as the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Lifecycle of a single request as seen by a view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState<T> {
    #[default]
    Pending,
    Success(T),
    Failure(ClientError),
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            RequestState::Failure(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Result<T, ClientError>> for RequestState<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => RequestState::Success(data),
            Err(err) => RequestState::Failure(err),
        }
    }
}
