use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("sign-in link could not be sent: {0}")]
    LinkDelivery(String),

    #[error("sign-in verification failed: {0}")]
    Verification(String),

    #[error("unrecognized sign-in code or link: {0}")]
    InvalidProof(String),

    #[error("session refresh failed: {0}")]
    RefreshFailed(String),

    #[error("session store error: {0}")]
    SessionStoreError(String),

    #[error("auth API error: {0}")]
    Api(String),

    #[error("{0}")]
    Other(String),
}
