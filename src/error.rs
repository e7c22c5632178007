use thiserror::Error;

/// Failures raised by the relational store (PostgREST).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("request could not be sent: {0}")]
    Network(String),

    #[error("store rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("could not decode store response: {0}")]
    Decode(String),

    #[error("store returned no rows for an insert")]
    EmptyReturn,
}

/// Failures raised by the auth provider (GoTrue).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("invalid login credentials")]
    InvalidCredentials,

    #[error("email not confirmed")]
    EmailNotConfirmed,

    #[error("email already registered")]
    AlreadyRegistered,

    #[error("email address rejected by the server")]
    InvalidEmail,

    #[error("no active session")]
    NotSignedIn,

    #[error("request could not be sent: {0}")]
    Network(String),

    #[error("{0}")]
    Provider(String),
}

impl AuthError {
    /// Spanish copy shown in the auth forms.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => {
                "Credenciales inválidas. Verifique su correo y contraseña.".to_string()
            }
            AuthError::EmailNotConfirmed => {
                "Correo electrónico no confirmado. Por favor, verifique su bandeja de entrada."
                    .to_string()
            }
            AuthError::AlreadyRegistered => "Este correo electrónico ya está registrado".to_string(),
            AuthError::InvalidEmail => {
                "El formato del correo electrónico no es válido o no está permitido por el servidor"
                    .to_string()
            }
            AuthError::NotSignedIn => "Usuario no autenticado".to_string(),
            AuthError::Network(_) => {
                "No se pudo conectar con el servidor. Intente nuevamente.".to_string()
            }
            AuthError::Provider(message) => message.clone(),
        }
    }
}

/// Errors surfaced by the data access layer to the UI.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("no authenticated user")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("renter {0} not found")]
    RenterNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    /// Spanish copy shown when an operation fails and the caller has no
    /// more specific message of its own.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthenticated => "Usuario no autenticado".to_string(),
            ApiError::Validation(message) => message.clone(),
            ApiError::RenterNotFound(_) => {
                "No se pudo cargar la información del arrendatario".to_string()
            }
            ApiError::Auth(err) => err.user_message(),
            ApiError::Store(_) => {
                "No se pudo completar la operación. Intente nuevamente.".to_string()
            }
        }
    }
}
