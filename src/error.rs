use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfAuditError {
    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("No hay URL del servicio de detección. Configúrela con `shelf-audit config --set-endpoint URL` o con SHELF_AUDIT_ENDPOINT")]
    MissingEndpoint,

    #[error("Archivo no encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato de imagen no soportado: {0}")]
    UnsupportedImage(String),

    #[error("Error al leer la imagen: {0}")]
    ImageLoad(String),

    #[error("Error al subir la imagen: {0}")]
    Upload(String),

    #[error("Respuesta de detección inválida: {0}")]
    ApiParse(String),

    #[error("Error de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Argumento inválido: {0}")]
    InvalidArgument(String),

    #[error("Error de entrada: {0}")]
    Prompt(String),

    #[error(transparent)]
    Common(#[from] shelf_audit_common::Error),
}

pub type Result<T> = std::result::Result<T, ShelfAuditError>;
