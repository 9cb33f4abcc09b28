/// Errors that can occur while reading local mod data.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("Invalid mods config: {0}")]
    InvalidConfig(String),

    #[error("Workshop directory error: {0}")]
    Workshop(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl CheckError {
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn workshop(msg: impl Into<String>) -> Self {
        Self::Workshop(msg.into())
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}
