pub type SkrollaResult<T> = Result<T, SkrollaError>;

#[derive(thiserror::Error, Debug)]
pub enum SkrollaError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SkrollaError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SkrollaError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            SkrollaError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            SkrollaError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SkrollaError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
