/// Tree-wide settings, fixed when the router is created.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Detect `.ext` suffixes on endpoints whose options set no format rule.
    pub detect_format: bool,
    /// Let `HEAD` requests match `GET` routes.
    pub head_as_get: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detect_format: true,
            head_as_get: true,
        }
    }
}
