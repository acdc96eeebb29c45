use std::time::Duration;

pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/**
 * Per-client settings. Loading them from files or the environment is left to
 * the caller.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Bound on one whole round trip, write and read included. `None` waits forever.
    pub response_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { response_timeout: Some(DEFAULT_RESPONSE_TIMEOUT) }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.response_timeout = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_bounded() {
        assert_eq!(Some(Duration::from_secs(5)), ClientConfig::default().response_timeout);
    }

    #[test]
    fn builder_overrides_timeout() {
        let config = ClientConfig::new().response_timeout(Duration::from_millis(250));
        assert_eq!(Some(Duration::from_millis(250)), config.response_timeout);
        assert_eq!(None, config.without_timeout().response_timeout);
    }
}
