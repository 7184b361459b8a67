use std::default::Default;

/// Contains Config properties which will be used by the Server
#[derive(Clone)]
pub struct ServerConfig {
    /// Logs every mirrored command at info level as it leaves the outbox.
    pub log_commands: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_commands: false,
        }
    }
}
