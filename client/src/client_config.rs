use std::default::Default;

/// Contains Config properties which will be used by the Client
#[derive(Clone)]
pub struct ClientConfig {
    /// Logs every incoming command at info level before it is applied.
    pub log_commands: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_commands: false,
        }
    }
}
