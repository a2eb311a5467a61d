// src/clipboard.rs
use crate::config::ServerAddress;

/// Result of the copy-address action, shown to the visitor as an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

impl CopyOutcome {
    pub fn alert_message(&self, address: &ServerAddress) -> String {
        match self {
            Self::Copied => format!("Server IP copied: {}", address),
            Self::Failed => "Could not copy IP".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> ServerAddress {
        ServerAddress::parse("play.toxicraft.fun:25569").unwrap()
    }

    #[test]
    fn copied_message_names_the_address() {
        assert_eq!(
            CopyOutcome::Copied.alert_message(&address()),
            "Server IP copied: play.toxicraft.fun:25569"
        );
    }

    #[test]
    fn failure_message_is_static() {
        assert_eq!(CopyOutcome::Failed.alert_message(&address()), "Could not copy IP");
    }
}
