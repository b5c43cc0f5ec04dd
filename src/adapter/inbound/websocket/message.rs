//! Inbound client requests.

use serde::Deserialize;

use crate::domain::SubscriptionScope;

/// A request sent by a live client.
///
/// ```json
/// {"action": "subscribe_player", "id": "00-0033873"}
/// {"action": "ping"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientRequest {
    SubscribeLeague { id: String },
    SubscribePlayer { id: String },
    UnsubscribeLeague { id: String },
    UnsubscribePlayer { id: String },
    Ping,
}

/// Subscription change carried by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionChange<'a> {
    Subscribe(SubscriptionScope, &'a str),
    Unsubscribe(SubscriptionScope, &'a str),
}

impl ClientRequest {
    /// The subscription change, or `None` for a ping.
    #[must_use]
    pub fn subscription_change(&self) -> Option<SubscriptionChange<'_>> {
        match self {
            Self::SubscribeLeague { id } => {
                Some(SubscriptionChange::Subscribe(SubscriptionScope::League, id))
            }
            Self::SubscribePlayer { id } => {
                Some(SubscriptionChange::Subscribe(SubscriptionScope::Player, id))
            }
            Self::UnsubscribeLeague { id } => Some(SubscriptionChange::Unsubscribe(
                SubscriptionScope::League,
                id,
            )),
            Self::UnsubscribePlayer { id } => Some(SubscriptionChange::Unsubscribe(
                SubscriptionScope::Player,
                id,
            )),
            Self::Ping => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_subscribe_and_ping() {
        let request: ClientRequest =
            serde_json::from_str(r#"{"action":"subscribe_league","id":"L1"}"#).unwrap();
        assert_eq!(request, ClientRequest::SubscribeLeague { id: "L1".into() });
        assert_eq!(
            request.subscription_change(),
            Some(SubscriptionChange::Subscribe(SubscriptionScope::League, "L1"))
        );

        let ping: ClientRequest = serde_json::from_str(r#"{"action":"ping"}"#).unwrap();
        assert_eq!(ping, ClientRequest::Ping);
        assert_eq!(ping.subscription_change(), None);
    }

    #[test]
    fn rejects_unknown_action_and_missing_id() {
        assert!(serde_json::from_str::<ClientRequest>(r#"{"action":"dance"}"#).is_err());
        assert!(serde_json::from_str::<ClientRequest>(r#"{"action":"subscribe_player"}"#).is_err());
    }
}
