//! Authorization gate run in front of every handler.

use tgdrive_core::{Authorization, AuthorizationPolicy, ReplyTarget, SenderId};
use tgdrive_telegram::ChatTransport;

use crate::messages::UNAUTHORIZED;

/// Decide whether `sender` may use the bot. An empty policy allows everyone.
pub fn authorize(policy: &AuthorizationPolicy, sender: SenderId) -> Authorization {
    policy.check(sender)
}

/// Run the gate and, on denial, tell the sender. Nothing else happens on denial.
pub async fn enforce(
    transport: &dyn ChatTransport,
    policy: &AuthorizationPolicy,
    sender: SenderId,
    reply_to: &ReplyTarget,
) -> Authorization {
    let decision = authorize(policy, sender);
    if decision == Authorization::Denied {
        tracing::warn!(sender_id = sender, "Rejected message from unauthorized sender");
        if let Err(e) = transport.send_message(reply_to, UNAUTHORIZED).await {
            tracing::warn!(error = %e, "Failed to send authorization notice");
        }
    }
    decision
}
