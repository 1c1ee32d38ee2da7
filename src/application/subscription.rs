//! Subscription submissions, proxied to the content API.

use std::sync::Arc;

use metrics::counter;
use tracing::warn;

use crate::application::repos::ContentRepo;
use crate::presentation::views::{SubscribeStatus, SubscribeView};

/// Status code the content API uses, in the reply body, to signal a stored
/// subscription.
const SUBSCRIBE_OK: u16 = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubscribeOutcome {
    /// The address was accepted upstream.
    Subscribed,
    /// The input was blank after trimming; no request was issued.
    Rejected,
    /// The API answered, but with a non-success status code in the body.
    Refused { status: u16 },
    /// The request never completed (transport failure or undecodable reply).
    Failed,
}

impl SubscribeOutcome {
    /// Fold the outcome back into the form state: success clears the input
    /// and flips the label to "Subscribed"; everything else keeps the input,
    /// reverts the label, and surfaces an alert line.
    pub fn into_view(self, article_title: &str, email: &str) -> SubscribeView {
        match self {
            SubscribeOutcome::Subscribed => SubscribeView {
                status: SubscribeStatus::Success,
                alert: None,
                email: String::new(),
                article_title: article_title.to_string(),
            },
            SubscribeOutcome::Rejected => SubscribeView {
                status: SubscribeStatus::Idle,
                alert: Some("Please enter a valid email address".to_string()),
                email: email.to_string(),
                article_title: article_title.to_string(),
            },
            SubscribeOutcome::Refused { .. } => SubscribeView {
                status: SubscribeStatus::Idle,
                alert: Some("Subscription failed due to network issue! Try again!".to_string()),
                email: email.to_string(),
                article_title: article_title.to_string(),
            },
            SubscribeOutcome::Failed => SubscribeView {
                status: SubscribeStatus::Idle,
                alert: Some("Subscription failed! Please try again.".to_string()),
                email: email.to_string(),
                article_title: article_title.to_string(),
            },
        }
    }
}

#[derive(Clone)]
pub struct SubscriptionService {
    content: Arc<dyn ContentRepo>,
}

impl SubscriptionService {
    pub fn new(content: Arc<dyn ContentRepo>) -> Self {
        Self { content }
    }

    /// Submit one subscription. Blank input short-circuits before any
    /// upstream request; only an explicit body status of 200 counts as
    /// success. No retry.
    pub async fn subscribe(&self, email: &str) -> SubscribeOutcome {
        if email.trim().is_empty() {
            return SubscribeOutcome::Rejected;
        }

        match self.content.add_subscriber(email).await {
            Ok(SUBSCRIBE_OK) => {
                counter!("briefin_subscribe_success_total").increment(1);
                SubscribeOutcome::Subscribed
            }
            Ok(status) => {
                counter!("briefin_subscribe_failure_total").increment(1);
                warn!(
                    target = "briefin::subscription",
                    status = status,
                    "content API refused subscription"
                );
                SubscribeOutcome::Refused { status }
            }
            Err(err) => {
                counter!("briefin_subscribe_failure_total").increment(1);
                warn!(
                    target = "briefin::subscription",
                    error = %err,
                    "subscription request failed"
                );
                SubscribeOutcome::Failed
            }
        }
    }
}
