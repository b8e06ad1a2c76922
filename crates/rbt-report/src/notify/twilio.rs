use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::trace;

use crate::error::ReportError;
use crate::notify::NotificationSink;

pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Chat delivery settings (Twilio messaging, e.g. WhatsApp senders).
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub api_base: String,
    pub account_sid: String,
    pub auth_token: String,
    /// Sender address, e.g. `whatsapp:+14155238886`.
    pub from: String,
    pub recipients: Vec<String>,
    pub timeout_ms: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            account_sid: String::new(),
            auth_token: String::new(),
            from: String::new(),
            recipients: Vec::new(),
            timeout_ms: 15_000,
        }
    }
}

impl NotifyConfig {
    /// Name of the first required field that is empty, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.account_sid.trim().is_empty() {
            Some("account_sid")
        } else if self.auth_token.trim().is_empty() {
            Some("auth_token")
        } else if self.from.trim().is_empty() {
            Some("from")
        } else if self.recipients.is_empty() {
            Some("recipients")
        } else {
            None
        }
    }
}

impl fmt::Debug for NotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotifyConfig")
            .field("api_base", &self.api_base)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from", &self.from)
            .field("recipients", &self.recipients)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct MessageCreated {
    sid: String,
}

pub struct TwilioSink {
    http: reqwest::Client,
    url: String,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl TwilioSink {
    pub fn new(cfg: &NotifyConfig) -> Result<Self, ReportError> {
        if let Some(field) = cfg.missing_field().filter(|f| *f != "recipients") {
            return Err(ReportError::NotConfigured(field));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()?;
        Ok(Self {
            http,
            url: format!(
                "{}/2010-04-01/Accounts/{}/Messages.json",
                cfg.api_base.trim_end_matches('/'),
                cfg.account_sid
            ),
            account_sid: cfg.account_sid.clone(),
            auth_token: cfg.auth_token.clone(),
            from: cfg.from.clone(),
        })
    }
}

#[async_trait]
impl NotificationSink for TwilioSink {
    async fn deliver(&self, recipient: &str, message: &str) -> Result<String, ReportError> {
        let response = self
            .http
            .post(&self.url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("From", self.from.as_str()), ("To", recipient), ("Body", message)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ReportError::NotificationDeliveryFailed {
                recipient: recipient.to_string(),
                reason: format!("{status}: {body}"),
            });
        }

        let created: MessageCreated =
            serde_json::from_str(&body).map_err(|e| ReportError::NotificationDeliveryFailed {
                recipient: recipient.to_string(),
                reason: format!("unreadable provider reply: {e}"),
            })?;
        trace!(recipient, sid = %created.sid, "message accepted by provider");
        Ok(created.sid)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Form, Path, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    use super::*;

    type Seen = Arc<Mutex<Vec<(String, Option<String>, HashMap<String, String>)>>>;

    async fn create(
        State(seen): State<Seen>,
        Path(sid): Path<String>,
        headers: HeaderMap,
        Form(form): Form<HashMap<String, String>>,
    ) -> Response {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let to = form.get("To").cloned().unwrap_or_default();
        seen.lock().unwrap().push((sid, auth, form));
        if to.ends_with("000") {
            return (StatusCode::BAD_REQUEST, r#"{"code":21211,"message":"invalid To"}"#).into_response();
        }
        (StatusCode::CREATED, Json(json!({"sid": "SM123", "status": "queued"}))).into_response()
    }

    async fn spawn(seen: Seen) -> String {
        let router = Router::new()
            .route("/2010-04-01/Accounts/{sid}/Messages.json", post(create))
            .with_state(seen);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn config(api_base: String) -> NotifyConfig {
        NotifyConfig {
            api_base,
            account_sid: "AC42".into(),
            auth_token: "tok".into(),
            from: "whatsapp:+14155238886".into(),
            recipients: vec!["whatsapp:+15550001111".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn posts_form_with_basic_auth() {
        let seen = Seen::default();
        let sink = TwilioSink::new(&config(spawn(seen.clone()).await)).unwrap();

        let sid = sink.deliver("whatsapp:+15550001111", "batch1 🕒").await.unwrap();

        assert_eq!(sid, "SM123");
        let seen = seen.lock().unwrap();
        let (account, auth, form) = &seen[0];
        assert_eq!(account, "AC42");
        // base64("AC42:tok")
        assert_eq!(auth.as_deref(), Some("Basic QUM0Mjp0b2s="));
        assert_eq!(form["From"], "whatsapp:+14155238886");
        assert_eq!(form["To"], "whatsapp:+15550001111");
        assert_eq!(form["Body"], "batch1 🕒");
    }

    #[tokio::test]
    async fn provider_rejection_is_delivery_failure() {
        let sink = TwilioSink::new(&config(spawn(Seen::default()).await)).unwrap();

        let err = sink.deliver("whatsapp:+15550000000", "hi").await.unwrap_err();

        assert!(matches!(
            err,
            ReportError::NotificationDeliveryFailed { ref recipient, .. } if recipient == "whatsapp:+15550000000"
        ));
    }

    #[test]
    fn incomplete_config_is_rejected() {
        let cfg = NotifyConfig {
            auth_token: String::new(),
            ..config("http://localhost".into())
        };
        assert_eq!(cfg.missing_field(), Some("auth_token"));
        assert!(matches!(
            TwilioSink::new(&cfg),
            Err(ReportError::NotConfigured("auth_token"))
        ));
    }

    #[test]
    fn debug_redacts_token() {
        let out = format!("{:?}", config("http://localhost".into()));
        assert!(!out.contains("tok\""));
        assert!(out.contains("<redacted>"));
    }
}
