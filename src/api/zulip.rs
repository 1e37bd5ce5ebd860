//! Blocking Zulip REST client.
//!
//! Every response carries a `result` field (`"success"` or `"error"`) and a
//! human readable `msg`. Failures are reported with the server's message
//! verbatim so authentication and narrow errors are readable on the CLI.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{Channel, ChatApi, Message, MessagePage, MessageQuery};
use crate::config::HttpConfig;
use crate::credentials::Credentials;
use crate::error::{ExportError, ExportResult};

/// Maximum length of a raw body quoted in an error message.
const BODY_PREVIEW_LEN: usize = 200;

#[derive(Deserialize)]
struct ApiStatus {
    result: String,
    #[serde(default)]
    msg: String,
}

#[derive(Deserialize)]
struct StreamsResponse {
    streams: Vec<Channel>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    messages: Vec<Message>,
    found_oldest: bool,
}

#[derive(Deserialize)]
struct UserResponse {
    user: UserRecord,
}

#[derive(Deserialize)]
struct UserRecord {
    full_name: String,
}

/// Zulip server connection authenticated with an API key.
pub struct ZulipClient {
    http: Client,
    credentials: Credentials,
}

impl ZulipClient {
    pub fn new(credentials: Credentials, config: &HttpConfig) -> ExportResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent())
            .build()
            .map_err(|source| ExportError::Remote {
                endpoint: credentials.site.clone(),
                source,
            })?;
        Ok(Self { http, credentials })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/v1/{}", self.credentials.site, endpoint)
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> ExportResult<T> {
        debug!(endpoint, ?query, "GET");
        let remote = |source| ExportError::Remote {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = self
            .http
            .get(self.url(endpoint))
            .basic_auth(&self.credentials.email, Some(&self.credentials.key))
            .query(query)
            .send()
            .map_err(remote)?;
        let status = response.status();
        let body = response.text().map_err(remote)?;

        let api_status: Option<ApiStatus> = serde_json::from_str(&body).ok();
        match api_status {
            Some(s) if status.is_success() && s.result == "success" => {}
            Some(s) => {
                return Err(ExportError::Api {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                    message: if s.msg.is_empty() { s.result } else { s.msg },
                })
            }
            None if !status.is_success() => {
                return Err(ExportError::Api {
                    endpoint: endpoint.to_string(),
                    status: status.as_u16(),
                    message: preview(&body),
                })
            }
            None => {
                return Err(ExportError::Decode {
                    endpoint: endpoint.to_string(),
                    reason: format!("not a Zulip API response: {}", preview(&body)),
                })
            }
        }

        serde_json::from_str(&body).map_err(|e| ExportError::Decode {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

impl ChatApi for ZulipClient {
    fn fetch_channels(
        &self,
        include_public: bool,
        include_subscribed: bool,
    ) -> ExportResult<Vec<Channel>> {
        let response: StreamsResponse = self.get(
            "streams",
            &[
                ("include_public", include_public.to_string()),
                ("include_subscribed", include_subscribed.to_string()),
            ],
        )?;
        Ok(response.streams)
    }

    fn fetch_messages(&self, query: &MessageQuery<'_>) -> ExportResult<MessagePage> {
        let response: MessagesResponse = self.get(
            "messages",
            &[
                ("anchor", query.anchor.to_string()),
                ("include_anchor", query.include_anchor.to_string()),
                ("num_before", query.num_before.to_string()),
                ("num_after", query.num_after.to_string()),
                ("narrow", query.narrow.to_json()),
                ("apply_markdown", "false".to_string()),
            ],
        )?;

        // The server sorts by id ascending; the trait contract is newest-first.
        let mut messages = response.messages;
        messages.reverse();
        Ok(MessagePage {
            messages,
            found_oldest: response.found_oldest,
        })
    }

    fn fetch_user(&self, user_id: u64) -> ExportResult<String> {
        let response: UserResponse = self.get(&format!("users/{}", user_id), &[])?;
        Ok(response.user.full_name)
    }
}

fn preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_PREVIEW_LEN {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(BODY_PREVIEW_LEN).collect();
        format!("{}...", cut)
    }
}
