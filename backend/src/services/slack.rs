use anyhow::Result;
use log::info;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlackText {
    Mrkdwn { text: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SlackBlock {
    Section { text: SlackText },
    Divider,
}

impl SlackBlock {
    pub fn section(text: String) -> Self {
        SlackBlock::Section {
            text: SlackText::Mrkdwn { text },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SlackMessage {
    pub channel: String,
    pub blocks: Vec<SlackBlock>,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

// The channel id can be looked up with GET https://slack.com/api/conversations.list
// using the same bot token.
pub async fn send_slack_message(message: &SlackMessage, token: &str) -> Result<()> {
    let client = Client::new();
    let response = client
        .post("https://slack.com/api/chat.postMessage")
        .bearer_auth(token)
        .json(message)
        .send()
        .await?
        .error_for_status()?
        .json::<PostMessageResponse>()
        .await?;

    if !response.ok {
        return Err(anyhow::anyhow!(
            "Slack rejected the message: {}",
            response.error.unwrap_or_else(|| "unknown error".to_string())
        ));
    }

    info!("Posted alert to Slack channel {}", message.channel);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_serializes_to_the_slack_block_format() {
        let message = SlackMessage {
            channel: "C012345".to_string(),
            blocks: vec![
                SlackBlock::section("*Header*".to_string()),
                SlackBlock::Divider,
            ],
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "channel": "C012345",
                "blocks": [
                    { "type": "section", "text": { "type": "mrkdwn", "text": "*Header*" } },
                    { "type": "divider" }
                ]
            })
        );
    }
}
