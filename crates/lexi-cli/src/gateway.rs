//! Console messaging gateway: one JSON line per prompt on stdout.

use std::io::Write;

use async_trait::async_trait;
use serde::Serialize;

use lexi_core::ids::TenantId;
use lexi_core::responses::QuizPrompt;
use lexi_engine::{DeliveryError, MessagingGateway};

#[derive(Debug, Serialize)]
struct PromptLine<'a> {
    tenant: TenantId,
    word: &'a str,
    text: String,
    surprise: bool,
    buttons: Vec<Button>,
}

#[derive(Debug, Serialize)]
struct Button {
    label: &'static str,
    payload: String,
}

fn prompt_line(prompt: &QuizPrompt) -> Result<String, serde_json::Error> {
    serde_json::to_string(&PromptLine {
        tenant: prompt.tenant_id,
        word: &prompt.word,
        text: prompt.text(),
        surprise: prompt.surprise,
        buttons: prompt
            .buttons()
            .into_iter()
            .map(|(label, payload)| Button { label, payload })
            .collect(),
    })
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleGateway;

#[async_trait]
impl MessagingGateway for ConsoleGateway {
    async fn send_prompt(&self, prompt: &QuizPrompt) -> Result<(), DeliveryError> {
        let line = prompt_line(prompt).map_err(|e| DeliveryError::Transport(e.to_string()))?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")
            .and_then(|()| stdout.flush())
            .map_err(|e| DeliveryError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_line_is_single_json_object() {
        let prompt = QuizPrompt {
            tenant_id: TenantId(9),
            word: "apfel".into(),
            description: None,
            token: "00112233445566778899aabbccddeeff".into(),
            surprise: true,
        };
        let line = prompt_line(&prompt).unwrap();
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["tenant"], 9);
        assert_eq!(value["surprise"], true);
        assert_eq!(value["buttons"].as_array().unwrap().len(), 3);
        assert_eq!(
            value["buttons"][2]["payload"],
            "review:00112233445566778899aabbccddeeff"
        );
    }
}
