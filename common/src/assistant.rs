//! 分析依頼文の貼り付け先（AIアシスタント）

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assistant {
    ChatGpt,
    Claude,
    Gemini,
    Perplexity,
    Grok,
}

impl Assistant {
    pub const ALL: [Assistant; 5] = [
        Assistant::ChatGpt,
        Assistant::Claude,
        Assistant::Gemini,
        Assistant::Perplexity,
        Assistant::Grok,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Assistant::ChatGpt => "ChatGPT",
            Assistant::Claude => "Claude",
            Assistant::Gemini => "Gemini",
            Assistant::Perplexity => "Perplexity",
            Assistant::Grok => "Grok",
        }
    }

    /// チャット画面のURL
    pub fn url(&self) -> &'static str {
        match self {
            Assistant::ChatGpt => "https://chat.openai.com/",
            Assistant::Claude => "https://claude.ai/",
            Assistant::Gemini => "https://gemini.google.com/",
            Assistant::Perplexity => "https://www.perplexity.ai/",
            Assistant::Grok => "https://x.com/i/grok",
        }
    }
}

impl std::fmt::Display for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Assistant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chatgpt" | "openai" | "gpt" => Ok(Assistant::ChatGpt),
            "claude" => Ok(Assistant::Claude),
            "gemini" => Ok(Assistant::Gemini),
            "perplexity" => Ok(Assistant::Perplexity),
            "grok" => Ok(Assistant::Grok),
            _ => Err(format!(
                "Unknown assistant: {}. Use chatgpt, claude, gemini, perplexity, or grok",
                s
            )),
        }
    }
}
