use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Offline stand-in for a hosted model, used by `--dry-run` and tests.
/// Replies to a generation prompt with a canned, well-formed fenced-JSON
/// specification, complete with the surrounding prose a real model tends to
/// add.
pub struct MockLlmClient;

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.contains("Create a detailed AI prompt structure") {
            Ok(r#"Here is the prompt structure you asked for:

```json
{
    "system_role": "You are an experienced customer-support analyst who writes clear, actionable summaries.",
    "task_description": "Read a batch of customer feedback messages and produce a structured summary of themes, sentiment, and suggested follow-ups.",
    "input_structure": {
        "messages": "list of raw customer feedback strings",
        "metadata": {
            "channel": "where the feedback came from (email, chat, review)",
            "period": "date range covered by the batch"
        }
    },
    "step_by_step": [
        "Read every message in the batch before categorizing",
        "Group messages into recurring themes",
        "Assign an overall sentiment to each theme",
        "Propose one concrete follow-up action per theme"
    ],
    "output_format": {
        "themes": {
            "name": "short theme label",
            "sentiment": "positive, neutral, or negative",
            "follow_up": "one suggested action"
        },
        "overall_sentiment": "single word summary"
    },
    "guidelines": [
        "Quote at most one representative message per theme",
        "Prefer specific follow-ups over generic advice"
    ],
    "constraints": [
        "Do not include personally identifying information",
        "Limit the summary to ten themes"
    ],
    "examples": [
        "Theme: slow checkout — sentiment: negative — follow-up: profile the payment flow"
    ]
}
```

Let me know if you would like any section expanded."#
                .to_string())
        } else {
            Ok(r#"{"status": "mock"}"#.to_string())
        }
    }
}
