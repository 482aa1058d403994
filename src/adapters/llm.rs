use crate::domain::model::JobRecord;
use crate::domain::ports::{ConfigProvider, EmailDrafter, JobExtractor, SenderProfile};
use crate::utils::error::{ColdMailError, Result};
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: u64,
}

impl LlmSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let api_key = config
            .api_key()
            .filter(|key| !key.trim().is_empty())
            .map(str::to_string);
        let api_key = validate_required_field("llm.api_key (GROQ_API_KEY)", &api_key)?.clone();

        Ok(Self {
            endpoint: config.llm_endpoint().to_string(),
            api_key,
            model: config.model().to_string(),
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            timeout_seconds: config.timeout_seconds(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

/// Chat-completions client for Groq's OpenAI-compatible API. Extracts job
/// postings from page text and drafts the outreach email.
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: Client,
    settings: LlmSettings,
    sender: SenderProfile,
}

impl GroqClient {
    pub fn new(settings: LlmSettings, sender: SenderProfile) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            settings,
            sender,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(LlmSettings::from_config(config)?, config.sender())
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        tracing::debug!("POST {} (model: {})", self.settings.endpoint, self.settings.model);
        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("❌ LLM request failed with status {}", status);
            return Err(ColdMailError::LlmError {
                message: format!("status {}: {}", status, body),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ColdMailError::LlmError {
                message: "response contained no choices".to_string(),
            })
    }
}

#[async_trait]
impl JobExtractor for GroqClient {
    async fn extract(&self, page_text: &str) -> Result<Vec<JobRecord>> {
        let content = self.complete(extraction_prompt(page_text)).await?;
        parse_jobs(&content)
    }
}

#[async_trait]
impl EmailDrafter for GroqClient {
    async fn draft(&self, job: &JobRecord, portfolio_links: &[String]) -> Result<String> {
        let job_json = serde_json::to_string_pretty(job)?;
        let content = self
            .complete(email_prompt(&self.sender, &job_json, portfolio_links))
            .await?;
        Ok(content.trim().to_string())
    }
}

fn extraction_prompt(page_text: &str) -> String {
    format!(
        "### SCRAPED TEXT FROM WEBSITE:\n\
         {page_text}\n\
         ### INSTRUCTION:\n\
         The scraped text is from the career's page of a website.\n\
         Your job is to extract the job postings and return them in JSON format \
         containing the following keys: `role`, `experience`, `skills` and `description`.\n\
         Only return the valid JSON.\n\
         ### VALID JSON (NO PREAMBLE):"
    )
}

fn email_prompt(sender: &SenderProfile, job_json: &str, links: &[String]) -> String {
    let link_list = links
        .iter()
        .map(|link| format!("- {}", link))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "### JOB DESCRIPTION:\n\
         {job_json}\n\n\
         ### INSTRUCTION:\n\
         You are {name}, a {role} at {company}. {pitch}\n\
         Your job is to write a cold email to the client regarding the job mentioned above \
         describing the capability of {company} in fulfilling their needs.\n\
         Also add the most relevant ones from the following links to showcase {company}'s portfolio:\n\
         {link_list}\n\
         Remember you are {name}, {role} at {company}.\n\
         Do not provide a preamble.\n\
         ### EMAIL (NO PREAMBLE):",
        name = sender.name,
        role = sender.role,
        company = sender.company,
        pitch = sender.pitch,
    )
}

/// Reads the job list out of a model reply. A fenced code block wins over the
/// surrounding prose; otherwise the first `[` or `{` that opens valid JSON is
/// used. A single object counts as one job.
pub fn parse_jobs(content: &str) -> Result<Vec<JobRecord>> {
    let value = fenced_block(content)
        .and_then(first_json_value)
        .or_else(|| first_json_value(content))
        .ok_or_else(|| ColdMailError::ExtractionParseError {
            message: "reply contains no parsable JSON".to_string(),
        })?;

    let items = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(ColdMailError::ExtractionParseError {
                message: format!("expected an object or array, got {}", other),
            })
        }
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|e| ColdMailError::ExtractionParseError {
                message: e.to_string(),
            })
        })
        .collect()
}

/// Body of the first ``` fence, with any language tag on the opening line dropped.
fn fenced_block(content: &str) -> Option<&str> {
    let open = content.find("```")?;
    let rest = &content[open + 3..];
    let body = &rest[rest.find('\n')? + 1..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

fn first_json_value(text: &str) -> Option<Value> {
    text.match_indices(['[', '{']).find_map(|(start, _)| {
        serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<Value>()
            .next()
            .and_then(|parsed| parsed.ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn settings(endpoint: String) -> LlmSettings {
        LlmSettings {
            endpoint,
            api_key: "test-key".to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: None,
            timeout_seconds: 5,
        }
    }

    fn completion(content: &str) -> Value {
        json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
        })
    }

    #[test]
    fn test_parse_jobs_single_object() {
        let jobs = parse_jobs(r#"{"role": "Analyst", "skills": ["SQL"]}"#).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].role, "Analyst");
    }

    #[test]
    fn test_parse_jobs_fenced_array() {
        let reply = "Here you go:\n```json\n[{\"role\": \"A\"}, {\"role\": \"B\"}]\n```";
        let jobs = parse_jobs(reply).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].role, "B");
    }

    #[test]
    fn test_parse_jobs_skips_brackets_in_prose() {
        let jobs = parse_jobs("Here is [the] JSON: {\"role\": \"A\"} hope it helps {:").unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].role, "A");
    }

    #[test]
    fn test_parse_jobs_prefers_fenced_block() {
        let reply = "Found {2} roles:\n```\n[{\"role\": \"A\"}, {\"role\": \"B\"}]\n```\nDone.";
        let jobs = parse_jobs(reply).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].role, "A");
    }

    #[test]
    fn test_settings_require_api_key() {
        let config = crate::config::toml_config::TomlConfig::from_toml_str("").unwrap();
        let err = LlmSettings::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            ColdMailError::MissingConfigError { ref field } if field.contains("GROQ_API_KEY")
        ));
    }

    #[test]
    fn test_parse_jobs_invalid() {
        assert!(matches!(
            parse_jobs("no json at all"),
            Err(ColdMailError::ExtractionParseError { .. })
        ));
        assert!(matches!(
            parse_jobs("{\"role\": "),
            Err(ColdMailError::ExtractionParseError { .. })
        ));
        assert!(parse_jobs("[1, 2]").is_err());
    }

    #[test]
    fn test_email_prompt_lists_links() {
        let prompt = email_prompt(
            &SenderProfile::default(),
            "{}",
            &["Dash: u1".to_string(), "ML: u2".to_string()],
        );
        assert!(prompt.contains("- Dash: u1\n- ML: u2"));
        assert!(prompt.contains("You are Mohan, a business development executive at AtliQ."));
    }

    #[tokio::test]
    async fn test_extract_posts_chat_completion() {
        let server = MockServer::start();
        let llm_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .body_contains("llama-3.3-70b-versatile")
                .body_contains("Senior Data Engineer");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(completion(
                    r#"{"role": "Senior Data Engineer", "experience": "5 years", "skills": ["Python", "Spark"], "description": "Build pipelines"}"#,
                ));
        });

        let client = GroqClient::new(
            settings(server.url("/chat/completions")),
            SenderProfile::default(),
        )
        .unwrap();
        let jobs = client.extract("Senior Data Engineer wanted").await.unwrap();

        llm_mock.assert();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].skills, vec!["Python", "Spark"]);
    }

    #[tokio::test]
    async fn test_draft_returns_trimmed_email() {
        let server = MockServer::start();
        let llm_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .body_contains("Dash: u1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(completion("\n  Subject: Hello\n\nDear team,  \n"));
        });

        let client = GroqClient::new(
            settings(server.url("/chat/completions")),
            SenderProfile::default(),
        )
        .unwrap();
        let job = JobRecord {
            role: "Analyst".to_string(),
            ..Default::default()
        };
        let email = client.draft(&job, &["Dash: u1".to_string()]).await.unwrap();

        llm_mock.assert();
        assert_eq!(email, "Subject: Hello\n\nDear team,");
    }

    #[tokio::test]
    async fn test_error_status_is_llm_error() {
        let server = MockServer::start();
        let llm_mock = server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).body("invalid api key");
        });

        let client = GroqClient::new(
            settings(server.url("/chat/completions")),
            SenderProfile::default(),
        )
        .unwrap();
        let err = client.extract("text").await.unwrap_err();

        llm_mock.assert();
        match err {
            ColdMailError::LlmError { message } => assert!(message.contains("invalid api key")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
