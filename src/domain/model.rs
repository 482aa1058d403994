use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Trims and lower-cases a skill keyword. Catalog tokens and query tokens
/// go through the same function so exact lookups can line up.
pub fn normalize_skill(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Splits a comma-separated skills field into distinct normalized tokens,
/// keeping first-seen order and dropping empties.
pub fn parse_skills(raw: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for token in raw.split(',').map(normalize_skill) {
        if !token.is_empty() && !skills.contains(&token) {
            skills.push(token);
        }
    }
    skills
}

/// One portfolio project. Built once at catalog load and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioEntry {
    project: String,
    url: String,
    skills: Vec<String>,
}

impl PortfolioEntry {
    pub fn new(project: impl Into<String>, url: impl Into<String>, raw_skills: &str) -> Self {
        Self {
            project: project.into(),
            url: url.into(),
            skills: parse_skills(raw_skills),
        }
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// `"{project}: {url}"`, the form handed to the email drafter.
    pub fn display_link(&self) -> String {
        format!("{}: {}", self.project, self.url)
    }
}

/// A raw row from a catalog source, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    pub name: String,
    pub url: String,
    pub skills_csv: String,
}

impl CatalogRow {
    pub fn new(name: &str, url: &str, skills_csv: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            skills_csv: skills_csv.to_string(),
        }
    }
}

/// A job posting as returned by the extraction model. Fields the model adds
/// beyond the four requested ones are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience: String,
    #[serde(default, deserialize_with = "lenient_skills")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedEmail {
    pub job: JobRecord,
    pub links: Vec<String>,
    pub email: String,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

// Non-string array elements become "" so they match nothing downstream.
fn lenient_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                _ => String::new(),
            })
            .collect(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    })
}
