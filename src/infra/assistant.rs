use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::ticket::{Category, Priority, Suggestion};
use crate::error::AppResult;
use crate::infra::http::ApiClient;
use crate::services::TicketAssistant;

const CLASSIFY_PATH: &str = "/tickets/classify/";
const SOLUTION_PATH: &str = "/tickets/suggest_solution/";

/// Talks to the service's AI endpoints. The model itself runs server side.
pub struct HttpAssistant {
    api: ApiClient,
}

impl HttpAssistant {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TicketAssistant for HttpAssistant {
    async fn classify(&self, description: &str) -> AppResult<Suggestion> {
        let response: ClassifyResponse = self
            .api
            .post(CLASSIFY_PATH, &DescriptionRequest { description })
            .await?;
        Ok(response.into_suggestion())
    }

    async fn suggest_solution(&self, description: &str) -> AppResult<String> {
        let response: SolutionResponse = self
            .api
            .post(SOLUTION_PATH, &DescriptionRequest { description })
            .await?;
        Ok(response.solution.trim().to_string())
    }
}

#[derive(Serialize)]
struct DescriptionRequest<'a> {
    description: &'a str,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    suggested_category: Option<String>,
    suggested_priority: Option<String>,
}

impl ClassifyResponse {
    // Unknown labels count as missing so the caller's defaults apply.
    fn into_suggestion(self) -> Suggestion {
        Suggestion {
            category: self
                .suggested_category
                .as_deref()
                .and_then(Category::from_str),
            priority: self
                .suggested_priority
                .as_deref()
                .and_then(Priority::from_str),
        }
    }
}

#[derive(Deserialize)]
struct SolutionResponse {
    solution: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_classification() {
        let response: ClassifyResponse = serde_json::from_str(
            r#"{"suggested_category":"technical","suggested_priority":"critical"}"#,
        )
        .unwrap();
        assert_eq!(
            response.into_suggestion(),
            Suggestion {
                category: Some(Category::Technical),
                priority: Some(Priority::Critical),
            }
        );
    }

    #[test]
    fn missing_and_unknown_labels_become_none() {
        let response: ClassifyResponse =
            serde_json::from_str(r#"{"suggested_priority":"urgent"}"#).unwrap();
        assert_eq!(response.into_suggestion(), Suggestion::default());
    }
}
