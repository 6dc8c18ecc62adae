//! Per-feature endpoints.
//!
//! Unless a method says otherwise its failures go through the error
//! broadcast and are then returned to the caller as well.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use url::form_urlencoded;

use super::ApiClient;
use crate::domain::ApiError;
use crate::domain::payloads::{
    CsvUploadStatusPayload, ExternalFeedbackStatusPayload, FeedbackFormItem,
    FeedbackHistoryPayload, GiveFeedbackPayload, MessageTemplatePayload, NomineesResponse,
    StatsPayload, SummaryFeedbackPayload, TalentManagerPanelData,
};
use crate::domain::ports::{ApiRequest, RequestBody};

const SELF_NOMINATE_PATH: &str = "/self-nominate";
const NOMINEES_PATH: &str = "/nominees";
const FEEDBACK_ABOUT_ME_PATH: &str = "/feedback-about-me";
const TEAM_STATS_PATH: &str = "/team-stats";
const COMPANY_STATS_PATH: &str = "/company-stats";
const SEND_EMAIL_PATH: &str = "/send-email";
const EXTERNAL_INVITE_PATH: &str = "/external-invite";
const UPLOAD_POPULATION_PATH: &str = "/upload-new-population-csv";
const TALENT_MANAGER_PATH: &str = "/talent-manager-page-data";
const GENERATE_POPULATION_PATH: &str = "/generate-population.csv";
const CURRENT_POPULATION_PATH: &str = "/get-current-population.csv";

impl ApiClient {
    /// Message template served at an arbitrary endpoint under the API root.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn fetch_template(&self, endpoint: &str) -> Result<MessageTemplatePayload, ApiError> {
        let outcome = self.request_json(ApiRequest::get(endpoint)).await;
        self.broadcasting(outcome)
    }

    /// Nominate the current user for feedback.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn self_nominate(&self) -> Result<MessageTemplatePayload, ApiError> {
        let request = ApiRequest::post(SELF_NOMINATE_PATH, RequestBody::Json(json!({})));
        let outcome = self.request_json(request).await;
        self.broadcasting(outcome)
    }

    /// Colleagues open for feedback, or a message when none are.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn nominees(&self) -> Result<NomineesResponse, ApiError> {
        let outcome = self.request_json(ApiRequest::get(NOMINEES_PATH)).await;
        self.broadcasting(outcome)
    }

    /// Feedback released to the current user.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn feedback_about_me(&self) -> Result<FeedbackHistoryPayload, ApiError> {
        let outcome = self
            .request_json(ApiRequest::get(FEEDBACK_ABOUT_ME_PATH))
            .await;
        self.broadcasting(outcome)
    }

    /// Feedback form about `username`.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn feedback_form(&self, username: &str) -> Result<GiveFeedbackPayload, ApiError> {
        let outcome = self
            .request_json(ApiRequest::get(feedback_path(username)))
            .await;
        self.broadcasting(outcome)
    }

    /// Save answers to the feedback form about `username`.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn put_feedback_form(
        &self,
        username: &str,
        items: &[FeedbackFormItem],
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::put(feedback_path(username), form_body(items));
        let outcome = self.request_json(request).await;
        self.broadcasting(outcome)
    }

    /// Feedback history of `username`, for their manager.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn feedback_history(&self, username: &str) -> Result<FeedbackHistoryPayload, ApiError> {
        let path = format!("/feedback-history/{}/", path_segment(username));
        let outcome = self.request_json(ApiRequest::get(path)).await;
        self.broadcasting(outcome)
    }

    /// Participation of the current manager's team.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn team_stats(&self) -> Result<StatsPayload, ApiError> {
        let outcome = self.request_json(ApiRequest::get(TEAM_STATS_PATH)).await;
        self.broadcasting(outcome)
    }

    /// Company-wide participation.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn company_stats(&self) -> Result<StatsPayload, ApiError> {
        let outcome = self.request_json(ApiRequest::get(COMPANY_STATS_PATH)).await;
        self.broadcasting(outcome)
    }

    /// Manager summary form for `username`.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn summary_feedback(&self, username: &str) -> Result<SummaryFeedbackPayload, ApiError> {
        let outcome = self
            .request_json(ApiRequest::get(summary_path(username)))
            .await;
        self.broadcasting(outcome)
    }

    /// Save the manager summary for `username`.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn put_summary_feedback(
        &self,
        username: &str,
        items: &[FeedbackFormItem],
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::put(summary_path(username), form_body(items));
        let outcome = self.request_json(request).await;
        self.broadcasting(outcome)
    }

    /// Ask the backend to send the email identified by `template_key`.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn send_email(&self, template_key: &str) -> Result<Value, ApiError> {
        let body = RequestBody::Json(json!({ "templateKey": template_key }));
        let outcome = self
            .request_json(ApiRequest::post(SEND_EMAIL_PATH, body))
            .await;
        self.broadcasting(outcome)
    }

    /// Whether external reviewers may be invited, and who already was.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn external_invite_status(&self) -> Result<ExternalFeedbackStatusPayload, ApiError> {
        let outcome = self
            .request_json(ApiRequest::get(EXTERNAL_INVITE_PATH))
            .await;
        self.broadcasting(outcome)
    }

    /// Invite an external reviewer by email.
    ///
    /// # Errors
    ///
    /// Any failure. Only failures without a structured body are broadcast;
    /// the invite view renders structured ones itself.
    pub async fn send_external_invite(&self, email: &str) -> Result<Value, ApiError> {
        let body = RequestBody::Json(json!({ "email": email }));
        let outcome = self
            .request_json(ApiRequest::post(EXTERNAL_INVITE_PATH, body))
            .await;
        outcome.inspect_err(|error| {
            if error.body().is_none() {
                self.publish(error);
            }
        })
    }

    /// Upload a new population CSV, sent base64-encoded.
    ///
    /// # Errors
    ///
    /// [`ApiError::Upload`] naming the status; never broadcast.
    pub async fn upload_new_population_csv(
        &self,
        contents: &[u8],
    ) -> Result<CsvUploadStatusPayload, ApiError> {
        let body = RequestBody::Json(json!({ "content": STANDARD.encode(contents) }));
        self.request_json(ApiRequest::post(UPLOAD_POPULATION_PATH, body))
            .await
            .map_err(ApiError::into_upload)
    }

    /// Counts and instructions for the talent manager panel.
    ///
    /// # Errors
    ///
    /// Any failure, after broadcasting it.
    pub async fn talent_manager_page_data(&self) -> Result<TalentManagerPanelData, ApiError> {
        let outcome = self
            .request_json(ApiRequest::get(TALENT_MANAGER_PATH))
            .await;
        self.broadcasting(outcome)
    }

    /// Population CSV template for `business_unit`, as raw text.
    ///
    /// # Errors
    ///
    /// Any failure; never broadcast.
    pub async fn generate_population_csv(&self, business_unit: &str) -> Result<String, ApiError> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("businessUnit", business_unit)
            .finish();
        self.request_text(ApiRequest::get(format!("{GENERATE_POPULATION_PATH}?{query}")))
            .await
    }

    /// Current population as CSV text.
    ///
    /// # Errors
    ///
    /// Any failure; never broadcast.
    pub async fn current_population_csv(&self) -> Result<String, ApiError> {
        self.request_text(ApiRequest::get(CURRENT_POPULATION_PATH))
            .await
    }
}

fn feedback_path(username: &str) -> String {
    format!("/feedback/{}/", path_segment(username))
}

fn summary_path(username: &str) -> String {
    format!("/summarise/{}/", path_segment(username))
}

fn form_body(items: &[FeedbackFormItem]) -> RequestBody {
    RequestBody::Json(json!({ "form": items }))
}

/// Percent-encode one path segment.
fn path_segment(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice", "alice")]
    #[case("o'neil", "o%27neil")]
    #[case("first last", "first%20last")]
    #[case("a/b", "a%2Fb")]
    fn usernames_are_encoded_as_one_segment(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(path_segment(raw), expected);
    }

    #[test]
    fn form_items_travel_under_form_key() {
        let items = [FeedbackFormItem {
            question_id: "q1".to_owned(),
            question: "Strengths?".to_owned(),
            raw_answer: Some("Clear writing".to_owned()),
            ..FeedbackFormItem::default()
        }];
        let RequestBody::Json(value) = form_body(&items) else {
            panic!("form bodies are JSON");
        };
        assert_eq!(value["form"][0]["rawAnswer"], "Clear writing");
    }
}
