//! Feature payloads exchanged with the backend.
//!
//! Field names follow the backend's camelCase JSON. Optional fields default
//! so that older backends which omit them still decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Heading/body message the backend returns when a page has nothing to list,
/// for example outside the nomination period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageTemplatePayload {
    /// Message heading.
    pub heading: String,
    /// Message body, may contain markup.
    pub body: String,
    /// Label of the call-to-action button, if any.
    pub button_text: Option<String>,
    /// Target of the call-to-action button, if any.
    pub button_link: Option<String>,
    /// Whether the user may still self-nominate.
    pub can_nominate: bool,
}

/// One colleague open for feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NomineeItem {
    /// Full name.
    pub display_name: String,
    /// Directory username, used in feedback URLs.
    pub username: String,
    /// Whether the current user already wrote feedback for this nominee.
    #[serde(default)]
    pub has_existing_feedback: bool,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Name of the nominee's manager.
    #[serde(default)]
    pub manager_display_name: String,
    /// Department name.
    #[serde(default)]
    pub department: String,
}

/// Nominees for the current period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomineePayload {
    /// Period name.
    pub period: String,
    /// Colleagues open for feedback.
    pub nominees: Vec<NomineeItem>,
}

/// `/nominees` answers either with a list or with a message template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NomineesResponse {
    /// Nominees are available.
    List(NomineePayload),
    /// Nothing to list; show the message instead.
    Template(MessageTemplatePayload),
}

/// One question on a feedback form and, when filled, its answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackFormItem {
    /// Backend question identifier.
    pub question_id: String,
    /// Question text.
    pub question: String,
    /// Helper text shown under the question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Unrendered answer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_answer: Option<String>,
    /// Identifier of a stored answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_id: Option<String>,
    /// Rendered answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// Employee a feedback form is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackEmployee {
    /// Full name.
    pub display_name: String,
    /// Job title.
    pub position: String,
}

/// A feedback or summary form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackForm {
    /// Questions in display order.
    pub items: Vec<FeedbackFormItem>,
    /// Employee the form is about.
    #[serde(default)]
    pub employee: FeedbackEmployee,
    /// Name of the feedback period.
    #[serde(default)]
    pub period_name: String,
    /// Set once the period has closed.
    #[serde(default)]
    pub read_only: bool,
    /// Last day answers may change.
    #[serde(default)]
    pub end_date: String,
}

/// Body of `GET /feedback/{username}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiveFeedbackPayload {
    /// The form to fill in.
    pub form: FeedbackForm,
}

/// Body of `GET /summarise/{username}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFeedbackPayload {
    /// The manager's summary form.
    pub summary: FeedbackForm,
}

/// A question and the answer given in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    /// Question text.
    pub question: String,
    /// Answer text.
    #[serde(default)]
    pub answer: String,
}

/// Feedback received during one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPeriod {
    /// Human description of the period.
    pub period_description: String,
    /// Whether the period's feedback has been released.
    #[serde(default)]
    pub enable: bool,
    /// Answers given in the period.
    #[serde(default)]
    pub items: Vec<QuestionAnswer>,
}

/// Feedback history for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackHistory {
    /// Employee name.
    pub display_name: String,
    /// Periods, most recent first.
    #[serde(default)]
    pub items: Vec<FeedbackPeriod>,
}

/// Body of `/feedback-about-me` and `/feedback-history/{username}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackHistoryPayload {
    /// The history.
    pub feedback: FeedbackHistory,
}

/// Participation statistics table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    /// Period names, oldest first.
    pub periods: Vec<String>,
    /// Column headings per period.
    pub period_columns: Vec<String>,
    /// Table rows, computed by the backend.
    pub values: Vec<Value>,
}

/// Body of `/team-stats` and `/company-stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsPayload {
    /// The statistics table.
    pub stats: Stats,
}

/// External reviewer already invited by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitee {
    /// Reviewer name.
    pub display_name: String,
    /// Reviewer email.
    pub email: String,
    /// Reviewer business unit.
    #[serde(default)]
    pub business_unit: String,
    /// Reviewer department.
    #[serde(default)]
    pub department: String,
}

/// Body of `GET /external-invite`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalFeedbackStatusPayload {
    /// Whether invitations are open.
    pub can_invite: bool,
    /// Message heading when invitations are closed.
    pub heading: Option<String>,
    /// Message body when invitations are closed.
    pub body: Option<String>,
    /// Reviewers invited so far.
    pub invitees: Vec<Invitee>,
}

/// Body of `/talent-manager-page-data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TalentManagerPanelData {
    /// Number of users in the current population.
    pub user_count: u64,
    /// Instructions for generating a population CSV.
    pub generate_population_msg: String,
    /// Instructions for uploading a new population CSV.
    pub upload_new_population_msg: String,
}

/// Body returned after a population CSV upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvUploadStatusPayload {
    /// One line per processed row or problem found.
    pub messages: Vec<String>,
}
