//! Canonical payloads of the single-transition action kinds.

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

// Status enums //
//**************//
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
	#[default]
	Pending,
	Completed,
	Failed,
	Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
	#[default]
	Info,
	Success,
	Warning,
	Error,
}

/// Status of information and feedback requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
	#[default]
	Pending,
	Submitted,
	Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
	NotStarted,
	#[default]
	InProgress,
	Completed,
	Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureStatus {
	#[default]
	Pending,
	Signed,
	Declined,
	Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
	#[default]
	Pending,
	Approved,
	Rejected,
	Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptInStatus {
	#[default]
	Pending,
	OptedIn,
	OptedOut,
}

// Payloads //
//**********//
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequestDetails {
	/// Echoed as given, no currency arithmetic happens here
	pub amount: f64,
	pub currency: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub allowed_payment_methods: Vec<String>,
	pub payment_status: PaymentStatus,
	pub due_date: Option<String>,
	pub payment_method_used: Option<String>,
	pub paid_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericMessageDetails {
	pub message: String,
	pub severity: Severity,
	#[serde(default)]
	pub requires_acknowledgment: bool,
	#[serde(default)]
	pub is_acknowledged: bool,
	pub acknowledged_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InformationRequestDetails {
	#[serde(default)]
	pub requested_fields: Vec<String>,
	pub instructions: Option<String>,
	pub submission_status: SubmissionStatus,
	#[serde(default)]
	pub responses: serde_json::Map<String, serde_json::Value>,
	pub submitted_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequestDetails {
	pub question: String,
	pub rating_scale: u8,
	pub allow_comments: bool,
	pub submission_status: SubmissionStatus,
	pub rating: Option<u8>,
	pub comment: Option<String>,
	pub submitted_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneUpdateDetails {
	pub milestone_title: String,
	pub milestone_status: MilestoneStatus,
	/// Always within 0..=100
	pub progress_percentage: u8,
	#[serde(default)]
	pub is_completed: bool,
	pub target_date: Option<String>,
	pub actual_completion_date: Option<String>,
	pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLinkDetails {
	pub url: String,
	pub link_title: Option<String>,
	pub resource_type: String,
	#[serde(default)]
	pub is_viewed: bool,
	pub viewed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRequestDetails {
	pub document_url: String,
	pub document_name: Option<String>,
	pub signature_status: SignatureStatus,
	pub signer_name: Option<String>,
	pub signed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRequestDetails {
	pub approval_item: String,
	pub approval_status: ApprovalStatus,
	pub decision_notes: Option<String>,
	pub decided_at: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
	pub id: String,
	pub text: String,
	#[serde(default)]
	pub is_completed: bool,
	pub required: Option<bool>,
	pub completed_at: Option<String>,
	pub attachments: Option<Vec<String>>,
	pub notes: Option<String>,
}

impl ChecklistItem {
	/// Items count as required unless explicitly marked optional
	pub fn is_required(&self) -> bool {
		self.required.unwrap_or(true)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistDetails {
	#[serde(default)]
	pub items: Vec<ChecklistItem>,
	/// Derived: list is non-empty and every required item is done
	#[serde(default)]
	pub is_completed: bool,
	pub completed_at: Option<String>,
}

impl ChecklistDetails {
	pub fn all_required_done(&self) -> bool {
		!self.items.is_empty()
			&& self.items.iter().filter(|item| item.is_required()).all(|item| item.is_completed)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMessageDetails {
	pub video_url: String,
	pub thumbnail_url: Option<String>,
	pub duration_seconds: Option<u32>,
	#[serde(default)]
	pub is_watched: bool,
	pub watched_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptInRequestDetails {
	pub consent_text: String,
	pub opt_in_status: OptInStatus,
	pub responded_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDownloadDetails {
	pub document_url: String,
	pub document_name: Option<String>,
	#[serde(default)]
	pub download_count: u32,
	pub last_downloaded_at: Option<String>,
}

// vim: ts=4
