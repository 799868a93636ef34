//! Tenant-overridable defaults applied by the transform pipeline.
//!
//! Every default that used to be an inline constant lives here, so a tenant can
//! override it and tests can pin it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::details::{AppointmentType, Severity};
use crate::prelude::*;

const MIN_RATING_SCALE: u8 = 2;
const MAX_RATING_SCALE: u8 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionSettings {
	/// ISO 4217 code used when a payment request names no currency
	pub default_currency: String,
	pub default_severity: Severity,
	pub default_appointment_type: AppointmentType,
	pub default_rating_scale: u8,
	pub default_resource_type: String,
	/// Prefix of synthetic checklist item ids
	pub checklist_id_prefix: String,
}

impl Default for ActionSettings {
	fn default() -> Self {
		Self {
			default_currency: "EUR".to_string(),
			default_severity: Severity::Info,
			default_appointment_type: AppointmentType::Online,
			default_rating_scale: 5,
			default_resource_type: "link".to_string(),
			checklist_id_prefix: "item".to_string(),
		}
	}
}

impl ActionSettings {
	pub fn builder() -> ActionSettingsBuilder {
		ActionSettingsBuilder::default()
	}

	/// Load settings from a YAML document. Missing keys keep their defaults.
	pub fn from_yaml(yaml: &str) -> ClResult<Self> {
		let mut settings: ActionSettings = serde_yaml::from_str(yaml)
			.map_err(|err| Error::ConfigError(format!("invalid action settings: {}", err)))?;
		settings.default_currency = settings.default_currency.trim().to_ascii_uppercase();
		settings.check()?;
		Ok(settings)
	}

	fn check(&self) -> ClResult<()> {
		let currency = self.default_currency.trim();
		if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
			return Err(Error::ConfigError(format!(
				"default_currency must be a 3-letter code, got '{}'",
				self.default_currency
			)));
		}
		if !(MIN_RATING_SCALE..=MAX_RATING_SCALE).contains(&self.default_rating_scale) {
			return Err(Error::ConfigError(format!(
				"default_rating_scale must be within {}..={}",
				MIN_RATING_SCALE, MAX_RATING_SCALE
			)));
		}
		if self.checklist_id_prefix.trim().is_empty() {
			return Err(Error::ConfigError("checklist_id_prefix cannot be empty".to_string()));
		}
		Ok(())
	}

	/// Clamp a requested rating scale into the supported range
	pub fn clamp_rating_scale(scale: f64) -> u8 {
		scale.round().clamp(f64::from(MIN_RATING_SCALE), f64::from(MAX_RATING_SCALE)) as u8
	}
}

/// Builder for ActionSettings with fluent API
#[derive(Debug, Default)]
pub struct ActionSettingsBuilder {
	settings: ActionSettings,
}

impl ActionSettingsBuilder {
	pub fn default_currency(mut self, currency: impl Into<String>) -> Self {
		self.settings.default_currency = currency.into().to_ascii_uppercase();
		self
	}

	pub fn default_severity(mut self, severity: Severity) -> Self {
		self.settings.default_severity = severity;
		self
	}

	pub fn default_appointment_type(mut self, typ: AppointmentType) -> Self {
		self.settings.default_appointment_type = typ;
		self
	}

	pub fn default_rating_scale(mut self, scale: u8) -> Self {
		self.settings.default_rating_scale = scale;
		self
	}

	pub fn default_resource_type(mut self, resource_type: impl Into<String>) -> Self {
		self.settings.default_resource_type = resource_type.into();
		self
	}

	pub fn checklist_id_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.settings.checklist_id_prefix = prefix.into();
		self
	}

	pub fn build(self) -> ClResult<ActionSettings> {
		self.settings.check()?;
		Ok(self.settings)
	}
}

/// Inputs of a transform besides the raw payload itself
#[derive(Debug, Clone, Copy)]
pub struct TransformCtx<'a> {
	pub settings: &'a ActionSettings,
	/// Used to stamp completion dates
	pub now: DateTime<Utc>,
}

impl<'a> TransformCtx<'a> {
	pub fn new(settings: &'a ActionSettings) -> Self {
		Self { settings, now: Utc::now() }
	}

	pub fn at(settings: &'a ActionSettings, now: DateTime<Utc>) -> Self {
		Self { settings, now }
	}

	pub fn now_iso(&self) -> String {
		iso(self.now)
	}
}

pub(crate) fn iso(dt: DateTime<Utc>) -> String {
	dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_are_valid() {
		let settings = ActionSettings::builder().build().unwrap();
		assert_eq!(settings, ActionSettings::default());
		assert_eq!(settings.default_currency, "EUR");
	}

	#[test]
	fn test_builder_overrides() {
		let settings = ActionSettings::builder()
			.default_currency("usd")
			.default_rating_scale(10)
			.build()
			.unwrap();
		assert_eq!(settings.default_currency, "USD");
		assert_eq!(settings.default_rating_scale, 10);
	}

	#[test]
	fn test_builder_rejects_bad_rating_scale() {
		let res = ActionSettings::builder().default_rating_scale(1).build();
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_from_yaml_partial() {
		let settings = ActionSettings::from_yaml(concat!(
			"default_currency: HUF\n",
			"default_severity: warning\n",
			"default_appointment_type: in_person\n",
		))
		.unwrap();
		assert_eq!(settings.default_currency, "HUF");
		assert_eq!(settings.default_severity, Severity::Warning);
		assert_eq!(settings.default_appointment_type, AppointmentType::InPerson);
		assert_eq!(settings.default_rating_scale, 5);
	}

	#[test]
	fn test_from_yaml_uppercases_currency() {
		let settings = ActionSettings::from_yaml("default_currency: usd\n").unwrap();
		assert_eq!(settings.default_currency, "USD");
	}

	#[test]
	fn test_from_yaml_rejects_unknown_key() {
		let res = ActionSettings::from_yaml("default_plan_id: 1\n");
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_from_yaml_rejects_bad_currency() {
		let res = ActionSettings::from_yaml("default_currency: euro\n");
		assert!(matches!(res, Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_clamp_rating_scale() {
		assert_eq!(ActionSettings::clamp_rating_scale(0.0), 2);
		assert_eq!(ActionSettings::clamp_rating_scale(7.4), 7);
		assert_eq!(ActionSettings::clamp_rating_scale(99.0), 10);
	}
}

// vim: ts=4
