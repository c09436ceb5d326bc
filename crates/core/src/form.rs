//! Raw form state and the editing helpers that keep it consistent.
//!
//! Every field is stored exactly as entered. Blank (empty or all
//! whitespace) means "not provided"; trimming happens when the payload
//! is built.

use serde::{Deserialize, Serialize};

use crate::age::calculate_age;
use crate::error::CoreError;

/// Identifies a single input on the obituary form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    NamePrefix,
    NameFirst,
    NameMiddle,
    NameLast,
    NameMaiden,
    NameNickname,
    NameSuffix,
    DateOfBirth,
    DateOfDeath,
    Age,
    ObituaryText,
    PublishStartDate,
    PublishEndDate,
    ObituaryType,
    EmailAddress,
    SourceType,
    Source,
    SourceReferenceId,
    SourceUrl,
    Provider,
    ProviderReferenceId,
    Owner,
    OwnerReferenceId,
}

impl FormField {
    /// Key used in form files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NamePrefix => "name_prefix",
            Self::NameFirst => "name_first",
            Self::NameMiddle => "name_middle",
            Self::NameLast => "name_last",
            Self::NameMaiden => "name_maiden",
            Self::NameNickname => "name_nickname",
            Self::NameSuffix => "name_suffix",
            Self::DateOfBirth => "date_of_birth",
            Self::DateOfDeath => "date_of_death",
            Self::Age => "age",
            Self::ObituaryText => "obituary_text",
            Self::PublishStartDate => "publish_start_date",
            Self::PublishEndDate => "publish_end_date",
            Self::ObituaryType => "obituary_type",
            Self::EmailAddress => "email_address",
            Self::SourceType => "source_type",
            Self::Source => "source",
            Self::SourceReferenceId => "source_reference_id",
            Self::SourceUrl => "source_url",
            Self::Provider => "provider",
            Self::ProviderReferenceId => "provider_reference_id",
            Self::Owner => "owner",
            Self::OwnerReferenceId => "owner_reference_id",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current values of every form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    pub name_prefix: String,
    pub name_first: String,
    pub name_middle: String,
    pub name_last: String,
    pub name_maiden: String,
    pub name_nickname: String,
    pub name_suffix: String,
    pub date_of_birth: String,
    pub date_of_death: String,
    pub age: String,
    pub obituary_text: String,
    pub publish_start_date: String,
    pub publish_end_date: String,
    pub obituary_type: String,
    pub email_address: String,
    pub source_type: String,
    pub source: String,
    pub source_reference_id: String,
    pub source_url: String,
    pub provider: String,
    pub provider_reference_id: String,
    pub owner: String,
    pub owner_reference_id: String,
}

/// Obituary type used when the form leaves it blank.
pub const DEFAULT_OBITUARY_TYPE: &str = "paid";

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl FormState {
    /// Parse a form from a JSON object keyed by field name. Missing keys
    /// are blank.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Raw value of a single field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::NamePrefix => &self.name_prefix,
            FormField::NameFirst => &self.name_first,
            FormField::NameMiddle => &self.name_middle,
            FormField::NameLast => &self.name_last,
            FormField::NameMaiden => &self.name_maiden,
            FormField::NameNickname => &self.name_nickname,
            FormField::NameSuffix => &self.name_suffix,
            FormField::DateOfBirth => &self.date_of_birth,
            FormField::DateOfDeath => &self.date_of_death,
            FormField::Age => &self.age,
            FormField::ObituaryText => &self.obituary_text,
            FormField::PublishStartDate => &self.publish_start_date,
            FormField::PublishEndDate => &self.publish_end_date,
            FormField::ObituaryType => &self.obituary_type,
            FormField::EmailAddress => &self.email_address,
            FormField::SourceType => &self.source_type,
            FormField::Source => &self.source,
            FormField::SourceReferenceId => &self.source_reference_id,
            FormField::SourceUrl => &self.source_url,
            FormField::Provider => &self.provider,
            FormField::ProviderReferenceId => &self.provider_reference_id,
            FormField::Owner => &self.owner,
            FormField::OwnerReferenceId => &self.owner_reference_id,
        }
    }

    /// True when the field is empty or whitespace only.
    pub fn is_blank(&self, field: FormField) -> bool {
        is_blank(self.get(field))
    }

    /// Recompute `age` from the two dates, clearing it when no age can
    /// be derived. Mirrors what happens when either date is edited.
    pub fn refresh_age(&mut self) {
        self.age = calculate_age(&self.date_of_birth, &self.date_of_death)
            .map(|age| age.to_string())
            .unwrap_or_default();
    }

    /// Derive `age` from the dates only when the user left it blank.
    pub fn fill_missing_age(&mut self) {
        if is_blank(&self.age) {
            self.refresh_age();
        }
    }

    /// Copy the publish start date into a blank end date.
    pub fn default_end_date_to_start(&mut self) {
        if is_blank(&self.publish_end_date) && !is_blank(&self.publish_start_date) {
            self.publish_end_date = self.publish_start_date.trim().to_string();
        }
    }

    /// Fill blank fields from the saved defaults and pin the obituary
    /// type to [`DEFAULT_OBITUARY_TYPE`] when unset.
    pub fn apply_defaults(
        &mut self,
        default_owner: Option<&str>,
        default_source: Option<&str>,
        default_provider: Option<&str>,
    ) {
        fill_blank(&mut self.owner, default_owner);
        fill_blank(&mut self.source, default_source);
        fill_blank(&mut self.provider, default_provider);
        if is_blank(&self.obituary_type) {
            self.obituary_type = DEFAULT_OBITUARY_TYPE.to_string();
        }
    }

    /// Reset every field to blank.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn fill_blank(target: &mut String, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        if is_blank(target) {
            *target = value.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(dob: &str, dod: &str) -> FormState {
        FormState {
            date_of_birth: dob.into(),
            date_of_death: dod.into(),
            ..Default::default()
        }
    }

    #[test]
    fn from_json_missing_keys_are_blank() {
        let form = FormState::from_json_str(r#"{"name_first": "Jane"}"#).unwrap();
        assert_eq!(form.name_first, "Jane");
        assert!(form.is_blank(FormField::NameLast));
    }

    #[test]
    fn from_json_rejects_non_object() {
        assert!(FormState::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn get_matches_field_keys() {
        let form = FormState::from_json_str(r#"{"owner_reference_id": "a7500"}"#).unwrap();
        assert_eq!(form.get(FormField::OwnerReferenceId), "a7500");
        assert_eq!(FormField::OwnerReferenceId.as_str(), "owner_reference_id");
    }

    #[test]
    fn refresh_age_sets_derived_value() {
        let mut form = dated("06151980", "06142020");
        form.refresh_age();
        assert_eq!(form.age, "39");
    }

    #[test]
    fn refresh_age_clears_when_underivable() {
        let mut form = dated("06151980", "");
        form.age = "41".into();
        form.refresh_age();
        assert_eq!(form.age, "");
    }

    #[test]
    fn fill_missing_age_keeps_user_value() {
        let mut form = dated("06151980", "06142020");
        form.age = "38".into();
        form.fill_missing_age();
        assert_eq!(form.age, "38");

        form.age = " ".into();
        form.fill_missing_age();
        assert_eq!(form.age, "39");
    }

    #[test]
    fn end_date_defaults_to_start() {
        let mut form = FormState {
            publish_start_date: "2024-01-01".into(),
            ..Default::default()
        };
        form.default_end_date_to_start();
        assert_eq!(form.publish_end_date, "2024-01-01");

        form.publish_end_date = "2024-02-01".into();
        form.default_end_date_to_start();
        assert_eq!(form.publish_end_date, "2024-02-01");
    }

    #[test]
    fn end_date_untouched_without_start() {
        let mut form = FormState::default();
        form.default_end_date_to_start();
        assert_eq!(form.publish_end_date, "");
    }

    #[test]
    fn apply_defaults_fills_only_blank_fields() {
        let mut form = FormState {
            owner: "tribune".into(),
            ..Default::default()
        };
        form.apply_defaults(Some("chicagotribune"), Some("ipublish"), Some(" "));
        assert_eq!(form.owner, "tribune");
        assert_eq!(form.source, "ipublish");
        assert_eq!(form.provider, "");
        assert_eq!(form.obituary_type, DEFAULT_OBITUARY_TYPE);
    }

    #[test]
    fn apply_defaults_keeps_chosen_obituary_type() {
        let mut form = FormState {
            obituary_type: "free".into(),
            ..Default::default()
        };
        form.apply_defaults(None, None, None);
        assert_eq!(form.obituary_type, "free");
    }

    #[test]
    fn clear_resets_everything() {
        let mut form = dated("06151980", "06142020");
        form.name_first = "Jane".into();
        form.clear();
        assert_eq!(form, FormState::default());
    }
}
