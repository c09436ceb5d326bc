//! Declarative field table.
//!
//! Each [`FieldSpec`] row says whether a form field is required, how its
//! value is checked and which message to show when it fails. The builder
//! walks the rows once, in order, and stops at the first failure.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::age::{is_legacy_date, MAX_AGE};
use crate::form::{FormField, FormState};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_NAME_REQUIRED: &str = "First name and last name are required.";
pub const MSG_DOB_FORMAT: &str = "Date of birth must be in MMDDYYYY format";
pub const MSG_DOD_FORMAT: &str = "Date of death must be in MMDDYYYY format";
pub const MSG_TEXT_REQUIRED: &str = "Obituary text is required";
pub const MSG_START_REQUIRED: &str = "Publish start date is required";
pub const MSG_START_FORMAT: &str = "Publish start date must be in YYYY-MM-DD format";
pub const MSG_END_FORMAT: &str = "Publish end date must be in YYYY-MM-DD format";
pub const MSG_SOURCE_TYPE_REQUIRED: &str = "Source type is required";
pub const MSG_SOURCE_REQUIRED: &str = "Source is required";
pub const MSG_SOURCE_REF_REQUIRED: &str = "Source reference ID is required";
pub const MSG_PUBLISHER_GROUP_REQUIRED: &str =
    "Provider, provider reference ID, owner, and owner reference ID are required for publisher source type";

/// `source_type` value that pulls in the provider and owner group.
pub const PUBLISHER_SOURCE_TYPE: &str = "publisher";

/// `source` sent by the fixed publisher model.
pub const PUBLISHER_SOURCE: &str = "ipublish";

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Source model
// ---------------------------------------------------------------------------

/// Which shape of `source_info` the form collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceModel {
    /// `source_type` and `source` are fixed to `publisher` / `ipublish`;
    /// the user supplies the reference id and optionally the owner.
    #[default]
    Publisher,
    /// The user picks the source type. Choosing `publisher` makes the
    /// provider and owner fields mandatory as a group.
    Generic,
}

impl SourceModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publisher => "publisher",
            Self::Generic => "generic",
        }
    }

    /// Parse a model name. Returns `None` for unknown values.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "publisher" => Some(Self::Publisher),
            "generic" => Some(Self::Generic),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation error
// ---------------------------------------------------------------------------

/// First rule the form failed. Displays as the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: FormField,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Field specs
// ---------------------------------------------------------------------------

/// When a blank field is an error.
#[derive(Clone, Copy)]
pub enum Presence {
    Required,
    Optional,
    /// Required only when the predicate holds for the whole form.
    RequiredIf(fn(&FormState) -> bool),
}

/// How a non-blank value is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Any text.
    Text,
    /// `MMDDYYYY`; a mismatch fails validation.
    LegacyDate,
    /// `YYYY-MM-DD`; a mismatch fails validation.
    IsoDate,
    /// Integer in `0..=150`; anything else is quietly dropped.
    Age,
}

/// What a single row decided about its field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Include(String),
    Omit,
}

#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub field: FormField,
    pub presence: Presence,
    pub format: Format,
    /// Shown when a required field is blank.
    pub missing: &'static str,
    /// Shown when the value fails its format.
    pub invalid: &'static str,
}

impl FieldSpec {
    pub const fn required(field: FormField, missing: &'static str) -> Self {
        Self {
            field,
            presence: Presence::Required,
            format: Format::Text,
            missing,
            invalid: "",
        }
    }

    pub const fn optional(field: FormField) -> Self {
        Self {
            field,
            presence: Presence::Optional,
            format: Format::Text,
            missing: "",
            invalid: "",
        }
    }

    pub const fn required_if(
        field: FormField,
        predicate: fn(&FormState) -> bool,
        missing: &'static str,
    ) -> Self {
        Self {
            field,
            presence: Presence::RequiredIf(predicate),
            format: Format::Text,
            missing,
            invalid: "",
        }
    }

    pub const fn with_format(self, format: Format, invalid: &'static str) -> Self {
        Self {
            format,
            invalid,
            ..self
        }
    }

    fn is_required(&self, form: &FormState) -> bool {
        match self.presence {
            Presence::Required => true,
            Presence::Optional => false,
            Presence::RequiredIf(predicate) => predicate(form),
        }
    }

    /// Check this row against the form.
    pub fn evaluate(&self, form: &FormState) -> Result<Outcome, ValidationError> {
        let raw = form.get(self.field).trim();

        if raw.is_empty() {
            return if self.is_required(form) {
                Err(self.fail(self.missing))
            } else {
                Ok(Outcome::Omit)
            };
        }

        match self.format {
            Format::Text => Ok(Outcome::Include(raw.to_string())),
            Format::LegacyDate if is_legacy_date(raw) => Ok(Outcome::Include(raw.to_string())),
            Format::IsoDate if is_iso_date(raw) => Ok(Outcome::Include(raw.to_string())),
            Format::LegacyDate | Format::IsoDate => Err(self.fail(self.invalid)),
            Format::Age => Ok(parse_age(raw)
                .map(|age| Outcome::Include(age.to_string()))
                .unwrap_or(Outcome::Omit)),
        }
    }

    fn fail(&self, message: &str) -> ValidationError {
        ValidationError {
            field: self.field,
            message: message.to_string(),
        }
    }
}

/// Exactly `YYYY-MM-DD` and a real calendar date.
pub fn is_iso_date(raw: &str) -> bool {
    ISO_DATE_RE.is_match(raw) && NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT).is_ok()
}

/// Leading-integer parse: optional sign, then digits; trailing text is
/// ignored (`"42 years"` is 42). Out-of-range values yield `None`.
pub fn parse_age(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    if (0..=i64::from(MAX_AGE)).contains(&value) {
        u8::try_from(value).ok()
    } else {
        None
    }
}

fn is_publisher_source_type(form: &FormState) -> bool {
    form.source_type.trim() == PUBLISHER_SOURCE_TYPE
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Name, dates and age. Shared by both source models.
pub static PERSON_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(FormField::NameFirst, MSG_NAME_REQUIRED),
    FieldSpec::required(FormField::NameLast, MSG_NAME_REQUIRED),
    FieldSpec::optional(FormField::NamePrefix),
    FieldSpec::optional(FormField::NameMiddle),
    FieldSpec::optional(FormField::NameMaiden),
    FieldSpec::optional(FormField::NameNickname),
    FieldSpec::optional(FormField::NameSuffix),
    FieldSpec::optional(FormField::DateOfBirth).with_format(Format::LegacyDate, MSG_DOB_FORMAT),
    FieldSpec::optional(FormField::DateOfDeath).with_format(Format::LegacyDate, MSG_DOD_FORMAT),
    FieldSpec::optional(FormField::Age).with_format(Format::Age, ""),
];

/// Obituary body and publication window. Shared by both source models.
pub static OBITUARY_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(FormField::ObituaryText, MSG_TEXT_REQUIRED),
    FieldSpec::required(FormField::PublishStartDate, MSG_START_REQUIRED)
        .with_format(Format::IsoDate, MSG_START_FORMAT),
    FieldSpec::optional(FormField::PublishEndDate).with_format(Format::IsoDate, MSG_END_FORMAT),
    FieldSpec::optional(FormField::ObituaryType),
    FieldSpec::optional(FormField::EmailAddress),
];

pub static PUBLISHER_SOURCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(FormField::SourceReferenceId, MSG_SOURCE_REF_REQUIRED),
    FieldSpec::optional(FormField::Owner),
    FieldSpec::optional(FormField::OwnerReferenceId),
];

pub static GENERIC_SOURCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required(FormField::SourceType, MSG_SOURCE_TYPE_REQUIRED),
    FieldSpec::required(FormField::Source, MSG_SOURCE_REQUIRED),
    FieldSpec::required(FormField::SourceReferenceId, MSG_SOURCE_REF_REQUIRED),
    FieldSpec::optional(FormField::SourceUrl),
    FieldSpec::required_if(
        FormField::Provider,
        is_publisher_source_type,
        MSG_PUBLISHER_GROUP_REQUIRED,
    ),
    FieldSpec::required_if(
        FormField::ProviderReferenceId,
        is_publisher_source_type,
        MSG_PUBLISHER_GROUP_REQUIRED,
    ),
    FieldSpec::required_if(
        FormField::Owner,
        is_publisher_source_type,
        MSG_PUBLISHER_GROUP_REQUIRED,
    ),
    FieldSpec::required_if(
        FormField::OwnerReferenceId,
        is_publisher_source_type,
        MSG_PUBLISHER_GROUP_REQUIRED,
    ),
];

/// Every row for the given model, in validation order.
pub fn field_table(model: SourceModel) -> impl Iterator<Item = &'static FieldSpec> {
    let source = match model {
        SourceModel::Publisher => PUBLISHER_SOURCE_FIELDS,
        SourceModel::Generic => GENERIC_SOURCE_FIELDS,
    };
    PERSON_FIELDS
        .iter()
        .chain(OBITUARY_FIELDS.iter())
        .chain(source.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_age_accepts_range_bounds() {
        assert_eq!(parse_age("0"), Some(0));
        assert_eq!(parse_age("150"), Some(150));
        assert_eq!(parse_age(" 95 "), Some(95));
    }

    #[test]
    fn parse_age_is_lenient_about_trailing_text() {
        assert_eq!(parse_age("42 years"), Some(42));
        assert_eq!(parse_age("42.9"), Some(42));
        assert_eq!(parse_age("+7"), Some(7));
    }

    #[test]
    fn parse_age_rejects_out_of_range_and_garbage() {
        assert_eq!(parse_age("151"), None);
        assert_eq!(parse_age("-1"), None);
        assert_eq!(parse_age("abc"), None);
        assert_eq!(parse_age("-"), None);
        assert_eq!(parse_age("99999999999999999999"), None);
    }

    #[test]
    fn required_blank_fails_with_missing_message() {
        let spec = FieldSpec::required(FormField::ObituaryText, MSG_TEXT_REQUIRED);
        let form = FormState {
            obituary_text: "   ".into(),
            ..Default::default()
        };
        let err = spec.evaluate(&form).unwrap_err();
        assert_eq!(err.field, FormField::ObituaryText);
        assert_eq!(err.to_string(), MSG_TEXT_REQUIRED);
    }

    #[test]
    fn optional_blank_is_omitted() {
        let spec = FieldSpec::optional(FormField::NameMiddle);
        assert_eq!(spec.evaluate(&FormState::default()), Ok(Outcome::Omit));
    }

    #[test]
    fn text_values_are_trimmed() {
        let spec = FieldSpec::optional(FormField::NameMiddle);
        let form = FormState {
            name_middle: "  Q ".into(),
            ..Default::default()
        };
        assert_eq!(spec.evaluate(&form), Ok(Outcome::Include("Q".into())));
    }

    #[test]
    fn iso_date_format_is_enforced() {
        let spec = FieldSpec::optional(FormField::PublishEndDate)
            .with_format(Format::IsoDate, MSG_END_FORMAT);
        let bad = FormState {
            publish_end_date: "01/02/2024".into(),
            ..Default::default()
        };
        assert_eq!(spec.evaluate(&bad).unwrap_err().message, MSG_END_FORMAT);

        let good = FormState {
            publish_end_date: "2024-01-02".into(),
            ..Default::default()
        };
        assert_eq!(
            spec.evaluate(&good),
            Ok(Outcome::Include("2024-01-02".into()))
        );
    }

    #[test]
    fn iso_date_requires_padded_unsigned_fields() {
        let spec = FieldSpec::optional(FormField::PublishEndDate)
            .with_format(Format::IsoDate, MSG_END_FORMAT);
        for raw in ["2024-1-5", "2024-01-5", "2024-1-05", "+2024-01-05", "02024-01-05", "2024-02-30"] {
            let form = FormState {
                publish_end_date: raw.into(),
                ..Default::default()
            };
            assert_eq!(
                spec.evaluate(&form).unwrap_err().message,
                MSG_END_FORMAT,
                "{raw} should be rejected"
            );
        }
        assert!(is_iso_date("2024-02-29"));
        assert!(!is_iso_date("2023-02-29"));
    }

    #[test]
    fn invalid_age_is_dropped_not_rejected() {
        let spec = FieldSpec::optional(FormField::Age).with_format(Format::Age, "");
        let form = FormState {
            age: "200".into(),
            ..Default::default()
        };
        assert_eq!(spec.evaluate(&form), Ok(Outcome::Omit));
    }

    #[test]
    fn required_if_depends_on_source_type() {
        let spec = FieldSpec::required_if(
            FormField::Provider,
            is_publisher_source_type,
            MSG_PUBLISHER_GROUP_REQUIRED,
        );
        let adn = FormState {
            source_type: "adn".into(),
            ..Default::default()
        };
        assert_eq!(spec.evaluate(&adn), Ok(Outcome::Omit));

        let publisher = FormState {
            source_type: "publisher".into(),
            ..Default::default()
        };
        assert_eq!(
            spec.evaluate(&publisher).unwrap_err().message,
            MSG_PUBLISHER_GROUP_REQUIRED
        );
    }

    #[test]
    fn tables_share_person_and_obituary_rows() {
        let publisher: Vec<_> = field_table(SourceModel::Publisher).map(|s| s.field).collect();
        let generic: Vec<_> = field_table(SourceModel::Generic).map(|s| s.field).collect();
        let shared = PERSON_FIELDS.len() + OBITUARY_FIELDS.len();
        assert_eq!(publisher[..shared], generic[..shared]);
        assert_eq!(publisher[0], FormField::NameFirst);
        assert!(!publisher.contains(&FormField::Provider));
        assert!(generic.contains(&FormField::Provider));
    }

    #[test]
    fn source_model_names() {
        assert_eq!(SourceModel::from_name("Generic"), Some(SourceModel::Generic));
        assert_eq!(SourceModel::from_name("publisher"), Some(SourceModel::Publisher));
        assert_eq!(SourceModel::from_name("adn"), None);
        assert_eq!(SourceModel::default().as_str(), "publisher");
    }
}
