use std::collections::BTreeMap;

use chrono::Utc;

use super::fields::{
    field_table, Outcome, SourceModel, ValidationError, PUBLISHER_SOURCE, PUBLISHER_SOURCE_TYPE,
};
use super::model::{Obituary, ObituaryPayload, Person, PersonName, SourceInfo};
use crate::form::{FormField, FormState, DEFAULT_OBITUARY_TYPE};
use crate::types::{version_stamp, Timestamp};

/// Knobs that change how a form turns into a payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuilderOptions {
    pub source_model: SourceModel,
}

/// Validate `form` and assemble a payload stamped with the current time.
pub fn build_payload(
    form: &FormState,
    options: BuilderOptions,
) -> Result<ObituaryPayload, ValidationError> {
    build_payload_at(form, options, Utc::now())
}

/// Same as [`build_payload`] with an explicit submission time.
pub fn build_payload_at(
    form: &FormState,
    options: BuilderOptions,
    now: Timestamp,
) -> Result<ObituaryPayload, ValidationError> {
    let mut values = Collected::default();

    for spec in field_table(options.source_model) {
        match spec.evaluate(form) {
            Ok(Outcome::Include(value)) => values.insert(spec.field, value),
            Ok(Outcome::Omit) => {}
            Err(e) => {
                tracing::debug!(field = %e.field, message = %e.message, "Payload validation failed");
                return Err(e);
            }
        }
    }

    Ok(assemble(values, options.source_model, now))
}

/// Values that passed validation, keyed by field.
#[derive(Default)]
struct Collected(BTreeMap<FormField, String>);

impl Collected {
    fn insert(&mut self, field: FormField, value: String) {
        self.0.insert(field, value);
    }

    fn take(&mut self, field: FormField) -> Option<String> {
        self.0.remove(&field)
    }

    /// Value of a field the table marks as required. Validation has
    /// already guaranteed its presence.
    fn take_required(&mut self, field: FormField) -> String {
        self.take(field).unwrap_or_default()
    }
}

fn assemble(mut v: Collected, model: SourceModel, now: Timestamp) -> ObituaryPayload {
    let name = PersonName {
        prefix: v.take(FormField::NamePrefix),
        first: v.take_required(FormField::NameFirst),
        middle: v.take(FormField::NameMiddle),
        last: v.take_required(FormField::NameLast),
        maiden: v.take(FormField::NameMaiden),
        nickname: v.take(FormField::NameNickname),
        suffix: v.take(FormField::NameSuffix),
    };

    let person = Person {
        name,
        date_of_birth: v.take(FormField::DateOfBirth),
        date_of_death: v.take(FormField::DateOfDeath),
        age: v.take(FormField::Age).and_then(|age| age.parse().ok()),
    };

    let obituary = Obituary {
        obituary_text: v.take_required(FormField::ObituaryText),
        publish_start_date: v.take_required(FormField::PublishStartDate),
        publish_end_date: v.take(FormField::PublishEndDate),
        obituary_type: v
            .take(FormField::ObituaryType)
            .unwrap_or_else(|| DEFAULT_OBITUARY_TYPE.to_string()),
        email_address: v.take(FormField::EmailAddress),
    };

    let (source_type, source) = match model {
        SourceModel::Publisher => (
            PUBLISHER_SOURCE_TYPE.to_string(),
            PUBLISHER_SOURCE.to_string(),
        ),
        SourceModel::Generic => (
            v.take_required(FormField::SourceType),
            v.take_required(FormField::Source),
        ),
    };

    let source_info = SourceInfo {
        source_type,
        source,
        source_reference_id: v.take_required(FormField::SourceReferenceId),
        source_url: v.take(FormField::SourceUrl),
        provider: v.take(FormField::Provider),
        provider_reference_id: v.take(FormField::ProviderReferenceId),
        owner: v.take(FormField::Owner),
        owner_reference_id: v.take(FormField::OwnerReferenceId),
    };

    ObituaryPayload {
        person,
        obituary,
        source_info,
        version: version_stamp(now),
    }
}
