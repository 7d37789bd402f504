use serde::Serialize;
use validator::Validate;

use crate::domain::customer::{Customer, CustomerPayload};
use crate::domain::types::CustomerId;
use crate::forms::FormError;
use crate::forms::customer::{
    CustomerDraft, CustomerField, DOCUMENT_HELP, DOCUMENT_LENGTH_HELP, EMAIL_HELP, FieldErrors,
    NAME_HELP, PHONE_HELP, document_length_valid,
};

/// Whether the form creates a new record or edits an existing one.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Edit(CustomerId),
}

/// Lifecycle of the form dialog.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Closed,
    Open,
    Submitting,
}

/// Request produced by a successful submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(CustomerPayload),
    Update(CustomerId, CustomerPayload),
}

/// Helper texts rendered under each input.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct HelperTexts {
    pub name: Option<&'static str>,
    pub document: Option<&'static str>,
    pub phone: Option<&'static str>,
    pub email: Option<&'static str>,
}

/// Draft, error flags and status of the create/edit dialog.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FormState {
    pub status: FormStatus,
    pub mode: FormMode,
    pub draft: CustomerDraft,
    pub errors: FieldErrors,
    /// Live flag recomputed on every document edit.
    pub document_length_valid: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::closed()
    }
}

impl FormState {
    pub fn closed() -> Self {
        Self {
            status: FormStatus::Closed,
            mode: FormMode::Create,
            draft: CustomerDraft::default(),
            errors: FieldErrors::default(),
            document_length_valid: true,
        }
    }

    /// Opens the form, seeded from `existing` in edit mode or empty otherwise.
    ///
    /// A record without an identifier cannot be addressed by an update and
    /// opens in create mode.
    pub fn initialize(existing: Option<&Customer>) -> Self {
        let (mode, draft) = match existing {
            Some(customer) => (
                customer.id.map_or(FormMode::Create, FormMode::Edit),
                CustomerDraft::from(customer),
            ),
            None => (FormMode::Create, CustomerDraft::default()),
        };
        Self {
            status: FormStatus::Open,
            mode,
            draft,
            errors: FieldErrors::default(),
            document_length_valid: true,
        }
    }

    /// Sets a draft field. Only the document updates a live flag.
    pub fn update_field(&mut self, field: CustomerField, value: impl Into<String>) {
        let value = value.into();
        if field == CustomerField::Document {
            self.document_length_valid = document_length_valid(&value);
        }
        self.draft.set(field, value);
    }

    /// Recomputes every error flag. Returns `true` when all fields pass.
    pub fn validate(&mut self) -> bool {
        self.errors = match self.draft.validate() {
            Ok(()) => FieldErrors::default(),
            Err(errors) => FieldErrors::from_validation(&errors),
        };
        !self.errors.any()
    }

    /// Validates, normalizes and yields the request to send.
    ///
    /// On failure the form stays open and no request is produced.
    pub fn submit(&mut self) -> Result<SubmitRequest, FormError> {
        if let Err(errors) = self.draft.validate() {
            self.errors = FieldErrors::from_validation(&errors);
            return Err(FormError::Validation(errors));
        }
        self.errors = FieldErrors::default();
        let payload = self.draft.to_payload()?;
        self.status = FormStatus::Submitting;
        Ok(match self.mode {
            FormMode::Create => SubmitRequest::Create(payload),
            FormMode::Edit(id) => SubmitRequest::Update(id, payload),
        })
    }

    /// The backend accepted the request.
    pub fn submit_succeeded(&mut self) {
        self.status = FormStatus::Closed;
    }

    /// The backend rejected the request; the draft stays for another try.
    pub fn submit_failed(&mut self) {
        self.status = FormStatus::Open;
    }

    pub fn is_open(&self) -> bool {
        self.status != FormStatus::Closed
    }

    pub fn helper_texts(&self) -> HelperTexts {
        HelperTexts {
            name: self.errors.name.then_some(NAME_HELP),
            document: if self.errors.document {
                Some(DOCUMENT_HELP)
            } else {
                (!self.document_length_valid).then_some(DOCUMENT_LENGTH_HELP)
            },
            phone: self.errors.phone.then_some(PHONE_HELP),
            email: self.errors.email.then_some(EMAIL_HELP),
        }
    }
}
