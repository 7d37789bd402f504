use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::customer::{Customer, CustomerPayload};
use crate::domain::types::{
    CustomerEmail, CustomerId, CustomerName, DOCUMENT_LENGTHS, Document, Phone, digits_only,
    is_valid_document, is_valid_email, is_valid_name, is_valid_phone,
};
use crate::forms::FormError;

pub const NAME_HELP: &str = "Nome deve conter apenas letras";
pub const DOCUMENT_HELP: &str = "Documento deve ser CPF (11 dígitos) ou CNPJ (14 dígitos)";
pub const DOCUMENT_LENGTH_HELP: &str = "Documento deve ter 11 ou 14 dígitos";
pub const PHONE_HELP: &str = "Telefone deve ter 10 ou 11 números";
pub const EMAIL_HELP: &str = "E-mail inválido";

fn check(valid: bool, code: &'static str) -> Result<(), ValidationError> {
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(code))
    }
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    check(is_valid_name(value), "name")
}

fn validate_document(value: &str) -> Result<(), ValidationError> {
    check(is_valid_document(value), "document")
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    check(is_valid_phone(value), "phone")
}

fn validate_email(value: &str) -> Result<(), ValidationError> {
    check(is_valid_email(value), "email")
}

/// Editable customer field.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CustomerField {
    Name,
    Document,
    Phone,
    Email,
}

impl FromStr for CustomerField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "document" => Ok(Self::Document),
            "phone" => Ok(Self::Phone),
            "email" => Ok(Self::Email),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

/// In-progress record held by the form before it is submitted.
///
/// Values are kept exactly as typed (masks included); normalization happens
/// only when the payload is built.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Validate)]
pub struct CustomerDraft {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_document"))]
    pub document: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
}

impl From<&Customer> for CustomerDraft {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            document: customer.document.clone(),
            phone: customer.phone.clone(),
            email: customer.email.clone(),
        }
    }
}

impl CustomerDraft {
    pub fn set(&mut self, field: CustomerField, value: String) {
        match field {
            CustomerField::Name => self.name = value,
            CustomerField::Document => self.document = value,
            CustomerField::Phone => self.phone = value,
            CustomerField::Email => self.email = value,
        }
    }

    /// Builds the digits-only request body. Fails with the same errors as
    /// [`Validate::validate`].
    pub fn to_payload(&self) -> Result<CustomerPayload, FormError> {
        self.validate()?;

        let mut errors = ValidationErrors::new();
        let name = CustomerName::new(self.name.as_str());
        let document = Document::new(self.document.as_str());
        let phone = Phone::new(self.phone.as_str());
        let email = CustomerEmail::new(self.email.as_str());

        match (name, document, phone, email) {
            (Ok(name), Ok(document), Ok(phone), Ok(email)) => {
                Ok(CustomerPayload::new(name, document, phone, email))
            }
            _ => {
                errors.add("draft", ValidationError::new("normalization"));
                Err(FormError::Validation(errors))
            }
        }
    }
}

/// Per-field error flags recomputed by every validation.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: bool,
    pub document: bool,
    pub phone: bool,
    pub email: bool,
}

impl FieldErrors {
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let fields = errors.field_errors();
        Self {
            name: fields.contains_key("name"),
            document: fields.contains_key("document"),
            phone: fields.contains_key("phone"),
            email: fields.contains_key("email"),
        }
    }

    pub fn any(&self) -> bool {
        self.name || self.document || self.phone || self.email
    }
}

/// Live helper state for a single field, served to the form while typing.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FieldHint {
    pub valid: bool,
    pub message: Option<&'static str>,
}

/// Whether the document currently has an accepted number of digits.
pub fn document_length_valid(document: &str) -> bool {
    DOCUMENT_LENGTHS.contains(&digits_only(document).len())
}

/// Computes the helper text shown next to `field` for `value`.
pub fn field_hint(field: CustomerField, value: &str) -> FieldHint {
    let (valid, message) = match field {
        CustomerField::Name => (is_valid_name(value), NAME_HELP),
        CustomerField::Document => (document_length_valid(value), DOCUMENT_LENGTH_HELP),
        CustomerField::Phone => (is_valid_phone(value), PHONE_HELP),
        CustomerField::Email => (is_valid_email(value), EMAIL_HELP),
    };
    FieldHint {
        valid,
        message: (!valid).then_some(message),
    }
}

#[derive(Deserialize)]
/// Form data posted by the create/edit dialog.
pub struct SaveCustomerForm {
    /// Present only when editing an existing record.
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    /// Listing query string to return to after saving.
    #[serde(default)]
    pub back: String,
}

impl SaveCustomerForm {
    /// Splits the posted form into the record identifier and the draft.
    pub fn into_parts(self) -> Result<(Option<CustomerId>, CustomerDraft), FormError> {
        let id = self
            .id
            .map(CustomerId::new)
            .transpose()
            .map_err(|_| FormError::InvalidCustomerId)?;
        let draft = CustomerDraft {
            name: self.name,
            document: self.document,
            phone: self.phone,
            email: self.email,
        };
        Ok((id, draft))
    }
}
