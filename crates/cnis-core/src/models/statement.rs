//! CNIS statement data models and the JSON wire shape of extraction results.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tax-id placeholder used by CNIS when the employer is not identified.
pub const TAX_ID_INDETERMINATE: &str = "Indeterminado";

/// One employment relationship (vínculo empregatício) found in a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    /// Employer name as printed on the block's start line.
    #[serde(rename = "empregador")]
    pub employer: String,

    /// `NN.NNN.NNN/NNNN-NN`, the 8-digit root, `Indeterminado`, or empty.
    #[serde(rename = "cnpj")]
    pub tax_id: String,

    /// Start date (`DD/MM/YYYY`).
    #[serde(
        rename = "data_inicio",
        default,
        serialize_with = "serialize_empty_if_none",
        deserialize_with = "deserialize_none_if_empty"
    )]
    pub start_date: Option<String>,

    /// End date (`DD/MM/YYYY`); `None` means the relationship is ongoing.
    #[serde(
        rename = "data_fim",
        default,
        serialize_with = "serialize_empty_if_none",
        deserialize_with = "deserialize_none_if_empty"
    )]
    pub end_date: Option<String>,

    /// Last remuneration amount listed in the block.
    #[serde(rename = "salario", default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Decimal>,

    /// Period (`MM/YYYY`) of the last remuneration, when the statement prints it.
    #[serde(
        rename = "ultima_remuneracao",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_remuneration: Option<String>,
}

impl EmploymentRecord {
    /// Whether the relationship has no recorded end.
    pub fn is_ongoing(&self) -> bool {
        self.end_date.is_none()
    }
}

/// Identification data of the statement holder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalData {
    /// CPF (`NNN.NNN.NNN-NN`).
    #[serde(rename = "cpf", skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    /// Full name.
    #[serde(rename = "nome", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Birth date (`DD/MM/YYYY`).
    #[serde(rename = "data_nascimento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

impl PersonalData {
    /// True when no field could be extracted.
    pub fn is_empty(&self) -> bool {
        self.tax_id.is_none() && self.full_name.is_none() && self.birth_date.is_none()
    }
}

/// Outcome of processing one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Whether the document could be processed at all.
    pub success: bool,
    /// Holder identification.
    pub personal_data: PersonalData,
    /// Validated records in document order.
    pub employment_records: Vec<EmploymentRecord>,
    /// Failure message when `success` is false.
    pub error: Option<String>,
    /// Length of the processed text in characters.
    pub text_length: usize,
}

impl ExtractionResult {
    /// Successful result.
    pub fn succeeded(
        personal_data: PersonalData,
        employment_records: Vec<EmploymentRecord>,
        text_length: usize,
    ) -> Self {
        Self {
            success: true,
            personal_data,
            employment_records,
            error: None,
            text_length,
        }
    }

    /// Document-level failure; carries no partial output.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Convert into the JSON shape consumed by downstream services.
    pub fn to_output(&self) -> ExtractionOutput {
        if self.success {
            ExtractionOutput::Success {
                success: true,
                data: StatementData {
                    client_name: self.personal_data.full_name.clone().unwrap_or_default(),
                    client_cpf: self.personal_data.tax_id.clone().unwrap_or_default(),
                    employment_records: self.employment_records.clone(),
                },
                text_length: self.text_length,
            }
        } else {
            ExtractionOutput::Failure {
                success: false,
                error: self.error.clone().unwrap_or_default(),
            }
        }
    }
}

impl Serialize for ExtractionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_output().serialize(serializer)
    }
}

/// Wire representation of an [`ExtractionResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractionOutput {
    Success {
        success: bool,
        data: StatementData,
        text_length: usize,
    },
    Failure {
        success: bool,
        error: String,
    },
}

/// Payload of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementData {
    pub client_name: String,
    pub client_cpf: String,
    #[serde(rename = "vinculos_empregaticios")]
    pub employment_records: Vec<EmploymentRecord>,
}

fn serialize_empty_if_none<S: Serializer>(
    value: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_deref().unwrap_or(""))
}

fn deserialize_none_if_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
