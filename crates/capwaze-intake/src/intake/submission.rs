use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Field names that must be present before a submission is processed.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "company",
    "fundingAmount",
];

/// One funding application as posted by the contact form.
///
/// Every attribute is optional on the wire; [`ApplicationSubmission::validate`] enforces the
/// required subset. Keys the form sends that are not listed here are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationSubmission {
    #[serde(deserialize_with = "deserialize_text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub date_of_birth: Option<String>,

    #[serde(deserialize_with = "deserialize_text")]
    pub street: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub zip_code: Option<String>,

    #[serde(deserialize_with = "deserialize_text")]
    pub company: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub business_type: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub business_age: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub business_start_date: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub monthly_revenue: Option<String>,

    #[serde(deserialize_with = "deserialize_text")]
    pub business_street: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub business_city: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub business_state: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub business_zip: Option<String>,

    #[serde(deserialize_with = "deserialize_text")]
    pub funding_amount: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub use_of_funds: Option<String>,
    #[serde(deserialize_with = "deserialize_text")]
    pub timeframe: Option<String>,

    #[serde(deserialize_with = "deserialize_text")]
    pub additional_info: Option<String>,

    /// Reserved for form fields that have not been given a dedicated slot yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field1: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field2: Option<Value>,
}

impl ApplicationSubmission {
    /// Parse a raw request body. Anything that is not a JSON object yields an empty
    /// submission, which then fails validation like any other incomplete form.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Self>(body) {
            Ok(submission) => submission,
            Err(err) => {
                tracing::debug!(error = %err, "request body is not a submission object");
                Self::default()
            }
        }
    }

    /// Names of required fields that are absent or empty, in declaration order.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let values = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.company,
            &self.funding_amount,
        ];

        REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| !is_present(value.as_deref()))
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn validate(&self) -> Result<(), Vec<&'static str>> {
        let missing = self.missing_required_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    /// `"{first} {last}"`, skipping whichever half is absent.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Non-null and non-empty. Whitespace counts as a value.
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}

/// Form builders post numbers and booleans as often as strings; keep their text.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) | None => None,
    })
}
