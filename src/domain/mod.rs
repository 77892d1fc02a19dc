mod ambassador;
mod attachment;
mod registration;

pub use ambassador::{AmbassadorChanges, AmbassadorSubmission, NewAmbassadorApplication};
pub use attachment::{AttachmentSlot, Attachments, UploadedFile, select_attachment};
pub use registration::{NewUserRegistration, RegistrationChanges, RegistrationSubmission};

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Trims a submitted value and drops it when nothing is left.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accepts a JSON string, number or boolean as text. `null` counts as absent.
pub(crate) fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(de::Error::invalid_type(
            de::Unexpected::Other(value_kind(&other)),
            &"a string, number or boolean",
        )),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        _ => "scalar",
    }
}
