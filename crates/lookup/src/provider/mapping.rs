//! Declarative field correspondence between provider JSON and
//! [`NormalizedAddress`].

use serde_json::{Map, Value};

use crate::errors::LookupError;
use crate::models::{NormalizedAddress, PostalCode};

/// Which provider JSON key feeds each normalized field.
///
/// `None` leaves the normalized field empty. Values are read from the top
/// level of the response object only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldMapping {
    pub postal_code: Option<&'static str>,
    pub region_code: Option<&'static str>,
    pub city: Option<&'static str>,
    pub district: Option<&'static str>,
    pub street: Option<&'static str>,

    /// Key whose truthy value means "code unknown" despite a 2xx status.
    pub error_flag: Option<&'static str>,
}

impl FieldMapping {
    /// Decode a response body into a normalized address.
    pub fn decode(
        &self,
        provider: &str,
        code: &PostalCode,
        body: &[u8],
    ) -> Result<NormalizedAddress, LookupError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| LookupError::Decode {
            provider: provider.to_string(),
            message: e.to_string(),
        })?;

        let object = value.as_object().ok_or_else(|| LookupError::Decode {
            provider: provider.to_string(),
            message: format!("expected a JSON object, got {}", json_type(&value)),
        })?;

        if self.error_flag.is_some_and(|flag| is_truthy(object.get(flag))) {
            return Err(LookupError::NotFound {
                provider: provider.to_string(),
                code: code.to_string(),
            });
        }

        Ok(NormalizedAddress {
            postal_code: field(object, self.postal_code),
            region_code: field(object, self.region_code),
            city: field(object, self.city),
            district: field(object, self.district),
            street: field(object, self.street),
        })
    }
}

fn field(object: &Map<String, Value>, key: Option<&'static str>) -> String {
    match key.and_then(|k| object.get(k)) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
