use crate::error::{AdapterError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Information about the current activation, as supplied by the platform.
///
/// Built once per invocation and never changed afterwards. Fields the
/// platform leaves out are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvocationContext {
    activation_id: String,
    api_host: String,
    api_key: String,
    function_name: String,
    function_version: String,
    namespace: String,
    request_id: String,
}

impl InvocationContext {
    /// Parse the context argument. It must be a JSON object whose known
    /// fields are strings; unknown fields are dropped.
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(AdapterError::InvalidContext)?;
        if !value.is_object() {
            return Err(AdapterError::InvalidContext(serde::de::Error::custom(
                "context must be a JSON object",
            )));
        }
        serde_json::from_value(value).map_err(AdapterError::InvalidContext)
    }

    pub fn activation_id(&self) -> &str {
        &self.activation_id
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn function_version(&self) -> &str {
        &self.function_version
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Look a field up by its wire name. Names outside the fixed set give `None`.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "activation_id" => &self.activation_id,
            "api_host" => &self.api_host,
            "api_key" => &self.api_key,
            "function_name" => &self.function_name,
            "function_version" => &self.function_version,
            "namespace" => &self.namespace,
            "request_id" => &self.request_id,
            _ => return None,
        };
        Some(value)
    }
}
