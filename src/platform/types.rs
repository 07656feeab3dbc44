//! Secure value wrapper and wire types for the platform API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string wrapper that redacts its contents in Debug, Display, and
/// serialization, and zeroes its memory on drop.
///
/// Every token and secret value handled by this crate travels as a
/// `SecretString` so an accidental log line or serialized config never
/// contains the real value. Reading the value requires an explicit
/// [`SecretString::expose_secret`] call.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the underlying value. Never log or print the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Length of the secret without exposing it.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Never write the actual value into structured output.
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Real values are accepted on the way in (env, config, RPC payloads).
        let value = String::deserialize(deserializer)?;
        Ok(SecretString(value))
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Default for SecretString {
    fn default() -> Self {
        Self::new("")
    }
}

/// A site as reported by the platform's listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub account_slug: Option<String>,
}

/// An account (team) as reported by the platform's listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// The authenticated-user payload used for credential verification.
///
/// A successful response without an `id` means the credential did not
/// resolve to a user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// One stored value of an environment variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvVarValue {
    pub value: String,
}

/// An environment variable as returned by the platform. The remote store
/// may hold several values for one key.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvVar {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub values: Vec<EnvVarValue>,
}

/// The upsert request body for one environment variable.
#[derive(Debug, Clone, Serialize)]
pub struct EnvVarUpsert {
    pub key: String,
    pub values: Vec<EnvVarValue>,
}

impl EnvVarUpsert {
    /// Build an upsert carrying a single value for `key`.
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), values: vec![EnvVarValue { value: value.into() }] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_redacts_debug_and_display() {
        let secret = SecretString::new("gh-token-value");

        assert_eq!(format!("{:?}", secret), "SecretString([REDACTED])");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_secret_string_serialization_redacts() {
        let secret = SecretString::new("gh-token-value");
        let json = serde_json::to_string(&secret).unwrap();

        assert_eq!(json, "\"[REDACTED]\"");
        assert!(!json.contains("gh-token-value"));
    }

    #[test]
    fn test_secret_string_deserialization_accepts_values() {
        let secret: SecretString = serde_json::from_str("\"actual-secret\"").unwrap();
        assert_eq!(secret.expose_secret(), "actual-secret");
    }

    #[test]
    fn test_secret_string_redacted_inside_struct() {
        #[derive(Serialize)]
        struct Payload {
            name: String,
            token: SecretString,
        }

        let payload =
            Payload { name: "visible".to_string(), token: SecretString::new("hidden-token") };
        let json = serde_json::to_string(&payload).unwrap();

        assert!(json.contains("visible"));
        assert!(json.contains("[REDACTED]"));
        assert!(!json.contains("hidden-token"));
    }

    #[test]
    fn test_secret_string_equality_and_emptiness() {
        assert_eq!(SecretString::new("same"), SecretString::new("same"));
        assert_ne!(SecretString::new("a"), SecretString::new("b"));
        assert!(SecretString::default().is_empty());
        assert_eq!(SecretString::new("12345").len(), 5);
    }

    #[test]
    fn test_env_var_upsert_wire_shape() {
        let upsert = EnvVarUpsert::single("GITHUB_TOKEN", "gh1");
        let json = serde_json::to_value(&upsert).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "key": "GITHUB_TOKEN", "values": [{ "value": "gh1" }] })
        );
    }

    #[test]
    fn test_env_var_tolerates_missing_fields() {
        let env: EnvVar = serde_json::from_str("{}").unwrap();
        assert!(env.key.is_empty());
        assert!(env.values.is_empty());

        let env: EnvVar =
            serde_json::from_str(r#"{"key":"K","values":[{"value":"v1"},{"value":"v2"}]}"#)
                .unwrap();
        assert_eq!(env.values.len(), 2);
        assert_eq!(env.values[0].value, "v1");
    }

    #[test]
    fn test_user_without_id() {
        let user: User = serde_json::from_str("{}").unwrap();
        assert!(user.id.is_none());
    }
}
