//! API request types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Protocol tag of an API request or executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolKind {
    Rest,
    Graphql,
    Soap,
}

impl ProtocolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Graphql => "graphql",
            Self::Soap => "soap",
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rest" => Ok(Self::Rest),
            "graphql" => Ok(Self::Graphql),
            "soap" => Ok(Self::Soap),
            other => Err(format!("unknown protocol: {}", other)),
        }
    }
}

/// Authentication scheme applied to an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthKind {
    #[default]
    None,
    Basic,
    Bearer,
    ApiKey,
    Oauth,
    Custom,
}

/// Authentication configuration for a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(rename = "type")]
    pub kind: AuthKind,
    #[serde(default)]
    pub credentials: HashMap<String, String>,
}

impl AuthConfig {
    pub fn bearer(token: impl Into<String>) -> Self {
        let mut credentials = HashMap::new();
        credentials.insert("token".to_string(), token.into());
        Self {
            kind: AuthKind::Bearer,
            credentials,
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        let mut credentials = HashMap::new();
        credentials.insert("username".to_string(), username.into());
        credentials.insert("password".to_string(), password.into());
        Self {
            kind: AuthKind::Basic,
            credentials,
        }
    }

    pub fn api_key(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut credentials = HashMap::new();
        credentials.insert("key".to_string(), key.into());
        credentials.insert("value".to_string(), value.into());
        Self {
            kind: AuthKind::ApiKey,
            credentials,
        }
    }

    /// Look up a non-empty credential.
    pub fn credential(&self, name: &str) -> Option<&str> {
        self.credentials
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// An API request as configured by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub protocol: ProtocolKind,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ApiRequest {
    /// Create a new request with no method, headers, body or auth.
    pub fn new(name: impl Into<String>, protocol: ProtocolKind, url: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            protocol,
            url: url.into(),
            method: None,
            headers: BTreeMap::new(),
            body: None,
            auth: None,
            variables: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_variables(mut self, variables: serde_json::Map<String, serde_json::Value>) -> Self {
        self.variables = Some(variables);
        self
    }

    /// The body when it is a JSON string.
    pub fn body_str(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| b.as_str())
    }

    /// Whether a non-null, non-empty body is present.
    pub fn has_body(&self) -> bool {
        match &self.body {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
