//! Request authentication headers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use ripapi_protocols::api::{ApiRequest, AuthConfig, AuthKind};

/// Headers produced by an auth config. Incomplete credentials produce none.
pub fn auth_headers(auth: &AuthConfig) -> Vec<(String, String)> {
    match auth.kind {
        AuthKind::Basic => match auth.credential("username") {
            Some(username) => {
                let password = auth.credential("password").unwrap_or_default();
                let encoded = STANDARD.encode(format!("{}:{}", username, password));
                vec![("Authorization".to_string(), format!("Basic {}", encoded))]
            }
            None => Vec::new(),
        },
        AuthKind::Bearer => auth
            .credential("token")
            .map(|token| vec![("Authorization".to_string(), format!("Bearer {}", token))])
            .unwrap_or_default(),
        AuthKind::ApiKey => match (auth.credential("key"), auth.credential("value")) {
            (Some(key), Some(value)) => vec![(key.to_string(), value.to_string())],
            _ => Vec::new(),
        },
        // oauth and custom flows are resolved before the request reaches us
        AuthKind::None | AuthKind::Oauth | AuthKind::Custom => Vec::new(),
    }
}

/// Request headers followed by auth headers the request does not already set.
pub(crate) fn request_headers(request: &ApiRequest) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if let Some(auth) = &request.auth {
        for (name, value) in auth_headers(auth) {
            if request.header(&name).is_none() {
                headers.push((name, value));
            }
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripapi_protocols::api::ProtocolKind;
    use std::collections::HashMap;

    #[test]
    fn test_basic_auth() {
        let headers = auth_headers(&AuthConfig::basic("user", "pass"));
        assert_eq!(
            headers,
            vec![("Authorization".to_string(), "Basic dXNlcjpwYXNz".to_string())]
        );
    }

    #[test]
    fn test_basic_auth_without_username() {
        let headers = auth_headers(&AuthConfig::basic("", "pass"));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_bearer_auth() {
        let headers = auth_headers(&AuthConfig::bearer("abc"));
        assert_eq!(headers[0].1, "Bearer abc");
    }

    #[test]
    fn test_api_key_auth() {
        let headers = auth_headers(&AuthConfig::api_key("X-Api-Key", "k1"));
        assert_eq!(headers, vec![("X-Api-Key".to_string(), "k1".to_string())]);
    }

    #[test]
    fn test_unhandled_kinds() {
        for kind in [AuthKind::None, AuthKind::Oauth, AuthKind::Custom] {
            let auth = AuthConfig {
                kind,
                credentials: HashMap::from([("token".to_string(), "t".to_string())]),
            };
            assert!(auth_headers(&auth).is_empty());
        }
    }

    #[test]
    fn test_explicit_header_wins() {
        let request = ApiRequest::new("r", ProtocolKind::Rest, "http://localhost")
            .with_header("authorization", "Custom xyz")
            .with_auth(AuthConfig::bearer("abc"));
        let headers = request_headers(&request);
        assert_eq!(headers, vec![("authorization".to_string(), "Custom xyz".to_string())]);
    }
}
