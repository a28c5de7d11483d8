//! Transport-independent request model.

/// HTTP methods the API distinguishes. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Other,
}

impl Method {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub body: String,
}

impl ApiRequest {
    /// Split `url` into a path and a decoded query.
    #[must_use]
    pub fn new(method: Method, url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        Self {
            method,
            path: path.to_string(),
            query: parse_query(query),
            authorization: None,
            body: String::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_authorization(mut self, value: impl Into<String>) -> Self {
        self.authorization = Some(value.into());
        self
    }

    /// First value of a query parameter; blank values count as absent.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Token from `Authorization: Bearer <token>`.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        let value = self.authorization.as_deref()?.trim();
        let (scheme, token) = value.split_once(' ')?;
        let token = token.trim();
        (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
    }
}

/// Decode `a=1&b=x+y`. Undecodable values are kept verbatim.
#[must_use]
pub fn parse_query(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn query_is_split_and_decoded() {
        let request = ApiRequest::new(Method::Get, "/api/tasks?page=2&category=Dev%4Fps&q=a+b");
        assert_eq!(request.path, "/api/tasks");
        assert_eq!(request.query_param("page"), Some("2"));
        assert_eq!(request.query_param("category"), Some("DevOps"));
        assert_eq!(request.query_param("q"), Some("a b"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn blank_query_values_are_absent() {
        let request = ApiRequest::new(Method::Get, "/api/tasks?status=&page");
        assert_eq!(request.query_param("status"), None);
        assert_eq!(request.query_param("page"), None);
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let request = ApiRequest::new(Method::Get, "/").with_authorization("bearer abc123");
        assert_eq!(request.bearer_token(), Some("abc123"));

        let basic = ApiRequest::new(Method::Get, "/").with_authorization("Basic abc123");
        assert_eq!(basic.bearer_token(), None);

        let empty = ApiRequest::new(Method::Get, "/").with_authorization("Bearer   ");
        assert_eq!(empty.bearer_token(), None);
    }

    #[test]
    fn method_names_are_case_insensitive() {
        assert_eq!(Method::from_name("patch"), Method::Patch);
        assert_eq!(Method::from_name("OPTIONS"), Method::Other);
    }
}
