use crate::server::error::ApiError;
use crate::server::request::Method;

/// Every endpoint the API serves, split by whether a session is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Auth(AuthRoute),
    Tasks(TaskRoute),
}

/// Endpoints reachable without a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRoute {
    Register,
    Login,
    Logout,
}

/// Owner-scoped endpoints; the caller must be authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRoute {
    List,
    Create,
    Stats,
    Get(i64),
    Toggle(i64),
    Complete(i64),
}

/// Resolve a method and path. Unknown paths are 404; known paths with an
/// unsupported method are 405 carrying the allowed methods.
///
/// # Errors
///
/// `ApiError::NotFound`, `ApiError::MethodNotAllowed`, or
/// `ApiError::BadRequest` for a non-numeric task id.
pub fn route(method: Method, path: &str) -> Result<Route, ApiError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        ["api", "tasks"] => match method {
            Method::Get => Ok(Route::Tasks(TaskRoute::List)),
            Method::Post => Ok(Route::Tasks(TaskRoute::Create)),
            _ => Err(ApiError::MethodNotAllowed { allow: "GET, POST" }),
        },
        ["api", "tasks", "stats"] => {
            ensure(method, &[Method::Get], "GET")?;
            Ok(Route::Tasks(TaskRoute::Stats))
        }
        ["api", "tasks", id] => {
            ensure(method, &[Method::Get], "GET")?;
            Ok(Route::Tasks(TaskRoute::Get(parse_id(id)?)))
        }
        ["api", "tasks", id, "toggle"] => {
            ensure(
                method,
                &[Method::Post, Method::Put, Method::Patch],
                "POST, PUT, PATCH",
            )?;
            Ok(Route::Tasks(TaskRoute::Toggle(parse_id(id)?)))
        }
        ["api", "tasks", id, "complete"] => {
            ensure(method, &[Method::Post], "POST")?;
            Ok(Route::Tasks(TaskRoute::Complete(parse_id(id)?)))
        }
        ["api", "auth", "register"] => {
            ensure(method, &[Method::Post], "POST")?;
            Ok(Route::Auth(AuthRoute::Register))
        }
        ["api", "auth", "login"] => {
            ensure(method, &[Method::Post], "POST")?;
            Ok(Route::Auth(AuthRoute::Login))
        }
        ["api", "auth", "logout"] => {
            ensure(method, &[Method::Post], "POST")?;
            Ok(Route::Auth(AuthRoute::Logout))
        }
        _ => Err(ApiError::NotFound("Not Found".into())),
    }
}

fn ensure(method: Method, allowed: &[Method], allow: &'static str) -> Result<(), ApiError> {
    if allowed.contains(&method) {
        Ok(())
    } else {
        Err(ApiError::MethodNotAllowed { allow })
    }
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid task id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Method::Get, "/api/tasks", Route::Tasks(TaskRoute::List))]
    #[case(Method::Post, "/api/tasks/", Route::Tasks(TaskRoute::Create))]
    #[case(Method::Get, "/api/tasks/stats", Route::Tasks(TaskRoute::Stats))]
    #[case(Method::Get, "/api/tasks/12", Route::Tasks(TaskRoute::Get(12)))]
    #[case(Method::Post, "/api/tasks/7/toggle", Route::Tasks(TaskRoute::Toggle(7)))]
    #[case(Method::Put, "/api/tasks/7/toggle", Route::Tasks(TaskRoute::Toggle(7)))]
    #[case(Method::Patch, "/api/tasks/7/toggle", Route::Tasks(TaskRoute::Toggle(7)))]
    #[case(Method::Post, "/api/tasks/7/complete", Route::Tasks(TaskRoute::Complete(7)))]
    #[case(Method::Post, "/api/auth/register", Route::Auth(AuthRoute::Register))]
    #[case(Method::Post, "/api/auth/login", Route::Auth(AuthRoute::Login))]
    #[case(Method::Post, "/api/auth/logout", Route::Auth(AuthRoute::Logout))]
    fn known_routes(#[case] method: Method, #[case] path: &str, #[case] expected: Route) {
        assert_eq!(route(method, path).unwrap(), expected);
    }

    #[rstest]
    #[case(Method::Delete, "/api/tasks", "GET, POST")]
    #[case(Method::Get, "/api/tasks/7/toggle", "POST, PUT, PATCH")]
    #[case(Method::Put, "/api/tasks/7/complete", "POST")]
    #[case(Method::Get, "/api/auth/login", "POST")]
    fn wrong_method_lists_allowed(#[case] method: Method, #[case] path: &str, #[case] allow: &str) {
        match route(method, path) {
            Err(ApiError::MethodNotAllowed { allow: got }) => assert_eq!(got, allow),
            other => panic!("expected 405, got {other:?}"),
        }
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert!(matches!(
            route(Method::Get, "/api/projects"),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            route(Method::Get, "/api/tasks/1/archive"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn non_numeric_id_is_bad_request() {
        assert!(matches!(
            route(Method::Post, "/api/tasks/abc/toggle"),
            Err(ApiError::BadRequest(_))
        ));
    }
}
