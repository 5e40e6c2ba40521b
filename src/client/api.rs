use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use futures::future::join_all;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    client::{
        gate::{Gate, GateError},
        session::{Session, SessionClaim},
        storage::{FileStore, StorageError},
    },
    config::Config,
    models::{
        domain::{Participation, Score, UserAnswer, UserRole},
        dto::{
            request::{
                CreateAnswersRequest, CreateParticipationRequest, CreateQuizRequest,
                CreateScoreRequest, LoginRequest, RegisterRequest, UpdateQuizRequest,
                UpdateUserRequest,
            },
            response::{LoginResponse, QuizDto, UserDto},
        },
    },
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(100);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base URL, starting with `/`.
    pub path: String,
    /// Query parameters, encoded by the transport.
    pub query: Vec<(String, String)>,
    /// Full `Authorization` header value, present only on protected calls.
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn error_message(&self) -> String {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", self.status))
    }
}

/// Sends one request to the API. Fails only for transport-level problems;
/// every HTTP status comes back as an [`ApiResponse`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::NetworkFailure(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.as_reqwest(), url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(authorization) = &request.authorization {
            builder = builder.header(reqwest::header::AUTHORIZATION, authorization);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let response = self.build(&request).send().await.map_err(|e| {
            log::warn!("{:?} {} failed: {}", request.method, request.path, e);
            ClientError::NetworkFailure(e.to_string())
        })?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ClientError::NetworkFailure(e.to_string()))?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Ok(ApiResponse { status, body })
    }
}

/// Outcome of one quiz's average-score lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum AverageScore {
    Value(f64),
    /// The quiz has no recorded scores yet.
    Unavailable,
    Error(String),
}

/// Typed client for the quiz API. Every protected call is routed through
/// the [`Gate`]; nothing is retried.
pub struct QuizApiClient {
    transport: Arc<dyn Transport>,
    gate: Gate,
}

impl QuizApiClient {
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self {
            transport,
            gate: Gate::new(session),
        }
    }

    /// Client over HTTP with the session kept in the configured file.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let transport = Arc::new(ReqwestTransport::new(&config.api_base_url)?);
        let session = Session::new(Arc::new(FileStore::new(config.session_file.clone())));
        Ok(Self::new(transport, session))
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<SessionClaim, ClientError> {
        let body = encode(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;

        let response = self
            .transport
            .send(ApiRequest {
                method: Method::Post,
                path: "/auth/login".to_string(),
                query: Vec::new(),
                authorization: None,
                body: Some(body),
            })
            .await?;

        if !response.is_success() {
            return Err(ClientError::Api {
                status: response.status,
                message: response.error_message(),
            });
        }

        let login: LoginResponse = decode(response.body)?;
        let claim = SessionClaim::from(login.data);
        self.gate.session().establish(&login.token, &claim)?;
        log::info!("Logged in as '{}'", claim.username);
        Ok(claim)
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.gate.session().logout()?;
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserDto, ClientError> {
        let data = self
            .send_public(Method::Post, "/auth/register".to_string(), Some(encode(request)?))
            .await?;
        decode(data)
    }

    pub async fn list_quizzes(&self) -> Result<Vec<QuizDto>, ClientError> {
        let data = self
            .send_public(Method::Get, "/public/all".to_string(), None)
            .await?;
        decode(data)
    }

    pub async fn average_score(&self, quiz_id: &str) -> Result<Option<f64>, ClientError> {
        let data = self
            .send_public(Method::Get, format!("/public/{}", quiz_id), None)
            .await?;
        decode(data)
    }

    /// Looks up every average concurrently. A failed lookup only marks its
    /// own entry.
    pub async fn average_scores(&self, quiz_ids: &[String]) -> HashMap<String, AverageScore> {
        let lookups = quiz_ids.iter().map(|id| async move {
            let outcome = match self.average_score(id).await {
                Ok(Some(value)) => AverageScore::Value(value),
                Ok(None) => AverageScore::Unavailable,
                Err(e) => {
                    log::warn!("Failed to fetch average score for quiz {}: {}", id, e);
                    AverageScore::Error(e.to_string())
                }
            };
            (id.clone(), outcome)
        });

        join_all(lookups).await.into_iter().collect()
    }

    pub async fn current_user(&self) -> Result<UserDto, ClientError> {
        self.gate.guard_request()?;
        let claim = self.gate.claim().ok_or(GateError::Unauthenticated)?;
        self.get_user(&claim.id).await
    }

    pub async fn get_user(&self, id: &str) -> Result<UserDto, ClientError> {
        let data = self
            .send_protected(Method::Get, format!("/users/{}", id), None)
            .await?;
        decode(data)
    }

    pub async fn list_users(&self) -> Result<Vec<UserDto>, ClientError> {
        let data = self
            .send_admin(Method::Get, "/users/all".to_string(), None)
            .await?;
        decode(data)
    }

    pub async fn update_user(
        &self,
        id: &str,
        request: &UpdateUserRequest,
    ) -> Result<UserDto, ClientError> {
        let data = self
            .send_protected(Method::Put, format!("/users/{}", id), Some(encode(request)?))
            .await?;
        decode(data)
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ClientError> {
        self.send_protected(Method::Delete, format!("/users/{}", id), None)
            .await?;
        Ok(())
    }

    pub async fn seed_basic_users(&self) -> Result<Vec<UserDto>, ClientError> {
        let data = self
            .send_admin(Method::Post, "/seedBasicUsers".to_string(), None)
            .await?;
        decode(data)
    }

    pub async fn get_quiz(&self, id: &str) -> Result<QuizDto, ClientError> {
        let data = self
            .send_protected(Method::Get, format!("/quizzes/{}", id), None)
            .await?;
        decode(data)
    }

    pub async fn create_quiz(&self, request: &CreateQuizRequest) -> Result<QuizDto, ClientError> {
        let data = self
            .send_admin(Method::Post, "/quizzes/create".to_string(), Some(encode(request)?))
            .await?;
        decode(data)
    }

    pub async fn update_quiz(
        &self,
        id: &str,
        request: &UpdateQuizRequest,
    ) -> Result<QuizDto, ClientError> {
        let data = self
            .send_admin(Method::Put, format!("/quizzes/{}", id), Some(encode(request)?))
            .await?;
        decode(data)
    }

    pub async fn delete_quiz(&self, id: &str) -> Result<(), ClientError> {
        self.send_admin(Method::Delete, format!("/quizzes/{}", id), None)
            .await?;
        Ok(())
    }

    pub async fn record_score(&self, quiz_id: &str, score: u32) -> Result<Score, ClientError> {
        let body = encode(&CreateScoreRequest {
            quiz_id: quiz_id.to_string(),
            score,
        })?;
        let data = self
            .send_protected(Method::Post, "/quizzes/scores".to_string(), Some(body))
            .await?;
        decode(data)
    }

    pub async fn record_participation(&self, quiz_id: &str) -> Result<Participation, ClientError> {
        let body = encode(&CreateParticipationRequest {
            quiz_id: quiz_id.to_string(),
        })?;
        let data = self
            .send_protected(Method::Post, "/quizzes/participation".to_string(), Some(body))
            .await?;
        decode(data)
    }

    pub async fn create_answers(
        &self,
        request: &CreateAnswersRequest,
    ) -> Result<Vec<UserAnswer>, ClientError> {
        let data = self
            .send_protected(
                Method::Post,
                "/quizzes/createAnswers".to_string(),
                Some(encode(request)?),
            )
            .await?;
        decode(data)
    }

    pub async fn user_answers(&self, quiz_id: Option<&str>) -> Result<Vec<UserAnswer>, ClientError> {
        let query = quiz_id
            .map(|id| vec![("quizId".to_string(), id.to_string())])
            .unwrap_or_default();
        let data = self
            .send_protected_with_query(
                Method::Get,
                "/quizzes/userAnswers".to_string(),
                query,
                None,
            )
            .await?;
        decode(data)
    }

    async fn send_public(
        &self,
        method: Method,
        path: String,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let response = self
            .transport
            .send(ApiRequest {
                method,
                path,
                query: Vec::new(),
                authorization: None,
                body,
            })
            .await?;
        into_data(response)
    }

    async fn send_protected(
        &self,
        method: Method,
        path: String,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.send_protected_with_query(method, path, Vec::new(), body)
            .await
    }

    async fn send_protected_with_query(
        &self,
        method: Method,
        path: String,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let authorization = self.gate.guard_request()?;

        let response = self
            .transport
            .send(ApiRequest {
                method,
                path,
                query,
                authorization: Some(authorization),
                body,
            })
            .await?;

        self.gate.check_response(response.status)?;
        into_data(response)
    }

    /// Protected call that is not attempted unless the cached claim is an admin.
    async fn send_admin(
        &self,
        method: Method,
        path: String,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.gate.guard_request()?;
        self.gate.authorize(UserRole::Admin)?;
        self.send_protected(method, path, body).await
    }
}

fn into_data(response: ApiResponse) -> Result<Value, ClientError> {
    if !response.is_success() {
        return Err(ClientError::Api {
            status: response.status,
            message: response.error_message(),
        });
    }

    match response.body {
        Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| ClientError::Decode("response has no data field".to_string())),
        other => Err(ClientError::Decode(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

fn encode<T: Serialize>(body: &T) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{session::TOKEN_KEY, storage::MemoryStore, storage::SessionStore};
    use mockall::predicate::always;
    use serde_json::json;

    fn session_with(claim: Option<SessionClaim>) -> (Arc<MemoryStore>, Session) {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone());
        if let Some(claim) = claim {
            session.establish("tok", &claim).unwrap();
        }
        (store, session)
    }

    fn admin() -> SessionClaim {
        SessionClaim::new("a-1", "admin", UserRole::Admin)
    }

    fn standard() -> SessionClaim {
        SessionClaim::new("u-1", "alice", UserRole::Standard)
    }

    fn user_json(id: &str, username: &str, role: &str) -> Value {
        json!({
            "id": id,
            "email": format!("{}@example.com", username),
            "username": username,
            "firstName": "Test",
            "lastName": "User",
            "role": role
        })
    }

    fn respond(status: u16, body: Value) -> Result<ApiResponse, ClientError> {
        Ok(ApiResponse { status, body })
    }

    #[tokio::test]
    async fn test_protected_call_without_credential_makes_no_request() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        let (_, session) = session_with(None);
        let client = QuizApiClient::new(Arc::new(transport), session);

        let result = client.get_quiz("q-1").await;

        assert!(matches!(
            result,
            Err(ClientError::Gate(GateError::Unauthenticated))
        ));
    }

    #[tokio::test]
    async fn test_admin_call_as_standard_user_makes_no_request() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        let (_, session) = session_with(Some(standard()));
        let client = QuizApiClient::new(Arc::new(transport), session);

        let result = client.list_users().await;

        assert!(matches!(
            result,
            Err(ClientError::Gate(GateError::Unauthorized))
        ));
        // A local denial is not a session failure.
        assert!(client.gate().is_authenticated());
    }

    #[tokio::test]
    async fn test_admin_list_users_sends_bearer() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.method == Method::Get
                    && req.path == "/users/all"
                    && req.authorization.as_deref() == Some("Bearer tok")
            })
            .times(1)
            .returning(|_| {
                respond(
                    200,
                    json!({ "data": [user_json("a-1", "admin", "ADMIN_USER"), user_json("u-1", "alice", "STANDARD_USER")] }),
                )
            });
        let (_, session) = session_with(Some(admin()));
        let client = QuizApiClient::new(Arc::new(transport), session);

        let users = client.list_users().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[1].role, UserRole::Standard);
    }

    #[tokio::test]
    async fn test_unauthorized_response_expires_session() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| respond(401, json!({ "error": "Unauthorized: Invalid or expired token" })));
        let (store, session) = session_with(Some(standard()));
        let client = QuizApiClient::new(Arc::new(transport), session);

        let result = client.get_quiz("q-1").await;

        assert!(matches!(
            result,
            Err(ClientError::Gate(GateError::SessionExpired))
        ));
        assert!(!client.gate().is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_session_expiry_stops_further_requests() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| respond(403, json!({ "error": "Forbidden" })));
        let (_, session) = session_with(Some(admin()));
        let client = QuizApiClient::new(Arc::new(transport), session);

        assert!(client.delete_quiz("q-1").await.is_err());
        let second = client.delete_quiz("q-1").await;

        assert!(matches!(
            second,
            Err(ClientError::Gate(GateError::Unauthenticated))
        ));
    }

    #[tokio::test]
    async fn test_server_error_keeps_session() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| respond(500, json!({ "error": "Internal server error" })));
        let (_, session) = session_with(Some(standard()));
        let client = QuizApiClient::new(Arc::new(transport), session);

        match client.get_quiz("q-1").await {
            Err(ClientError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal server error");
            }
            other => panic!("Expected Api error, got {:?}", other.map(|q| q.id)),
        }
        assert!(client.gate().is_authenticated());
    }

    #[tokio::test]
    async fn test_network_failure_is_reported_and_not_retried() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(ClientError::NetworkFailure("connection refused".to_string())));
        let (_, session) = session_with(Some(standard()));
        let client = QuizApiClient::new(Arc::new(transport), session);

        let result = client.record_participation("q-1").await;

        assert!(matches!(result, Err(ClientError::NetworkFailure(_))));
        assert!(client.gate().is_authenticated());
    }

    #[tokio::test]
    async fn test_success_without_data_is_not_empty_data() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| respond(200, json!({ "msg": "ok" })));
        let (_, session) = session_with(Some(standard()));
        let client = QuizApiClient::new(Arc::new(transport), session);

        let result = client.user_answers(None).await;

        assert!(matches!(result, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn test_user_answers_sends_quiz_id_as_single_query_param() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.path == "/quizzes/userAnswers"
                    && req.query
                        == vec![("quizId".to_string(), "q 1&quizId=other".to_string())]
            })
            .times(1)
            .returning(|_| respond(200, json!({ "data": [] })));
        let (_, session) = session_with(Some(standard()));
        let client = QuizApiClient::new(Arc::new(transport), session);

        let answers = client.user_answers(Some("q 1&quizId=other")).await.unwrap();

        assert!(answers.is_empty());
    }

    #[test]
    fn test_transport_percent_encodes_query_values() {
        let transport = ReqwestTransport::new("http://localhost:8080/api/v1/").unwrap();
        let request = ApiRequest {
            method: Method::Get,
            path: "/quizzes/userAnswers".to_string(),
            query: vec![("quizId".to_string(), "q 1&quizId=other".to_string())],
            authorization: Some("Bearer tok".to_string()),
            body: None,
        };

        let built = transport.build(&request).build().unwrap();
        let pairs: Vec<(String, String)> = built
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert_eq!(built.url().path(), "/api/v1/quizzes/userAnswers");
        assert_eq!(
            pairs,
            vec![("quizId".to_string(), "q 1&quizId=other".to_string())]
        );
    }

    #[tokio::test]
    async fn test_login_establishes_session() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.path == "/auth/login"
                    && req.authorization.is_none()
                    && req.body.as_ref().map(|b| b["username"] == "alice").unwrap_or(false)
            })
            .times(1)
            .returning(|_| {
                respond(
                    200,
                    json!({
                        "token": "fresh-token",
                        "data": user_json("u-1", "alice", "STANDARD_USER"),
                        "msg": "alice logged in successfully"
                    }),
                )
            });
        let (_, session) = session_with(None);
        let client = QuizApiClient::new(Arc::new(transport), session);

        let claim = client.login("alice", "password123").await.unwrap();

        assert_eq!(claim.role, UserRole::Standard);
        assert_eq!(client.gate().guard_request(), Ok("Bearer fresh-token".to_string()));
        assert!(!client.gate().session().had_auth_error().unwrap());
    }

    #[tokio::test]
    async fn test_failed_login_leaves_storage_untouched() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .with(always())
            .times(1)
            .returning(|_| respond(401, json!({ "error": "Unauthorized: Invalid username or password" })));
        let (store, session) = session_with(None);
        let client = QuizApiClient::new(Arc::new(transport), session);

        let result = client.login("alice", "wrong").await;

        assert!(matches!(result, Err(ClientError::Api { status: 401, .. })));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_public_calls_send_no_credential() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| req.path == "/public/q-1" && req.authorization.is_none())
            .times(1)
            .returning(|_| respond(200, json!({ "data": 3.5 })));
        let (_, session) = session_with(Some(admin()));
        let client = QuizApiClient::new(Arc::new(transport), session);

        assert_eq!(client.average_score("q-1").await.unwrap(), Some(3.5));
    }

    #[tokio::test]
    async fn test_average_scores_isolates_failures() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(3).returning(|req| match req.path.as_str() {
            "/public/q-1" => respond(200, json!({ "data": 4.25 })),
            "/public/q-2" => Err(ClientError::NetworkFailure("reset".to_string())),
            _ => respond(200, json!({ "data": null })),
        });
        let (_, session) = session_with(None);
        let client = QuizApiClient::new(Arc::new(transport), session);

        let ids = vec!["q-1".to_string(), "q-2".to_string(), "q-3".to_string()];
        let scores = client.average_scores(&ids).await;

        assert_eq!(scores["q-1"], AverageScore::Value(4.25));
        assert!(matches!(scores["q-2"], AverageScore::Error(_)));
        assert_eq!(scores["q-3"], AverageScore::Unavailable);
    }

    #[tokio::test]
    async fn test_logout_clears_without_network() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        let (store, session) = session_with(Some(admin()));
        let client = QuizApiClient::new(Arc::new(transport), session);

        client.logout().unwrap();

        assert!(store.is_empty());
        assert!(!client.gate().is_authenticated());
    }

    #[test]
    fn test_reqwest_transport_trims_base_url() {
        let transport = ReqwestTransport::new("http://localhost:8080/api/v1/").unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8080/api/v1");
    }
}
