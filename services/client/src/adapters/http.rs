//! services/client/src/adapters/http.rs
//!
//! This module contains the HTTP adapter for the remote course API. It
//! implements the `CourseGateway` port from the `core` crate using `reqwest`.

use async_trait::async_trait;
use coursify_core::domain::{
    Course, CourseDraft, CourseId, Credentials, Role, SessionToken, SignupForm,
};
use coursify_core::ports::{CourseGateway, PortError, PortResult};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the raw session token on gated calls.
pub const TOKEN_HEADER: &str = "token";

//=========================================================================================
// Wire Payloads
//=========================================================================================

#[derive(Deserialize)]
struct TokenPayload {
    token: String,
}

#[derive(Deserialize)]
struct CoursesPayload {
    courses: Vec<Course>,
}

#[derive(Deserialize)]
struct PurchasesPayload {
    #[serde(rename = "coursesData")]
    courses_data: Vec<Course>,
}

#[derive(Deserialize)]
struct CoursePayload {
    course: Course,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `CourseGateway` port over HTTP.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Creates a new `HttpGateway` rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Appends `segments` to the base URL. Each segment is percent-encoded,
    /// so an id can never step outside its resource path.
    pub fn url(&self, segments: &[&str]) -> PortResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| PortError::Unexpected(format!("bad API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| PortError::Unexpected("API base URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> PortResult<RequestBuilder> {
        Ok(self.client.request(method, self.url(segments)?))
    }

    fn gated(
        &self,
        method: Method,
        segments: &[&str],
        token: &SessionToken,
    ) -> PortResult<RequestBuilder> {
        Ok(self
            .request(method, segments)?
            .header(TOKEN_HEADER, token.as_str()))
    }

    /// The path of one admin-owned course. Dot segments would be dropped by
    /// URL normalisation, so they cannot name a course.
    fn course_segments<'a>(course_id: &'a CourseId) -> PortResult<[&'a str; 3]> {
        match course_id.as_str() {
            "" | "." | ".." => Err(PortError::NotFound(format!("course '{}'", course_id))),
            id => Ok(["admin", "course", id]),
        }
    }

    /// Sends the request, turning transport failures and non-2xx answers
    /// into port errors.
    async fn send(&self, request: RequestBuilder) -> PortResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), url = %response.url(), "request succeeded");
            return Ok(response);
        }

        // The body is best-effort: a missing or non-JSON body still fails
        // with the status alone.
        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);
        warn!(status = status.as_u16(), ?message, "request rejected");
        Err(PortError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> PortResult<T> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Malformed(e.to_string()))
    }
}

/// Pulls the `msg` field out of an error body, if it has one.
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("msg")
        .and_then(|msg| msg.as_str())
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

//=========================================================================================
// `CourseGateway` Trait Implementation
//=========================================================================================

#[async_trait]
impl CourseGateway for HttpGateway {
    async fn sign_in(&self, role: Role, credentials: &Credentials) -> PortResult<SessionToken> {
        let request = self.request(Method::POST, &[role.path_segment(), "signin"])?;
        let payload: TokenPayload = self.fetch(request.json(credentials)).await?;
        SessionToken::new(payload.token)
            .ok_or_else(|| PortError::Malformed("sign-in returned an empty token".to_string()))
    }

    async fn sign_up(&self, role: Role, form: &SignupForm) -> PortResult<()> {
        let request = self.request(Method::POST, &[role.path_segment(), "signup"])?;
        self.send(request.json(form)).await?;
        Ok(())
    }

    async fn preview_courses(&self) -> PortResult<Vec<Course>> {
        let payload: CoursesPayload = self
            .fetch(self.request(Method::GET, &["course", "preview"])?)
            .await?;
        Ok(payload.courses)
    }

    async fn purchase_course(&self, token: &SessionToken, course_id: &CourseId) -> PortResult<()> {
        let body = serde_json::json!({ "courseId": course_id });
        let request = self.gated(Method::POST, &["course", "purchase"], token)?;
        self.send(request.json(&body)).await?;
        Ok(())
    }

    async fn purchased_courses(&self, token: &SessionToken) -> PortResult<Vec<Course>> {
        let payload: PurchasesPayload = self
            .fetch(self.gated(Method::GET, &["user", "purchases"], token)?)
            .await?;
        Ok(payload.courses_data)
    }

    async fn create_course(&self, token: &SessionToken, draft: &CourseDraft) -> PortResult<()> {
        let request = self.gated(Method::POST, &["admin", "course"], token)?;
        self.send(request.json(draft)).await?;
        Ok(())
    }

    async fn admin_courses(&self, token: &SessionToken) -> PortResult<Vec<Course>> {
        let payload: CoursesPayload = self
            .fetch(self.gated(Method::GET, &["admin", "course", "bulk"], token)?)
            .await?;
        Ok(payload.courses)
    }

    async fn admin_course(
        &self,
        token: &SessionToken,
        course_id: &CourseId,
    ) -> PortResult<Course> {
        let segments = Self::course_segments(course_id)?;
        let payload: CoursePayload = self
            .fetch(self.gated(Method::GET, &segments, token)?)
            .await?;
        Ok(payload.course)
    }

    async fn update_course(
        &self,
        token: &SessionToken,
        course_id: &CourseId,
        draft: &CourseDraft,
    ) -> PortResult<()> {
        let segments = Self::course_segments(course_id)?;
        let request = self.gated(Method::PUT, &segments, token)?;
        self.send(request.json(draft)).await?;
        Ok(())
    }

    async fn delete_course(&self, token: &SessionToken, course_id: &CourseId) -> PortResult<()> {
        let segments = Self::course_segments(course_id)?;
        self.send(self.gated(Method::DELETE, &segments, token)?)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_comes_from_msg_field() {
        assert_eq!(
            extract_message(r#"{"msg":"Already purchased"}"#).as_deref(),
            Some("Already purchased")
        );
    }

    fn gateway(base: &str) -> HttpGateway {
        HttpGateway::new(base, None).unwrap()
    }

    #[test]
    fn urls_keep_the_base_path() {
        let url = gateway("https://api.example/api/v1/")
            .url(&["course", "preview"])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.example/api/v1/course/preview");
    }

    #[test]
    fn course_ids_are_encoded_as_one_segment() {
        let id = CourseId::new("../bulk?x=1");
        let segments = HttpGateway::course_segments(&id).unwrap();
        let url = gateway("http://localhost").url(&segments).unwrap();
        assert_eq!(url.path(), "/admin/course/..%2Fbulk%3Fx=1");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn dot_segments_are_not_course_ids() {
        for raw in ["", ".", ".."] {
            let id = CourseId::new(raw);
            assert!(matches!(
                HttpGateway::course_segments(&id),
                Err(PortError::NotFound(_))
            ));
        }
    }

    #[test]
    fn unusable_bodies_have_no_message() {
        assert_eq!(extract_message(""), None);
        assert_eq!(extract_message("<html>502</html>"), None);
        assert_eq!(extract_message(r#"{"error":"x"}"#), None);
        assert_eq!(extract_message(r#"{"msg":42}"#), None);
        assert_eq!(extract_message(r#"{"msg":""}"#), None);
    }
}
