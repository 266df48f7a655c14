use crate::errors::ApiError;
use crate::models::{ActivityDirectory, ApiErrorBody, ApiMessage};
use reqwest::{Client, Response, Url};
use tracing::debug;

/// Client for the activities API. One request per call, no retries and no timeout.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn list_activities(&self) -> Result<ActivityDirectory, ApiError> {
        let url = self.endpoint(&["activities"])?;
        debug!("GET {url}");
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn signup(&self, activity: &str, email: &str) -> Result<ApiMessage, ApiError> {
        let url = self.endpoint(&["activities", activity, "signup"])?;
        debug!("POST {url}");
        let response = self.http.post(url).form(&[("email", email)]).send().await?;
        expect_message(response).await
    }

    pub async fn unregister(&self, activity: &str, email: &str) -> Result<ApiMessage, ApiError> {
        let url = self.endpoint(&["activities", activity, "unregister"])?;
        debug!("DELETE {url}");
        let response = self
            .http
            .delete(url)
            .query(&[("email", email)])
            .send()
            .await?;
        expect_message(response).await
    }

    /// Any 2xx answer counts as a successful login; the body is ignored.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["login"])?;
        debug!("POST {url} as {username}");
        let response = self
            .http
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn expect_message(response: Response) -> Result<ApiMessage, ApiError> {
    if !response.status().is_success() {
        return Err(rejection(response).await);
    }
    Ok(response.json().await?)
}

async fn rejection(response: Response) -> ApiError {
    let status = response.status().as_u16();
    match response.bytes().await {
        Ok(bytes) => match serde_json::from_slice::<ApiErrorBody>(&bytes) {
            Ok(body) => ApiError::Rejected {
                status,
                detail: body.detail,
            },
            Err(_) => ApiError::Unexpected { status },
        },
        Err(err) => ApiError::Network(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap())
    }

    #[test]
    fn activity_names_are_percent_encoded() {
        let url = client("http://127.0.0.1:8000")
            .endpoint(&["activities", "Chess Club/Advanced?", "signup"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/activities/Chess%20Club%2FAdvanced%3F/signup"
        );
    }

    #[test]
    fn base_path_is_kept() {
        let url = client("http://api.local/school/").endpoint(&["login"]).unwrap();
        assert_eq!(url.as_str(), "http://api.local/school/login");
    }

    #[test]
    fn opaque_base_is_rejected() {
        let err = client("mailto:admin@example.com")
            .endpoint(&["activities"])
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    fn upstream_reply(status: u16, body: &'static str) -> Response {
        let reply = axum::http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        Response::from(reply)
    }

    #[tokio::test]
    async fn string_detail_is_rejected_verbatim() {
        let err = rejection(upstream_reply(400, r#"{"detail":"Student already signed up"}"#)).await;
        match err {
            ApiError::Rejected { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "Student already signed up");
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[tokio::test]
    async fn validation_list_detail_is_unusable() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required","type":"value_error.missing"}]}"#;
        let err = rejection(upstream_reply(422, body)).await;
        assert!(matches!(err, ApiError::Unexpected { status: 422 }));
    }

    #[tokio::test]
    async fn plain_text_body_is_unusable() {
        let err = rejection(upstream_reply(500, "Internal Server Error")).await;
        assert!(matches!(err, ApiError::Unexpected { status: 500 }));
    }
}
