//! Typed HTTP bindings for the auth endpoints

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use mygroup_shared::{AccessTokenPayload, ApiResponse, AuthPayload};

use crate::error::ClientError;

/// Body of every login request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Route parameters a login flavour may need.
#[derive(Debug, Clone, Default)]
pub struct LoginParams {
    pub group_name: Option<String>,
    pub sub_group: Option<String>,
    pub company_name: Option<String>,
}

impl LoginParams {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            group_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn company(name: impl Into<String>) -> Self {
        Self {
            company_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_sub_group(mut self, sub_group: impl Into<String>) -> Self {
        self.sub_group = Some(sub_group.into());
        self
    }
}

/// Resolved login endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginTarget {
    Admin,
    GroupAdmin { group_name: String },
    Company { company_name: String },
    Client { group_name: String },
    God { group_name: String, sub_group: String },
    Partner,
    Reporter,
}

impl LoginTarget {
    /// Resolves a login tag and its parameters. Fails before any request
    /// is made when a required parameter is missing or blank.
    pub fn from_tag(tag: &str, params: &LoginParams) -> Result<Self, ClientError> {
        let group = || present(&params.group_name).ok_or(ClientError::MissingParameter("Group name is required"));

        let target = match tag {
            "admin" => LoginTarget::Admin,
            "group-admin" => LoginTarget::GroupAdmin { group_name: group()? },
            "client" => LoginTarget::Client { group_name: group()? },
            "company" => LoginTarget::Company {
                company_name: present(&params.company_name)
                    .ok_or(ClientError::MissingParameter("Company name is required"))?,
            },
            "god" => match (present(&params.group_name), present(&params.sub_group)) {
                (Some(group_name), Some(sub_group)) => LoginTarget::God { group_name, sub_group },
                _ => return Err(ClientError::MissingParameter("Group name and sub-group are required")),
            },
            "partner" => LoginTarget::Partner,
            "reporter" => LoginTarget::Reporter,
            other => return Err(ClientError::InvalidLoginType(other.to_string())),
        };
        Ok(target)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            LoginTarget::Admin => "admin",
            LoginTarget::GroupAdmin { .. } => "group-admin",
            LoginTarget::Company { .. } => "company",
            LoginTarget::Client { .. } => "client",
            LoginTarget::God { .. } => "god",
            LoginTarget::Partner => "partner",
            LoginTarget::Reporter => "reporter",
        }
    }

    /// Path segments below the API prefix.
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = vec!["auth", self.tag(), "login"];
        match self {
            LoginTarget::GroupAdmin { group_name } | LoginTarget::Client { group_name } => {
                segments.push(group_name);
            }
            LoginTarget::Company { company_name } => segments.push(company_name),
            LoginTarget::God { group_name, sub_group } => {
                segments.push(group_name);
                segments.push(sub_group);
            }
            LoginTarget::Admin | LoginTarget::Partner | LoginTarget::Reporter => {}
        }
        segments
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

/// Thin client over the auth API. `base_url` includes the API prefix,
/// e.g. `http://localhost:5000/api`.
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: Client,
    base: Url,
}

impl AuthApi {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn login(&self, target: &LoginTarget, request: &LoginRequest) -> Result<AuthPayload, ClientError> {
        let url = self.endpoint(&target.segments())?;
        debug!(login_type = target.tag(), %url, "Sending login request");
        let response = self.http.post(url).json(request).send().await?;
        data(response).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ClientError> {
        let url = self.endpoint(&["auth", "register"])?;
        let response = self.http.post(url).json(request).send().await?;
        data(response).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessTokenPayload, ClientError> {
        let url = self.endpoint(&["auth", "refresh"])?;
        let response = self.http.post(url).json(&RefreshBody { refresh_token }).send().await?;
        data(response).await
    }

    pub async fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["auth", "logout"])?;
        let response = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .json(&RefreshBody { refresh_token })
            .send()
            .await?;
        envelope::<serde_json::Value>(response).await.map(|_| ())
    }
}

/// Decodes the envelope, turning error bodies and non-2xx statuses into
/// [`ClientError::Api`].
async fn envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    match serde_json::from_slice::<ApiResponse<T>>(&bytes) {
        Ok(body) if body.success && status.is_success() => Ok(body),
        Ok(body) => Err(ClientError::Api {
            status: status.as_u16(),
            code: body.code,
            message: body
                .message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string()),
        }),
        Err(_) if !status.is_success() => Err(ClientError::Api {
            status: status.as_u16(),
            code: None,
            message: status.canonical_reason().unwrap_or("Request failed").to_string(),
        }),
        Err(e) => Err(ClientError::Decode(e.to_string())),
    }
}

async fn data<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    envelope(response).await?.data.ok_or(ClientError::MissingData)
}
