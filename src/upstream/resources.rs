//! Typed calls for the backend resources the admin pages and the public
//! site use. Each one is a single [`UpstreamClient::forward`] call.

use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use super::client::{bearer, UpstreamClient, UpstreamError};
use crate::models::{
    map_list, Administrator, AdministratorUpdate, ContactSubmission, Credentials, LoginGrant,
    NewAdministrator, Project, ProjectInput, SubmissionStatus,
};

pub const ADMINISTRATORS: &str = "adm";
pub const SUBMISSIONS: &str = "users";
pub const PROJECTS: &str = "projects";

fn to_body<T: Serialize>(value: &T) -> Result<Value, UpstreamError> {
    serde_json::to_value(value).map_err(|e| UpstreamError::InvalidBody(e.to_string()))
}

impl UpstreamClient {
    async fn call(
        &self,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Option<Value>, UpstreamError> {
        let authorization = token.map(bearer);
        self.forward(method, segments, authorization.as_deref(), body)
            .await?
            .into_result()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, UpstreamError> {
        let body = to_body(credentials)?;
        let reply = self
            .call(Method::POST, &[ADMINISTRATORS, "login"], None, Some(&body))
            .await?
            .ok_or_else(|| UpstreamError::InvalidBody("empty login response".to_string()))?;
        serde_json::from_value(reply).map_err(|e| UpstreamError::InvalidBody(e.to_string()))
    }

    pub async fn list_submissions(
        &self,
        token: &str,
    ) -> Result<Vec<ContactSubmission>, UpstreamError> {
        let body = self
            .call(Method::GET, &[SUBMISSIONS], Some(token), None)
            .await?;
        Ok(map_list(body, ContactSubmission::from_value))
    }

    pub async fn mark_submission_answered(
        &self,
        token: &str,
        id: &str,
    ) -> Result<(), UpstreamError> {
        let body = json!({ "status": SubmissionStatus::Answered.as_str() });
        self.call(
            Method::PATCH,
            &[SUBMISSIONS, id, "status"],
            Some(token),
            Some(&body),
        )
        .await?;
        Ok(())
    }

    pub async fn delete_submission(&self, token: &str, id: &str) -> Result<(), UpstreamError> {
        self.call(Method::DELETE, &[SUBMISSIONS, id], Some(token), None)
            .await?;
        Ok(())
    }

    pub async fn list_projects(&self, token: Option<&str>) -> Result<Vec<Project>, UpstreamError> {
        let body = self.call(Method::GET, &[PROJECTS], token, None).await?;
        Ok(map_list(body, Project::from_value))
    }

    /// Returns the created project when the backend echoes it back.
    pub async fn create_project(
        &self,
        token: &str,
        input: &ProjectInput,
    ) -> Result<Option<Project>, UpstreamError> {
        let body = to_body(input)?;
        let created = self
            .call(Method::POST, &[PROJECTS], Some(token), Some(&body))
            .await?;
        Ok(created.as_ref().and_then(Project::from_value))
    }

    pub async fn update_project(
        &self,
        token: &str,
        id: &str,
        input: &ProjectInput,
    ) -> Result<(), UpstreamError> {
        let body = to_body(input)?;
        self.call(Method::PUT, &[PROJECTS, id], Some(token), Some(&body))
            .await?;
        Ok(())
    }

    pub async fn delete_project(&self, token: &str, id: &str) -> Result<(), UpstreamError> {
        self.call(Method::DELETE, &[PROJECTS, id], Some(token), None)
            .await?;
        Ok(())
    }

    pub async fn list_administrators(
        &self,
        token: &str,
    ) -> Result<Vec<Administrator>, UpstreamError> {
        let body = self
            .call(Method::GET, &[ADMINISTRATORS], Some(token), None)
            .await?;
        Ok(map_list(body, Administrator::from_value))
    }

    pub async fn create_administrator(
        &self,
        token: &str,
        input: &NewAdministrator,
    ) -> Result<(), UpstreamError> {
        let body = to_body(input)?;
        self.call(Method::POST, &[ADMINISTRATORS], Some(token), Some(&body))
            .await?;
        Ok(())
    }

    pub async fn update_administrator(
        &self,
        token: &str,
        id: &str,
        update: &AdministratorUpdate,
    ) -> Result<(), UpstreamError> {
        let body = to_body(update)?;
        self.call(Method::PUT, &[ADMINISTRATORS, id], Some(token), Some(&body))
            .await?;
        Ok(())
    }

    pub async fn delete_administrator(&self, token: &str, id: &str) -> Result<(), UpstreamError> {
        self.call(Method::DELETE, &[ADMINISTRATORS, id], Some(token), None)
            .await?;
        Ok(())
    }
}
