use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Project;

fn default_true() -> bool {
    true
}

// Requests

#[derive(Debug, Deserialize)]
pub struct ProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmployeeRequest {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub experience_years: Option<i64>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct ContactCardRequest {
    pub title: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub sub_details: Option<String>,
    #[serde(default)]
    pub contact_type: Option<String>,
    #[serde(default)]
    pub icon_emoji: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDescriptionRequest {
    #[serde(default)]
    pub description: String,
}

/// Stat fields arrive in the admin panel's camelCase; blank or absent
/// values leave the stored stat untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatsRequest {
    #[serde(default)]
    pub years_experience: Option<Value>,
    #[serde(default)]
    pub projects_completed: Option<Value>,
    #[serde(default)]
    pub team_members: Option<Value>,
    #[serde(default)]
    pub client_satisfaction: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsParams {
    #[serde(default)]
    pub featured: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

// Responses

#[derive(Debug, Serialize)]
pub struct ProjectListItem {
    #[serde(flatten)]
    pub project: Project,
    pub main_image: Option<String>,
    /// Duplicate of main_image kept for the public site's card component.
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: String,
    pub url: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_main: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: Project,
    pub images: Vec<ImageResponse>,
    pub main_image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadedFileResponse {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub path: String,
    pub is_main: bool,
}

#[derive(Debug, Serialize)]
pub struct UploadBatchResponse {
    pub message: String,
    pub files: Vec<UploadedFileResponse>,
}

#[derive(Debug, Serialize)]
pub struct HeroImageResponse {
    pub id: String,
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeStatsResponse {
    pub years_experience: i64,
    pub projects_completed: i64,
    pub team_members: i64,
    pub client_satisfaction: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContentResponse {
    pub hero_images: Vec<HeroImageResponse>,
    pub company_description: String,
    pub stats: HomeStatsResponse,
}

#[derive(Debug, Serialize)]
pub struct PublicEmployeeResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub experience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    pub avatar: String,
    pub verified: bool,
}

#[derive(Debug, Serialize)]
pub struct PublicContactCardResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(rename = "subDetails", skip_serializing_if = "Option::is_none")]
    pub sub_details: Option<String>,
    pub emoji: String,
    pub gradient: String,
    pub verified: bool,
}
