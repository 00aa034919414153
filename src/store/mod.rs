mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Filters applied when listing projects for the public site.
#[derive(Debug, Default, Clone)]
pub struct ProjectFilter {
    pub featured_only: bool,
    pub category: Option<String>,
    pub limit: Option<i64>,
    /// When true, only rows with status 'active' are returned.
    pub active_only: bool,
}

/// Store defines the database interface.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Project operations
    fn create_project(&self, project: &Project) -> Result<()>;
    fn get_project(&self, id: &str) -> Result<Option<Project>>;
    fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectSummary>>;
    fn update_project(&self, project: &Project) -> Result<()>;
    fn delete_project(&self, id: &str) -> Result<bool>;

    // Media asset operations (project galleries and the hero gallery)
    fn insert_asset(&self, asset: &MediaAsset) -> Result<()>;
    fn get_asset(&self, owner_ref: &str, id: &str) -> Result<Option<MediaAsset>>;
    fn list_assets(&self, owner_ref: &str) -> Result<Vec<MediaAsset>>;
    fn delete_asset(&self, owner_ref: &str, id: &str) -> Result<bool>;
    fn delete_assets_for_owner(&self, owner_ref: &str) -> Result<usize>;
    fn count_main_assets(&self, owner_ref: &str) -> Result<i64>;
    /// Clears every main flag for the owner and sets it on `id`, as one
    /// transaction. Rolls back and returns NotFound when `id` does not
    /// belong to `owner_ref`.
    fn set_main_asset(&self, owner_ref: &str, id: &str) -> Result<()>;

    // Contact operations
    fn create_contact(&self, contact: &Contact) -> Result<()>;
    fn list_contacts(&self) -> Result<Vec<Contact>>;

    // Employee operations
    fn create_employee(&self, employee: &Employee) -> Result<()>;
    fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>>;
    fn update_employee(&self, employee: &Employee) -> Result<()>;
    fn delete_employee(&self, id: &str) -> Result<bool>;

    // Contact card operations
    fn create_contact_card(&self, card: &ContactCard) -> Result<()>;
    fn list_contact_cards(&self, active_only: bool) -> Result<Vec<ContactCard>>;
    fn update_contact_card(&self, card: &ContactCard) -> Result<()>;
    fn delete_contact_card(&self, id: &str) -> Result<bool>;

    // Settings operations
    fn get_setting(&self, key: &str) -> Result<Option<Setting>>;
    fn list_settings_with_prefix(&self, prefix: &str) -> Result<Vec<Setting>>;
    fn upsert_setting(&self, key: &str, value: &str) -> Result<()>;
    /// Inserts the key only when absent; used for seeding defaults.
    fn insert_setting_if_absent(&self, key: &str, value: &str) -> Result<()>;

    // Token operations
    fn create_token(&self, token: &Token) -> Result<()>;
    fn get_token_by_lookup(&self, lookup: &str) -> Result<Option<Token>>;
    fn update_token_last_used(&self, id: &str) -> Result<()>;
    fn has_admin_token(&self) -> Result<bool>;
}
