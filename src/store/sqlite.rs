use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use rusqlite::types::Value as SqlValue;

use super::{ProjectFilter, Store};
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            // Handle SQLite's default datetime format: "YYYY-MM-DD HH:MM:SS"
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            tracing::error!("Invalid datetime in database: '{}' - {}", s, e);
            Utc::now()
        })
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn opt_datetime(s: Option<String>) -> Option<DateTime<Utc>> {
    s.map(|s| parse_datetime(&s))
}

const PROJECT_COLUMNS: &str =
    "id, title, description, category, location, size, year, featured, status, created_at, updated_at";

fn row_to_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        location: row.get(4)?,
        size: row.get(5)?,
        year: row.get(6)?,
        featured: row.get(7)?,
        status: row.get(8)?,
        created_at: parse_datetime(&row.get::<_, String>(9)?),
        updated_at: parse_datetime(&row.get::<_, String>(10)?),
    })
}

const ASSET_COLUMNS: &str =
    "id, owner_ref, relative_path, original_name, alt_text, is_main, display_order, created_at";

fn row_to_asset(row: &rusqlite::Row<'_>) -> rusqlite::Result<MediaAsset> {
    Ok(MediaAsset {
        id: row.get(0)?,
        owner_ref: row.get(1)?,
        relative_path: row.get(2)?,
        original_name: row.get(3)?,
        alt_text: row.get(4)?,
        is_main: row.get(5)?,
        display_order: row.get(6)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?),
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Project operations

    fn create_project(&self, project: &Project) -> Result<()> {
        self.conn().execute(
            "INSERT INTO projects (id, title, description, category, location, size, year, featured, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                project.id,
                project.title,
                project.description,
                project.category,
                project.location,
                project.size,
                project.year,
                project.featured,
                project.status,
                format_datetime(&project.created_at),
                format_datetime(&project.updated_at),
            ],
        )?;
        Ok(())
    }

    fn get_project(&self, id: &str) -> Result<Option<Project>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
            params![id],
            row_to_project,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<ProjectSummary>> {
        let mut sql = String::from(
            "SELECT p.id, p.title, p.description, p.category, p.location, p.size, p.year,
                    p.featured, p.status, p.created_at, p.updated_at, m.relative_path
             FROM projects p
             LEFT JOIN media_assets m ON m.owner_ref = p.id AND m.is_main = 1
             WHERE 1=1",
        );
        let mut bindings: Vec<SqlValue> = Vec::new();

        if filter.active_only {
            sql.push_str(" AND p.status = 'active'");
        }
        if filter.featured_only {
            sql.push_str(" AND p.featured = 1");
        }
        if let Some(category) = &filter.category {
            sql.push_str(" AND p.category = ?");
            bindings.push(SqlValue::from(category.clone()));
        }
        sql.push_str(" ORDER BY p.created_at DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(" LIMIT ?");
            bindings.push(SqlValue::from(limit));
        }

        let conn = self.conn();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(bindings), |row| {
            Ok(ProjectSummary {
                project: row_to_project(row)?,
                main_image: row.get(11)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_project(&self, project: &Project) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE projects SET title = ?1, description = ?2, category = ?3, location = ?4,
                    size = ?5, year = ?6, featured = ?7, status = ?8, updated_at = ?9
             WHERE id = ?10",
            params![
                project.title,
                project.description,
                project.category,
                project.location,
                project.size,
                project.year,
                project.featured,
                project.status,
                format_datetime(&project.updated_at),
                project.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_project(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM projects WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Media asset operations

    fn insert_asset(&self, asset: &MediaAsset) -> Result<()> {
        self.conn().execute(
            "INSERT INTO media_assets (id, owner_ref, relative_path, original_name, alt_text, is_main, display_order, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                asset.id,
                asset.owner_ref,
                asset.relative_path,
                asset.original_name,
                asset.alt_text,
                asset.is_main,
                asset.display_order,
                format_datetime(&asset.created_at),
            ],
        )?;
        Ok(())
    }

    fn get_asset(&self, owner_ref: &str, id: &str) -> Result<Option<MediaAsset>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {ASSET_COLUMNS} FROM media_assets WHERE id = ?1 AND owner_ref = ?2"),
            params![id, owner_ref],
            row_to_asset,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_assets(&self, owner_ref: &str) -> Result<Vec<MediaAsset>> {
        let conn = self.conn();
        // Main-first for project galleries; display order for the hero
        // gallery, where is_main is never set.
        let mut stmt = conn.prepare(&format!(
            "SELECT {ASSET_COLUMNS} FROM media_assets WHERE owner_ref = ?1
             ORDER BY is_main DESC, display_order, created_at"
        ))?;

        let rows = stmt.query_map(params![owner_ref], row_to_asset)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn delete_asset(&self, owner_ref: &str, id: &str) -> Result<bool> {
        let rows = self.conn().execute(
            "DELETE FROM media_assets WHERE id = ?1 AND owner_ref = ?2",
            params![id, owner_ref],
        )?;
        Ok(rows > 0)
    }

    fn delete_assets_for_owner(&self, owner_ref: &str) -> Result<usize> {
        let rows = self.conn().execute(
            "DELETE FROM media_assets WHERE owner_ref = ?1",
            params![owner_ref],
        )?;
        Ok(rows)
    }

    fn count_main_assets(&self, owner_ref: &str) -> Result<i64> {
        let conn = self.conn();
        conn.query_row(
            "SELECT COUNT(*) FROM media_assets WHERE owner_ref = ?1 AND is_main = 1",
            params![owner_ref],
            |row| row.get(0),
        )
        .map_err(Error::from)
    }

    fn set_main_asset(&self, owner_ref: &str, id: &str) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute(
            "UPDATE media_assets SET is_main = 0 WHERE owner_ref = ?1",
            params![owner_ref],
        )?;

        let rows = tx.execute(
            "UPDATE media_assets SET is_main = 1 WHERE id = ?1 AND owner_ref = ?2",
            params![id, owner_ref],
        )?;

        if rows == 0 {
            // Dropping the uncommitted transaction rolls the clear back.
            return Err(Error::NotFound);
        }

        tx.commit()?;
        Ok(())
    }

    // Contact operations

    fn create_contact(&self, contact: &Contact) -> Result<()> {
        self.conn().execute(
            "INSERT INTO contacts (id, name, email, phone, company, message, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                contact.id,
                contact.name,
                contact.email,
                contact.phone,
                contact.company,
                contact.message,
                contact.status,
                format_datetime(&contact.created_at),
            ],
        )?;
        Ok(())
    }

    fn list_contacts(&self) -> Result<Vec<Contact>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, name, email, phone, company, message, status, created_at
             FROM contacts ORDER BY created_at DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Contact {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                company: row.get(4)?,
                message: row.get(5)?,
                status: row.get(6)?,
                created_at: parse_datetime(&row.get::<_, String>(7)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    // Employee operations

    fn create_employee(&self, employee: &Employee) -> Result<()> {
        self.conn().execute(
            "INSERT INTO employees (id, name, role, experience_years, specialty, bio, email, phone, avatar_url, display_order, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                employee.id,
                employee.name,
                employee.role,
                employee.experience_years,
                employee.specialty,
                employee.bio,
                employee.email,
                employee.phone,
                employee.avatar_url,
                employee.display_order,
                employee.is_active,
                format_datetime(&employee.created_at),
            ],
        )?;
        Ok(())
    }

    fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>> {
        let sql = if active_only {
            "SELECT id, name, role, experience_years, specialty, bio, email, phone, avatar_url, display_order, is_active, created_at
             FROM employees WHERE is_active = 1 ORDER BY display_order, name"
        } else {
            "SELECT id, name, role, experience_years, specialty, bio, email, phone, avatar_url, display_order, is_active, created_at
             FROM employees ORDER BY display_order, name"
        };

        let conn = self.conn();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(Employee {
                id: row.get(0)?,
                name: row.get(1)?,
                role: row.get(2)?,
                experience_years: row.get(3)?,
                specialty: row.get(4)?,
                bio: row.get(5)?,
                email: row.get(6)?,
                phone: row.get(7)?,
                avatar_url: row.get(8)?,
                display_order: row.get(9)?,
                is_active: row.get(10)?,
                created_at: parse_datetime(&row.get::<_, String>(11)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_employee(&self, employee: &Employee) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE employees SET name = ?1, role = ?2, experience_years = ?3, specialty = ?4,
                    bio = ?5, email = ?6, phone = ?7, avatar_url = ?8, display_order = ?9, is_active = ?10
             WHERE id = ?11",
            params![
                employee.name,
                employee.role,
                employee.experience_years,
                employee.specialty,
                employee.bio,
                employee.email,
                employee.phone,
                employee.avatar_url,
                employee.display_order,
                employee.is_active,
                employee.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_employee(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM employees WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Contact card operations

    fn create_contact_card(&self, card: &ContactCard) -> Result<()> {
        self.conn().execute(
            "INSERT INTO contact_cards (id, title, details, sub_details, contact_type, icon_emoji, display_order, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                card.id,
                card.title,
                card.details,
                card.sub_details,
                card.contact_type,
                card.icon_emoji,
                card.display_order,
                card.is_active,
                format_datetime(&card.created_at),
            ],
        )?;
        Ok(())
    }

    fn list_contact_cards(&self, active_only: bool) -> Result<Vec<ContactCard>> {
        let sql = if active_only {
            "SELECT id, title, details, sub_details, contact_type, icon_emoji, display_order, is_active, created_at
             FROM contact_cards WHERE is_active = 1 ORDER BY display_order, title"
        } else {
            "SELECT id, title, details, sub_details, contact_type, icon_emoji, display_order, is_active, created_at
             FROM contact_cards ORDER BY display_order, title"
        };

        let conn = self.conn();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(ContactCard {
                id: row.get(0)?,
                title: row.get(1)?,
                details: row.get(2)?,
                sub_details: row.get(3)?,
                contact_type: row.get(4)?,
                icon_emoji: row.get(5)?,
                display_order: row.get(6)?,
                is_active: row.get(7)?,
                created_at: parse_datetime(&row.get::<_, String>(8)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn update_contact_card(&self, card: &ContactCard) -> Result<()> {
        let rows = self.conn().execute(
            "UPDATE contact_cards SET title = ?1, details = ?2, sub_details = ?3, contact_type = ?4,
                    icon_emoji = ?5, display_order = ?6, is_active = ?7
             WHERE id = ?8",
            params![
                card.title,
                card.details,
                card.sub_details,
                card.contact_type,
                card.icon_emoji,
                card.display_order,
                card.is_active,
                card.id,
            ],
        )?;

        if rows == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    fn delete_contact_card(&self, id: &str) -> Result<bool> {
        let rows = self
            .conn()
            .execute("DELETE FROM contact_cards WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Settings operations

    fn get_setting(&self, key: &str) -> Result<Option<Setting>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT key, value, updated_at FROM settings WHERE key = ?1",
            params![key],
            |row| {
                Ok(Setting {
                    key: row.get(0)?,
                    value: row.get(1)?,
                    updated_at: parse_datetime(&row.get::<_, String>(2)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_settings_with_prefix(&self, prefix: &str) -> Result<Vec<Setting>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT key, value, updated_at FROM settings WHERE key LIKE ?1 || '%' ORDER BY key",
        )?;

        let rows = stmt.query_map(params![prefix], |row| {
            Ok(Setting {
                key: row.get(0)?,
                value: row.get(1)?,
                updated_at: parse_datetime(&row.get::<_, String>(2)?),
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn upsert_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, format_datetime(&Utc::now())],
        )?;
        Ok(())
    }

    fn insert_setting_if_absent(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR IGNORE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, format_datetime(&Utc::now())],
        )?;
        Ok(())
    }

    // Token operations

    fn create_token(&self, token: &Token) -> Result<()> {
        self.conn()
            .execute(
                "INSERT INTO tokens (id, token_hash, token_lookup, created_at, expires_at, last_used_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    token.id,
                    token.token_hash,
                    token.token_lookup,
                    format_datetime(&token.created_at),
                    token.expires_at.as_ref().map(format_datetime),
                    token.last_used_at.as_ref().map(format_datetime),
                ],
            )
            .map_err(|e| match &e {
                rusqlite::Error::SqliteFailure(_, Some(msg))
                    if msg.contains("idx_tokens_lookup") =>
                {
                    Error::TokenLookupCollision
                }
                _ => Error::Database(e),
            })?;
        Ok(())
    }

    fn get_token_by_lookup(&self, lookup: &str) -> Result<Option<Token>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, token_hash, token_lookup, created_at, expires_at, last_used_at
             FROM tokens WHERE token_lookup = ?1",
            params![lookup],
            |row| {
                Ok(Token {
                    id: row.get(0)?,
                    token_hash: row.get(1)?,
                    token_lookup: row.get(2)?,
                    created_at: parse_datetime(&row.get::<_, String>(3)?),
                    expires_at: opt_datetime(row.get(4)?),
                    last_used_at: opt_datetime(row.get(5)?),
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn update_token_last_used(&self, id: &str) -> Result<()> {
        self.conn().execute(
            "UPDATE tokens SET last_used_at = ?1 WHERE id = ?2",
            params![format_datetime(&Utc::now()), id],
        )?;
        Ok(())
    }

    fn has_admin_token(&self) -> Result<bool> {
        let conn = self.conn();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tokens", [], |row| row.get(0))?;
        Ok(count > 0)
    }
}
