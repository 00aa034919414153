pub const SCHEMA: &str = r#"
-- Site projects shown on the public portfolio
CREATE TABLE IF NOT EXISTS projects (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    category TEXT,
    location TEXT,
    size TEXT,
    year TEXT,
    featured INTEGER DEFAULT 0,
    status TEXT DEFAULT 'active',
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Uploaded files, keyed by the owning collection (a project id, or the
-- hero gallery). No FK on owner_ref: the hero gallery has no owner row,
-- and project cleanup must remove files in the same logical operation
-- as the rows.
CREATE TABLE IF NOT EXISTS media_assets (
    id TEXT PRIMARY KEY,
    owner_ref TEXT NOT NULL,
    relative_path TEXT NOT NULL,
    original_name TEXT,
    alt_text TEXT,
    is_main INTEGER NOT NULL DEFAULT 0,
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Contact form submissions
CREATE TABLE IF NOT EXISTS contacts (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    company TEXT,
    message TEXT,
    status TEXT DEFAULT 'new',
    created_at TEXT DEFAULT (datetime('now'))
);

-- Team members shown on the public site
CREATE TABLE IF NOT EXISTS employees (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    role TEXT,
    experience_years INTEGER,
    specialty TEXT,
    bio TEXT,
    email TEXT,
    phone TEXT,
    avatar_url TEXT,
    display_order INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Contact cards shown on the public contact page
CREATE TABLE IF NOT EXISTS contact_cards (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    details TEXT,
    sub_details TEXT,
    contact_type TEXT,
    icon_emoji TEXT,
    display_order INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT DEFAULT (datetime('now'))
);

-- Flat key/value site settings; namespaces are key prefixes
-- (company_, footer_, dashboard_), one row per key
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Admin credentials
CREATE TABLE IF NOT EXISTS tokens (
    id TEXT PRIMARY KEY,
    token_hash TEXT NOT NULL,          -- argon2id hash with embedded salt
    token_lookup TEXT NOT NULL,        -- first 8 chars of the raw token id for fast lookup
    created_at TEXT DEFAULT (datetime('now')),
    expires_at TEXT,            -- NULL = never
    last_used_at TEXT
);

-- Create indexes
CREATE INDEX IF NOT EXISTS idx_media_assets_owner ON media_assets(owner_ref);
CREATE INDEX IF NOT EXISTS idx_media_assets_owner_main ON media_assets(owner_ref, is_main);
CREATE INDEX IF NOT EXISTS idx_projects_status ON projects(status);
CREATE INDEX IF NOT EXISTS idx_contacts_created ON contacts(created_at);
CREATE UNIQUE INDEX IF NOT EXISTS idx_tokens_lookup ON tokens(token_lookup);
"#;
