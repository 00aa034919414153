//! Namespaced site settings over a flat key/value table.
//!
//! Every value is stored as a string; namespaces are key prefixes. Each
//! namespace owns its decode rules, so callers read typed JSON values and
//! write arbitrary JSON payloads without knowing the storage encoding.

mod defaults;

pub use defaults::{
    company_info_defaults, company_settings_defaults, dashboard_defaults, footer_defaults,
    seed_content,
};

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsNamespace {
    Company,
    Footer,
    Dashboard,
}

impl SettingsNamespace {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            SettingsNamespace::Company => "company_",
            SettingsNamespace::Footer => "footer_",
            SettingsNamespace::Dashboard => "dashboard_",
        }
    }

    /// Decodes a stored string for a key in this namespace. Footer
    /// certification flags are stored as "true"/"false"; everything else is
    /// tried as JSON and kept as the raw string when that fails.
    #[must_use]
    pub fn decode(self, key: &str, raw: &str) -> Value {
        if self == SettingsNamespace::Footer && key.contains("certification") {
            return Value::Bool(raw == "true");
        }

        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
    }
}

/// Encodes a JSON value into its stored string form: structured values as
/// JSON text, booleans as "true"/"false", strings raw, other scalars
/// stringified.
#[must_use]
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => value.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
    }
}

/// Overlays `defaults` onto `values`: stored values always win.
pub fn overlay_defaults(values: &mut Map<String, Value>, defaults: Map<String, Value>) {
    for (key, default_value) in defaults {
        values.entry(key).or_insert(default_value);
    }
}

#[derive(Clone)]
pub struct Settings {
    store: Arc<dyn Store>,
}

impl Settings {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Reads every key in the namespace, prefix stripped, values decoded.
    pub fn namespace_values(&self, ns: SettingsNamespace) -> Result<Map<String, Value>> {
        let rows = self.store.list_settings_with_prefix(ns.prefix())?;

        let mut values = Map::new();
        for row in rows {
            let key = row
                .key
                .strip_prefix(ns.prefix())
                .unwrap_or(&row.key)
                .to_string();
            let decoded = ns.decode(&key, &row.value);
            values.insert(key, decoded);
        }

        Ok(values)
    }

    /// `namespace_values` with defaults filled in for absent keys.
    pub fn with_defaults(
        &self,
        ns: SettingsNamespace,
        defaults: Map<String, Value>,
    ) -> Result<Map<String, Value>> {
        let mut values = self.namespace_values(ns)?;
        overlay_defaults(&mut values, defaults);
        Ok(values)
    }

    /// Upserts every entry of `values`. Keys that already carry a recognized
    /// namespace prefix (footer_, dashboard_) are stored unmodified; all
    /// others get the caller's default prefix.
    pub fn set_many(&self, default_ns: SettingsNamespace, values: &Map<String, Value>) -> Result<()> {
        if values.is_empty() {
            return Err(Error::InvalidArgument("no settings provided".to_string()));
        }

        for (key, value) in values {
            let storage_key = if key.starts_with(SettingsNamespace::Footer.prefix())
                || key.starts_with(SettingsNamespace::Dashboard.prefix())
            {
                key.clone()
            } else {
                format!("{}{}", default_ns.prefix(), key)
            };

            self.store
                .upsert_setting(&storage_key, &encode_value(value))?;
        }

        Ok(())
    }

    /// Seeds the initial home-page content, skipping keys that already exist.
    pub fn seed(&self) -> Result<()> {
        for (key, value) in seed_content() {
            self.store.insert_setting_if_absent(key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_settings() -> (TempDir, Settings) {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        (temp, Settings::new(Arc::new(store)))
    }

    fn map(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_round_trip_plain_string() {
        let (_temp, settings) = test_settings();

        settings
            .set_many(
                SettingsNamespace::Company,
                &map(&[("hours", json!("9-5"))]),
            )
            .unwrap();

        let values = settings.namespace_values(SettingsNamespace::Company).unwrap();
        assert_eq!(values["hours"], json!("9-5"));
    }

    #[test]
    fn test_footer_certification_decodes_as_bool() {
        let (_temp, settings) = test_settings();

        settings
            .set_many(
                SettingsNamespace::Company,
                &map(&[
                    ("footer_certification_iso", json!(true)),
                    ("footer_certification_osha", json!(false)),
                ]),
            )
            .unwrap();

        let values = settings.namespace_values(SettingsNamespace::Footer).unwrap();
        assert_eq!(values["certification_iso"], json!(true));
        assert_eq!(values["certification_osha"], json!(false));
    }

    #[test]
    fn test_recognized_prefixes_pass_through() {
        let (_temp, settings) = test_settings();

        settings
            .set_many(
                SettingsNamespace::Company,
                &map(&[
                    ("phone", json!("+1 555 0100")),
                    ("footer_email", json!("info@example.com")),
                    ("dashboard_layout", json!("wide")),
                ]),
            )
            .unwrap();

        let company = settings.namespace_values(SettingsNamespace::Company).unwrap();
        assert_eq!(company.len(), 1);
        assert_eq!(company["phone"], json!("+1 555 0100"));

        let footer = settings.namespace_values(SettingsNamespace::Footer).unwrap();
        assert_eq!(footer["email"], json!("info@example.com"));

        let dashboard = settings
            .namespace_values(SettingsNamespace::Dashboard)
            .unwrap();
        assert_eq!(dashboard["layout"], json!("wide"));
    }

    #[test]
    fn test_structured_values_round_trip_as_json() {
        let (_temp, settings) = test_settings();

        let offices = json!([
            {"name": "Main Office", "phone": "+1 555 0100"},
            {"name": "Regional Office", "phone": "+1 555 0200"},
        ]);
        settings
            .set_many(
                SettingsNamespace::Company,
                &map(&[("office_locations", offices.clone())]),
            )
            .unwrap();

        let values = settings.namespace_values(SettingsNamespace::Company).unwrap();
        assert_eq!(values["office_locations"], offices);
    }

    #[test]
    fn test_numbers_decode_from_stored_strings() {
        let (_temp, settings) = test_settings();

        settings
            .set_many(SettingsNamespace::Company, &map(&[("founded", json!(1995))]))
            .unwrap();

        // Stored as "1995", read back through the JSON decode path.
        let values = settings.namespace_values(SettingsNamespace::Company).unwrap();
        assert_eq!(values["founded"], json!(1995));
    }

    #[test]
    fn test_empty_payload_rejected_before_write() {
        let (_temp, settings) = test_settings();

        let result = settings.set_many(SettingsNamespace::Company, &Map::new());
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_defaults_overlay() {
        let (_temp, settings) = test_settings();

        let defaults = map(&[("founded", json!("1995"))]);
        let values = settings
            .with_defaults(SettingsNamespace::Company, defaults.clone())
            .unwrap();
        assert_eq!(values["founded"], json!("1995"));

        settings
            .set_many(
                SettingsNamespace::Company,
                &map(&[("founded", json!("2001"))]),
            )
            .unwrap();

        let values = settings
            .with_defaults(SettingsNamespace::Company, defaults)
            .unwrap();
        assert_eq!(values["founded"], json!("2001"));
    }

    #[test]
    fn test_malformed_json_falls_back_to_raw_string() {
        let (_temp, settings) = test_settings();

        // Simulate a hand-edited row that is not valid JSON.
        settings
            .store
            .upsert_setting("company_motto", "{not json")
            .unwrap();

        let values = settings.namespace_values(SettingsNamespace::Company).unwrap();
        assert_eq!(values["motto"], json!("{not json"));
    }

    #[test]
    fn test_seed_does_not_clobber_existing_values() {
        let (_temp, settings) = test_settings();

        settings.store.upsert_setting("years_experience", "20").unwrap();
        settings.seed().unwrap();

        assert_eq!(
            settings
                .store
                .get_setting("years_experience")
                .unwrap()
                .unwrap()
                .value,
            "20"
        );
        assert!(settings
            .store
            .get_setting("company_description")
            .unwrap()
            .is_some());
    }
}
