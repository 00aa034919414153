//! Default values served when a key has not been stored yet, plus the
//! content seeded at init time. Stored rows always win over these.

use serde_json::{Map, Value, json};

/// Home-page content written by `admin init` when the keys are absent.
pub fn seed_content() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "company_description",
            "S-Steel Construction is a leading provider of steel construction services with over 15 years of experience in delivering high-quality projects.",
        ),
        ("years_experience", "15"),
        ("projects_completed", "500"),
        ("team_members", "50"),
        ("client_satisfaction", "99"),
    ]
}

fn to_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Footer defaults, keyed with their full storage prefix. Shared between the
/// public company-info view and the admin settings view.
pub fn footer_defaults() -> Map<String, Value> {
    to_map(json!({
        "footer_address": "123 Steel Industry Blvd, Industrial City",
        "footer_phone": "+1 (555) 123-4567",
        "footer_fax": "+1 (555) 123-4568",
        "footer_email": "info@s-steel.com",
        "footer_website": "www.s-steel.com",
        "footer_facebook": "",
        "footer_twitter": "",
        "footer_instagram": "",
        "footer_linkedin": "",
        "footer_certification_iso": true,
        "footer_certification_osha": true,
        "footer_certification_aws": true,
    }))
}

/// Defaults for the public company-info endpoint (contact details only).
pub fn company_info_defaults() -> Map<String, Value> {
    let mut defaults = to_map(json!({
        "address": "123 Steel Avenue, Industrial District, City, State 12345",
        "phone": "+1 (555) 123-4567",
        "email": "info@s-steel.com",
        "website": "www.s-steel.com",
    }));
    defaults.append(&mut footer_defaults());
    defaults
}

/// Defaults for the admin company-settings view.
pub fn company_settings_defaults() -> Map<String, Value> {
    let mut defaults = to_map(json!({
        "name": "S-Steel Construction",
        "description": "Leading steel construction and engineering company specializing in industrial, commercial, and infrastructure projects.",
        "address": "123 Industrial Ave, Steel City, SC 12345",
        "phone": "+1 (555) 123-4567",
        "email": "info@s-steel.com",
        "website": "www.s-steel.com",
        "founded": "1995",
        "employees": "250+",
        "projects_completed": "500+",
        "support_email": "support@s-steel.com",
        "support_phone": "+1 (555) 123-4568",
        "sales_email": "sales@s-steel.com",
        "sales_phone": "+1 (555) 123-4569",
        "emergency_contact": "+1 (555) 911-STEEL",
        "business_hours": "Mon-Fri: 8:00 AM - 6:00 PM",
        "office_locations": [
            {
                "id": 1,
                "name": "Main Office",
                "address": "123 Industrial Ave, Steel City, SC 12345",
                "phone": "+1 (555) 123-4567",
            },
            {
                "id": 2,
                "name": "Regional Office",
                "address": "456 Construction Blvd, Metro City, MC 67890",
                "phone": "+1 (555) 987-6543",
            },
        ],
    }));
    defaults.append(&mut footer_defaults());
    defaults
}

/// Defaults for the admin dashboard layout.
pub fn dashboard_defaults() -> Map<String, Value> {
    to_map(json!({
        "stats_cards": [
            {
                "id": 1,
                "title": "Total Projects",
                "value": "12",
                "change": "+12% this month",
                "icon": "BuildingOfficeIcon",
                "visible": true,
                "order": 1,
            },
            {
                "id": 2,
                "title": "New Contacts",
                "value": "5",
                "change": "+8% this week",
                "icon": "ChatBubbleLeftRightIcon",
                "visible": true,
                "order": 2,
            },
            {
                "id": 3,
                "title": "Active Projects",
                "value": "8",
                "change": "+2 from last month",
                "icon": "ChartBarIcon",
                "visible": true,
                "order": 3,
            },
            {
                "id": 4,
                "title": "Revenue",
                "value": "$2.5M",
                "change": "+15% this quarter",
                "icon": "BanknotesIcon",
                "visible": true,
                "order": 4,
            },
        ],
        "quick_actions": [
            {
                "id": 1,
                "title": "Add New Project",
                "description": "Create a new construction project",
                "link": "/admin/projects/new",
                "icon": "PlusIcon",
                "visible": true,
            },
            {
                "id": 2,
                "title": "View Contacts",
                "description": "Manage customer inquiries",
                "link": "/admin/contacts",
                "icon": "ChatBubbleLeftRightIcon",
                "visible": true,
            },
        ],
    }))
}
