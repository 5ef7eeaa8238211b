use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::guard::normalize_path;

/// Area
///
/// The four consoles of the portal. Each one has its own sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Area {
    Citizen,
    Gs,
    Ds,
    Super,
}

/// MenuItem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
    pub active: bool,
}

const CITIZEN_MENU: &[(&str, &str)] = &[
    ("Overview", "/dashboard"),
    ("My Applications", "/dashboard/applications"),
    ("Digital Wallet", "/dashboard/wallet"),
    ("Profile", "/dashboard/profile"),
];

const GS_MENU: &[(&str, &str)] = &[
    ("GS Overview", "/admin/gs"),
    ("Pending Verifications", "/admin/gs/verify"),
    ("Villager Database", "/admin/gs/villagers"),
    ("Land Disputes", "/admin/gs/land"),
];

const DS_MENU: &[(&str, &str)] = &[
    ("DS Overview", "/admin/ds"),
    ("Approval Queue", "/admin/ds/approvals"),
    ("Signed Certificates", "/admin/ds/certificates"),
    ("GS Officers", "/admin/ds/officers"),
    ("Regional Reports", "/admin/ds/reports"),
];

const SUPER_MENU: &[(&str, &str)] = &[
    ("System Monitor", "/admin/super"),
    ("Officer Management", "/admin/super/users"),
    ("DS Divisions", "/admin/super/divisions"),
    ("Marketplace Manager", "/admin/super/products"),
    ("Service Configuration", "/admin/super/services"),
    ("Revenue Analytics", "/admin/super/revenue"),
    ("Security & Logs", "/admin/super/logs"),
];

impl Area {
    /// Area a path belongs to, if any.
    pub fn for_path(path: &str) -> Option<Area> {
        let path = normalize_path(path);
        let within = |prefix: &str| path == prefix || path.starts_with(&format!("{}/", prefix));

        if within("/admin/gs") {
            Some(Area::Gs)
        } else if within("/admin/ds") {
            Some(Area::Ds)
        } else if within("/admin/super") {
            Some(Area::Super)
        } else if within("/dashboard") {
            Some(Area::Citizen)
        } else {
            None
        }
    }

    /// Heading shown above the sidebar.
    pub fn label(&self) -> &'static str {
        match self {
            Area::Citizen => "CITIZEN",
            Area::Gs => "GRAMA NILADHARI",
            Area::Ds => "DIVISIONAL SECRETARY",
            Area::Super => "SUPER ADMIN",
        }
    }

    fn entries(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Area::Citizen => CITIZEN_MENU,
            Area::Gs => GS_MENU,
            Area::Ds => DS_MENU,
            Area::Super => SUPER_MENU,
        }
    }

    /// Sidebar entries, with the one matching `current_path` marked active.
    pub fn menu(&self, current_path: &str) -> Vec<MenuItem> {
        let current = normalize_path(current_path);
        self.entries()
            .iter()
            .map(|(name, path)| MenuItem {
                name: name.to_string(),
                path: path.to_string(),
                active: *path == current,
            })
            .collect()
    }
}
