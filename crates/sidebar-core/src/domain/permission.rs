//! Records consulted by the permission check

use std::fmt;

use serde::{Deserialize, Serialize};

/// Record types whose existence or role restrictions can be looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    DocType,
    Page,
    Report,
    Workspace,
    ModuleDef,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::DocType => "DocType",
            RecordKind::Page => "Page",
            RecordKind::Report => "Report",
            RecordKind::Workspace => "Workspace",
            RecordKind::ModuleDef => "Module Def",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceRecord {
    pub name: String,
    pub public: bool,
    pub module: Option<String>,
}
