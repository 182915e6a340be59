use serde::{Deserialize, Serialize};

/// Web Storage usage. Areas the source could not read are reported as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSurface {
    #[serde(default)]
    pub local_storage_entry_count: u32,
    #[serde(default)]
    pub session_storage_entry_count: u32,
    #[serde(default)]
    pub items: Vec<StorageRecord>,
}

impl StorageSurface {
    /// Entries across both storage areas.
    pub fn total_entries(&self) -> u64 {
        u64::from(self.local_storage_entry_count) + u64::from(self.session_storage_entry_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRecord {
    pub key: String,
    pub storage_type: StorageType,
    /// Length of the stored value.
    #[serde(default)]
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    LocalStorage,
    SessionStorage,
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocalStorage => write!(f, "localStorage"),
            Self::SessionStorage => write!(f, "sessionStorage"),
        }
    }
}
