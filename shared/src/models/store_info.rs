//! Store Info Model

use serde::{Deserialize, Serialize};

/// Store (outlet) record as listed by the stores endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub is_active: bool,
}
