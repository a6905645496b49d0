//! `/stores.php`: fixed single-store listing

use axum::Json;
use serde::Serialize;
use shared::models::StoreInfo;

const STORE_ID: &str = "09108898-fc1f-49b9-a92b-229f99615ae8";

#[derive(Debug, Serialize)]
pub struct StoreList {
    pub success: bool,
    pub data: Vec<StoreInfo>,
}

fn marketlokal_store() -> StoreInfo {
    StoreInfo {
        id: STORE_ID.to_string(),
        name: "MarketLokal Store".to_string(),
        address: "Jl. Merdeka No. 123, Jakarta".to_string(),
        phone: "+62812-3456-7890".to_string(),
        email: "store@marketlokal.com".to_string(),
        is_active: true,
    }
}

/// GET /stores.php
pub async fn list() -> Json<StoreList> {
    Json(StoreList {
        success: true,
        data: vec![marketlokal_store()],
    })
}
