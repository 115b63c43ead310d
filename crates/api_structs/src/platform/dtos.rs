use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTestDTO {
    pub success: bool,
    pub message: String,
    pub http_status: Option<u16>,
}
