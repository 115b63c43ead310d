use crate::dtos::ConnectionTestDTO;
use pingbell_domain::PlatformConfig;
use serde::{Deserialize, Serialize};

pub mod get_platforms {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub platforms: Vec<String>,
    }
}

pub mod detect_platform {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct RequestBody {
        pub url: String,
    }

    /// `platform` is `None` when no known webhook signature matches; the
    /// caller must then ask the user to pick a platform explicitly.
    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub platform: Option<String>,
    }
}

pub mod test_connection {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub platform: String,
        pub url: String,
        #[serde(default)]
        pub config: Option<PlatformConfig>,
    }

    pub type APIResponse = ConnectionTestDTO;
}

pub mod preview_message {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub platform: String,
        pub content: String,
        #[serde(default)]
        pub config: Option<PlatformConfig>,
    }

    #[derive(Deserialize, Serialize)]
    pub struct APIResponse {
        pub preview: String,
    }
}
