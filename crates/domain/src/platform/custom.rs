use super::{AdapterError, Platform, PlatformAdapter, PlatformConfig};
use std::collections::HashMap;
use url::Url;

/// Substitution token the body template must carry exactly once or more;
/// a template without it would silently drop the message content.
pub const CONTENT_TOKEN: &str = "{{content}}";

pub struct CustomAdapter;

impl CustomAdapter {
    // Escapes `content` for splicing inside a JSON string literal
    fn escape_content(content: &str) -> String {
        let quoted = serde_json::Value::String(content.to_string()).to_string();
        quoted[1..quoted.len() - 1].to_string()
    }
}

impl PlatformAdapter for CustomAdapter {
    fn platform(&self) -> Platform {
        Platform::Custom
    }

    fn format_message(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<serde_json::Value, AdapterError> {
        let body_template = match config {
            PlatformConfig::Custom { body_template, .. } => body_template,
            _ => {
                return Err(AdapterError::ConfigMismatch {
                    expected: Platform::Custom,
                })
            }
        };

        if !body_template.contains(CONTENT_TOKEN) {
            return Err(AdapterError::InvalidTemplate(format!(
                "template does not contain the {} token",
                CONTENT_TOKEN
            )));
        }

        let body = body_template.replace(CONTENT_TOKEN, &Self::escape_content(content));
        serde_json::from_str(&body).map_err(|e| AdapterError::InvalidTemplate(e.to_string()))
    }

    fn validate_url(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => {
                parsed.has_host() && (parsed.scheme() == "https" || parsed.scheme() == "http")
            }
            Err(_) => false,
        }
    }

    fn default_config(&self) -> PlatformConfig {
        PlatformConfig::Custom {
            body_template: format!("{{\"text\": \"{}\"}}", CONTENT_TOKEN),
            headers: HashMap::new(),
        }
    }

    fn message_preview(
        &self,
        content: &str,
        config: &PlatformConfig,
    ) -> Result<String, AdapterError> {
        match config {
            PlatformConfig::Custom { .. } => Ok(content.to_string()),
            _ => Err(AdapterError::ConfigMismatch {
                expected: Platform::Custom,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> CustomAdapter {
        CustomAdapter
    }

    fn config(template: &str) -> PlatformConfig {
        PlatformConfig::Custom {
            body_template: template.into(),
            headers: HashMap::new(),
        }
    }

    #[test]
    fn it_substitutes_content_into_the_template() {
        let payload = adapter()
            .format_message("Standup", &adapter().default_config())
            .unwrap();
        assert_eq!(payload["text"], "Standup");
    }

    #[test]
    fn it_substitutes_into_nested_templates() {
        let template = "{\"msg\": {\"body\": \"{{content}}\", \"source\": \"pingbell\"}}";
        let payload = adapter().format_message("Standup", &config(template)).unwrap();
        assert_eq!(payload["msg"]["body"], "Standup");
        assert_eq!(payload["msg"]["source"], "pingbell");
    }

    #[test]
    fn it_escapes_content_that_would_break_the_json() {
        let payload = adapter()
            .format_message("say \"hi\"\nnew line", &adapter().default_config())
            .unwrap();
        assert_eq!(payload["text"], "say \"hi\"\nnew line");
    }

    #[test]
    fn it_rejects_templates_without_the_token() {
        let res = adapter().format_message("Standup", &config("{\"text\": \"fixed\"}"));
        assert!(matches!(res, Err(AdapterError::InvalidTemplate(_))));
    }

    #[test]
    fn it_rejects_templates_that_are_not_json() {
        let res = adapter().format_message("Standup", &config("text={{content}}"));
        assert!(matches!(res, Err(AdapterError::InvalidTemplate(_))));
    }

    #[test]
    fn it_accepts_any_absolute_http_url() {
        assert!(adapter().validate_url("https://example.com/hook"));
        assert!(adapter().validate_url("http://10.0.0.5:9000/notify"));
        assert!(!adapter().validate_url("ftp://example.com/hook"));
        assert!(!adapter().validate_url("/relative/path"));
        assert!(!adapter().validate_url("not a url"));
    }
}
