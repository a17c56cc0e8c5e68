// Alert headers attached to resource responses.
//
// Header names carry the configured application name, e.g.
// `X-blogApp-alert`. The name is handed in at construction time; nothing
// here reads configuration on its own.

use std::collections::BTreeMap;

pub type Headers = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct Alerts {
    app_name: String,
}

impl Alerts {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }

    fn alert(&self, message: String, param: &str) -> Headers {
        let mut headers = Headers::new();
        headers.insert(format!("X-{}-alert", self.app_name), message);
        headers.insert(format!("X-{}-params", self.app_name), param.to_string());
        headers
    }

    pub fn entity_creation_alert(&self, entity: &str, param: &str) -> Headers {
        self.alert(
            format!("A new {} is created with identifier {}", entity, param),
            param,
        )
    }

    pub fn entity_update_alert(&self, entity: &str, param: &str) -> Headers {
        self.alert(
            format!("A {} is updated with identifier {}", entity, param),
            param,
        )
    }

    pub fn entity_deletion_alert(&self, entity: &str, param: &str) -> Headers {
        self.alert(
            format!("A {} is deleted with identifier {}", entity, param),
            param,
        )
    }

    /// Headers for a refused request: the error key plus the entity it concerns.
    pub fn failure_alert(&self, entity: &str, error_key: &str) -> Headers {
        let mut headers = Headers::new();
        headers.insert(
            format!("X-{}-error", self.app_name),
            format!("error.{}", error_key),
        );
        headers.insert(format!("X-{}-params", self.app_name), entity.to_string());
        headers
    }
}
