use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a running service instance, as reported by `/info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub model: String,
    pub instance_id: Uuid,
}

impl ServiceInfo {
    pub fn new(name: &str, model: &str, instance_id: Uuid) -> Self {
        Self {
            name: name.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            model: model.to_owned(),
            instance_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_model_and_instance() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(ServiceInfo::new("hunter-api", "hybrid", id)).unwrap();
        assert_eq!(json["model"], "hybrid");
        assert_eq!(json["instance_id"], id.to_string());
    }
}
