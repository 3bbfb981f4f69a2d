// ── User-configured service calls ──
//
// Card configuration can replace the default service behind any action and
// add free-form toolbar shortcuts. Both name the service as
// `<domain>.<service>` and carry their own service data verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ServiceCall;
use crate::error::CoreError;

/// Replacement service for one card action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomAction {
    pub service: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub service_data: Map<String, Value>,
}

impl CustomAction {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            service_data: Map::new(),
        }
    }

    /// The host call, with `service_data` passed through untouched.
    pub fn to_call(&self) -> Result<ServiceCall, CoreError> {
        let (domain, service) = split_service(&self.service)?;
        Ok(ServiceCall {
            domain: domain.to_owned(),
            service: service.to_owned(),
            data: self.service_data.clone(),
            is_request: false,
        })
    }
}

/// Extra toolbar button shown while the mower is idle or docked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortcut {
    pub name: String,
    pub service: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub service_data: Map<String, Value>,
}

impl Shortcut {
    pub fn to_call(&self) -> Result<ServiceCall, CoreError> {
        CustomAction {
            service: self.service.clone(),
            service_data: self.service_data.clone(),
        }
        .to_call()
    }
}

fn split_service(raw: &str) -> Result<(&str, &str), CoreError> {
    let invalid = || CoreError::InvalidService {
        service: raw.to_owned(),
    };
    let (domain, service) = raw.split_once('.').ok_or_else(invalid)?;
    if domain.is_empty() || service.is_empty() || service.contains('.') {
        return Err(invalid());
    }
    Ok((domain, service))
}
