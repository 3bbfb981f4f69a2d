// ── Command API ──
//
// Every card interaction ends in one `CardEvent`: either a host service
// call or a request to open the host's more-info dialog. Actions route to
// the `landroid_cloud` integration domain or the generic `vacuum` domain
// by name; user-configured actions override the default route.

pub mod requests;
pub mod toolbar;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use crate::error::CoreError;
use requests::CustomAction;

pub const VACUUM_DOMAIN: &str = "vacuum";
pub const LANDROID_DOMAIN: &str = "landroid_cloud";

/// Card actions. The string form is the host service name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Start,
    Pause,
    Stop,
    ReturnToBase,
    Resume,
    Edgecut,
    Lock,
    Partymode,
    Setzone,
    Raindelay,
    Config,
    Ots,
    Poll,
    Restart,
    Schedule,
    /// Opens the more-info dialog instead of calling a service.
    More,
}

impl Action {
    /// Parse an action name, rejecting anything the card does not know.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        name.parse().map_err(|_| CoreError::UnknownAction {
            name: name.to_owned(),
        })
    }

    /// Host domain serving this action.
    pub const fn domain(self) -> &'static str {
        match self {
            Self::Config
            | Self::Edgecut
            | Self::Lock
            | Self::Ots
            | Self::Partymode
            | Self::Poll
            | Self::Restart
            | Self::Setzone
            | Self::Schedule => LANDROID_DOMAIN,
            _ => VACUUM_DOMAIN,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    /// String-table key of the action label.
    pub fn label_key(self) -> String {
        format!("action.{self}")
    }
}

/// One call into the host's service registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub data: Map<String, Value>,
    /// The card shows a progress indicator until the entity state changes.
    #[serde(default)]
    pub is_request: bool,
}

impl ServiceCall {
    /// `<domain>.<service>`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.domain, self.service)
    }
}

/// What the card asks the host to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CardEvent {
    CallService(ServiceCall),
    MoreInfo { entity_id: String },
}

/// Routes card actions for one entity.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    entity_id: &'a str,
    overrides: &'a IndexMap<String, CustomAction>,
}

impl<'a> Router<'a> {
    pub fn new(entity_id: &'a str, overrides: &'a IndexMap<String, CustomAction>) -> Self {
        Self {
            entity_id,
            overrides,
        }
    }

    pub fn entity_id(&self) -> &str {
        self.entity_id
    }

    /// Dispatch `action`. A configured override wins; otherwise the default
    /// service (or `fallback`, when given) is called for the entity.
    pub fn handle_action(
        &self,
        action: Action,
        fallback: Option<Action>,
        is_request: bool,
    ) -> Result<CardEvent, CoreError> {
        if let Some(custom) = self.overrides.get(action.name()) {
            debug!(%action, service = %custom.service, "using configured action override");
            return custom.to_call().map(CardEvent::CallService);
        }
        Ok(self.call_service(fallback.unwrap_or(action), is_request, Map::new()))
    }

    /// Call the default service for `action` with extra service data.
    pub fn call_service(
        &self,
        action: Action,
        is_request: bool,
        options: Map<String, Value>,
    ) -> CardEvent {
        if action == Action::More {
            return self.more_info();
        }

        let mut data = Map::new();
        data.insert("entity_id".into(), Value::from(vec![self.entity_id]));
        data.extend(options);

        CardEvent::CallService(ServiceCall {
            domain: action.domain().to_owned(),
            service: action.name().to_owned(),
            data,
            is_request,
        })
    }

    /// Handle a selection in a list menu: a zone pick or a rain-delay pick.
    /// Other menus open the more-info dialog.
    pub fn handle_selection(&self, service: Option<Action>, value: &str) -> CardEvent {
        match service {
            Some(Action::Setzone) => {
                let mut options = Map::new();
                options.insert("zone".into(), Value::from(value));
                self.call_service(Action::Setzone, false, options)
            }
            Some(Action::Raindelay) => {
                let mut options = Map::new();
                options.insert("raindelay".into(), Value::from(value));
                self.call_service(Action::Config, false, options)
            }
            _ => self.more_info(),
        }
    }

    pub fn more_info(&self) -> CardEvent {
        CardEvent::MoreInfo {
            entity_id: self.entity_id.to_owned(),
        }
    }
}
