// ── Toolbar and config bar layout ──
//
// Which buttons the card offers depends on the entity's primary state.
// Buttons only describe themselves; `ToolbarButton::event` turns a press
// into a `CardEvent` through the entity's `Router`.

use serde::Serialize;

use super::requests::Shortcut;
use super::{Action, CardEvent, Router};
use crate::error::CoreError;
use crate::icon::{IconEntry, icon_for};
use crate::model::MowerView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolbarButton {
    pub action: Action,
    /// Service called instead of `action` when no override is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Action>,
    pub icon: String,
    /// String-table key of the tooltip.
    pub title_key: String,
    /// String-table key of the visible caption, if the button has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_key: Option<String>,
    pub is_request: bool,
}

impl ToolbarButton {
    fn new(action: Action, view: &MowerView) -> Self {
        let icon = action
            .name()
            .parse::<IconEntry>()
            .map(|entry| icon_for(entry, view))
            .unwrap_or_default();
        Self {
            action,
            fallback: None,
            icon,
            title_key: action.label_key(),
            label_key: None,
            is_request: true,
        }
    }

    fn titled(mut self) -> Self {
        self.label_key = Some(self.title_key.clone());
        self
    }

    fn icon_from(mut self, entry: IconEntry, view: &MowerView) -> Self {
        self.icon = icon_for(entry, view);
        self
    }

    /// `resume` with `start` as the default service, captioned "continue".
    fn resume(view: &MowerView) -> Self {
        Self {
            fallback: Some(Action::Start),
            label_key: Some("action.continue".to_owned()),
            ..Self::new(Action::Resume, view).icon_from(IconEntry::Play, view)
        }
    }

    pub fn event(&self, router: &Router<'_>) -> Result<CardEvent, CoreError> {
        router.handle_action(self.action, self.fallback, self.is_request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolbarItem {
    Button(ToolbarButton),
    Shortcut(Shortcut),
}

impl ToolbarItem {
    pub fn event(&self, router: &Router<'_>) -> Result<CardEvent, CoreError> {
        match self {
            Self::Button(button) => button.event(router),
            Self::Shortcut(shortcut) => shortcut.to_call().map(CardEvent::CallService),
        }
    }
}

/// Toolbar buttons for the mower's current state.
pub fn toolbar_for(view: &MowerView, shortcuts: &[Shortcut]) -> Vec<ToolbarItem> {
    let button = |action| ToolbarButton::new(action, view);

    let buttons = match view.state.as_str() {
        "initializing" | "mowing" | "starting" | "zoning" => vec![
            button(Action::Pause).titled(),
            button(Action::ReturnToBase).titled(),
        ],
        "edgecut" => vec![
            button(Action::Pause)
                .icon_from(IconEntry::Edgecut, view)
                .titled(),
            button(Action::ReturnToBase).titled(),
        ],
        "paused" => vec![
            ToolbarButton::resume(view),
            button(Action::Edgecut).titled(),
            button(Action::ReturnToBase).titled(),
        ],
        "returning" => vec![ToolbarButton::resume(view), button(Action::Pause)],
        state => {
            let mut buttons = vec![button(Action::Start), button(Action::Edgecut)];
            if state == "idle" {
                buttons.push(button(Action::ReturnToBase));
            }
            let mut items: Vec<ToolbarItem> = buttons.into_iter().map(ToolbarItem::Button).collect();
            items.extend(shortcuts.iter().cloned().map(ToolbarItem::Shortcut));
            return items;
        }
    };

    buttons.into_iter().map(ToolbarItem::Button).collect()
}

/// Icon toggles shown in the config bar next to the delay and zone menus.
pub fn configbar_for(view: &MowerView) -> Vec<ToolbarButton> {
    [
        (Action::Partymode, IconEntry::PartyModeEnabled),
        (Action::Lock, IconEntry::Locked),
    ]
    .into_iter()
    .map(|(action, entry)| ToolbarButton {
        is_request: false,
        ..ToolbarButton::new(action, view).icon_from(entry, view)
    })
    .collect()
}
