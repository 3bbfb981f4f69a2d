// ── List menus ──
//
// Dropdown menus of the card: a header (icon plus optional formatted value)
// and a flat list of rows. Nested objects are flattened depth-first: a
// label row for the parent followed by one row per child field, each child
// formatted by its own field name.

use serde::Serialize;
use serde_json::{Map, Value};
use strum::{Display, EnumIter, EnumString};

use crate::command::{Action, CardEvent, Router};
use crate::error::CoreError;
use crate::format::FormatContext;
use crate::icon::{IconEntry, icon_for};
use crate::model::MowerView;

/// Rain delay options run every 30 minutes up to, not including, a day.
const DELAY_STEP: usize = 30;
const DELAY_LIMIT: i64 = 1440;

/// Zones selectable from the zone menu.
const ZONE_COUNT: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MenuKind {
    Battery,
    Blades,
    Delay,
    Rssi,
    Stats,
    Zone,
}

impl MenuKind {
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        name.parse().map_err(|_| CoreError::UnknownMenu {
            name: name.to_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuRow {
    /// Field name, or the option value for selectable menus.
    pub key: String,
    /// Localized field label, when the string table has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: String,
    /// Child of a nested object.
    pub nested: bool,
    /// Section heading for the rows that follow.
    pub is_label: bool,
    pub selected: bool,
}

impl MenuRow {
    /// `Label: value`, or just the value for unlabelled rows.
    pub fn text(&self) -> String {
        match (&self.label, self.is_label) {
            (Some(label), true) => label.clone(),
            (None, true) => self.key.clone(),
            (Some(label), false) => format!("{label}: {}", self.value),
            (None, false) => self.value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    pub kind: MenuKind,
    pub title_key: String,
    pub title: String,
    pub icon: String,
    /// Formatted reading shown beside the icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Header text goes right of the icon.
    pub value_right: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Action>,
    pub rows: Vec<MenuRow>,
}

impl Menu {
    /// The event for picking `option`. Menus without a service are
    /// informational and yield `None`.
    pub fn select(&self, option: &str, router: &Router<'_>) -> Result<Option<CardEvent>, CoreError> {
        let Some(service) = self.service else {
            return Ok(None);
        };
        if !self.rows.iter().any(|row| !row.is_label && row.key == option) {
            return Err(CoreError::InvalidOption {
                menu: self.kind.to_string(),
                option: option.to_owned(),
            });
        }
        Ok(Some(router.handle_selection(Some(service), option)))
    }

    pub fn selected(&self) -> Option<&MenuRow> {
        self.rows.iter().find(|row| row.selected)
    }
}

/// Build the `kind` menu for the current readings.
pub fn list_menu(kind: MenuKind, view: &MowerView, ctx: &FormatContext<'_>) -> Menu {
    let mut header = None;
    let mut value_right = true;
    let mut service = None;
    let mut selected = None;

    let (title, icon, attributes) = match kind {
        MenuKind::Battery => {
            header = Some(ctx.format("battery_level", Some(&Value::from(view.battery_level))));
            value_right = false;
            ("battery_level", view.battery_icon.clone(), object(&view.battery))
        }
        MenuKind::Blades => ("blades", icon_for(IconEntry::Blades, view), object(&view.blades)),
        MenuKind::Delay => {
            header = Some(ctx.format("delay", Some(&Value::from(view.rain_sensor.delay))));
            service = Some(Action::Raindelay);
            selected = Some(view.rain_sensor.delay.to_string());
            ("delay", "mdi:weather-rainy".to_owned(), delay_options(ctx))
        }
        MenuKind::Rssi => {
            header = Some(ctx.format("rssi", Some(&Value::from(view.wifi_quality()))));
            ("rssi", icon_for(IconEntry::Rssi, view), device_info(view))
        }
        MenuKind::Stats => {
            let mut attributes = Map::new();
            attributes.insert("blades".into(), Value::Object(object(&view.blades)));
            attributes.insert("statistics".into(), Value::Object(object(&view.statistics)));
            ("statistics", icon_for(IconEntry::Statistics, view), attributes)
        }
        MenuKind::Zone => {
            service = Some(Action::Setzone);
            selected = Some(view.zone.current.to_string());
            let zones: Map<String, Value> = (0..ZONE_COUNT)
                .map(|i| (i.to_string(), Value::from((i + 1).to_string())))
                .collect();
            let mut attributes = Map::new();
            attributes.insert("zone".into(), Value::Object(zones));
            ("zone", icon_for(IconEntry::Zone, view), attributes)
        }
    };

    let mut rows = Vec::new();
    flatten_rows(&attributes, None, selected.as_deref(), ctx, &mut rows);

    let title_key = format!("attr.{title}");
    Menu {
        kind,
        title: ctx.localize_or(&title_key, title),
        title_key,
        icon,
        header,
        value_right,
        service,
        rows,
    }
}

fn object<T: Serialize>(section: &T) -> Map<String, Value> {
    match serde_json::to_value(section) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn delay_options(ctx: &FormatContext<'_>) -> Map<String, Value> {
    (0..DELAY_LIMIT)
        .step_by(DELAY_STEP)
        .map(|minutes| {
            let text = ctx.format("delay", Some(&Value::from(minutes)));
            (minutes.to_string(), Value::from(text))
        })
        .collect()
}

/// Lists become index-keyed objects so each entry gets its own row.
fn indexed(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Object(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn device_info(view: &MowerView) -> Map<String, Value> {
    let mut info = Map::new();
    info.insert("model".into(), Value::from(view.model.as_str()));
    info.insert("serial_number".into(), Value::from(view.serial_number.as_str()));
    info.insert("mac_address".into(), Value::from(view.mac_address.as_str()));
    info.insert("time_zone".into(), Value::from(view.time_zone.as_str()));
    info.insert("online".into(), Value::from(view.online));
    info.insert("state_updated_at".into(), Value::from(view.state_updated_at.as_str()));
    info.insert("accessories".into(), indexed(&view.accessories));
    info.insert("firmware".into(), Value::Object(object(&view.firmware)));
    info.insert("capabilities".into(), indexed(&view.capabilities));
    info
}

fn flatten_rows(
    attributes: &Map<String, Value>,
    parent: Option<&str>,
    selected: Option<&str>,
    ctx: &FormatContext<'_>,
    rows: &mut Vec<MenuRow>,
) {
    for (i, (key, value)) in attributes.iter().enumerate() {
        if let Value::Object(children) = value {
            flatten_rows(children, Some(key), selected, ctx, rows);
            continue;
        }

        if let (0, Some(parent)) = (i, parent) {
            rows.push(MenuRow {
                key: parent.to_owned(),
                label: ctx.strings.lookup(&format!("attr.{parent}")).map(str::to_owned),
                value: String::new(),
                nested: false,
                is_label: true,
                selected: false,
            });
        }

        rows.push(MenuRow {
            key: key.clone(),
            label: ctx.strings.lookup(&format!("attr.{key}")).map(str::to_owned),
            value: ctx.format(key, Some(value)),
            nested: parent.is_some(),
            is_label: false,
            selected: selected == Some(key.as_str()),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::format::Formatter;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn menu(kind: MenuKind, view: &MowerView) -> Menu {
        let formatter = Formatter::default();
        list_menu(kind, view, &formatter.context())
    }

    fn keys(menu: &Menu) -> Vec<&str> {
        menu.rows.iter().map(|row| row.key.as_str()).collect()
    }

    #[test]
    fn battery_menu_flattens_cycles_first() {
        let mut view = MowerView::default();
        view.battery_level = 0;
        view.battery.cycles.total = 321;
        view.battery.voltage = 19.5;
        view.battery.charging = true;

        let menu = menu(MenuKind::Battery, &view);
        assert_eq!(menu.title, "Battery level");
        assert_eq!(menu.header.as_deref(), Some("0%"));
        assert!(!menu.value_right);
        assert_eq!(menu.icon, "mdi:battery");
        assert_eq!(
            keys(&menu),
            vec![
                "cycles", "total", "current", "reset_at", "reset_time", "temperature", "voltage",
                "percent", "charging",
            ]
        );
        assert!(menu.rows[0].is_label);
        assert_eq!(menu.rows[0].text(), "Charge cycles");
        assert_eq!(menu.rows[1].text(), "Total: 321");
        assert!(menu.rows[1].nested);
        assert_eq!(menu.rows[6].text(), "Voltage: 19.5 V");
        assert_eq!(menu.rows[8].text(), "Charging: Yes");
        assert!(!menu.rows[8].nested);
    }

    #[test]
    fn stats_menu_has_two_sections() {
        let mut view = MowerView::default();
        view.statistics.worktime_total = 90;
        let menu = menu(MenuKind::Stats, &view);
        assert_eq!(menu.title, "Statistics");
        let labels: Vec<&str> = menu
            .rows
            .iter()
            .filter(|row| row.is_label)
            .map(|row| row.key.as_str())
            .collect();
        assert_eq!(labels, vec!["blades", "statistics"]);
        let total = menu.rows.iter().find(|row| row.key == "worktime_total").unwrap();
        assert_eq!(total.value, "1 hr 30 min");
    }

    #[test]
    fn delay_menu_lists_half_hour_steps() {
        let mut view = MowerView::default();
        view.rain_sensor.delay = 90;
        let menu = menu(MenuKind::Delay, &view);
        assert_eq!(menu.rows.len(), 48);
        assert_eq!(menu.rows.first().map(|r| r.key.as_str()), Some("0"));
        assert_eq!(menu.rows.last().map(|r| r.key.as_str()), Some("1410"));
        assert_eq!(menu.rows[3].value, "1:30");
        assert_eq!(menu.selected().map(|r| r.key.as_str()), Some("90"));
        assert_eq!(menu.header.as_deref(), Some("1:30"));
        assert_eq!(menu.service, Some(Action::Raindelay));
    }

    #[test]
    fn zone_menu_selects_current_zone() {
        let mut view = MowerView::default();
        view.zone.current = 2;
        let menu = menu(MenuKind::Zone, &view);
        assert_eq!(keys(&menu), vec!["zone", "0", "1", "2", "3"]);
        assert_eq!(menu.selected().map(|r| r.value.as_str()), Some("3"));
        assert_eq!(menu.icon, "mdi:numeric-3-box-multiple");

        let overrides = IndexMap::new();
        let router = Router::new("vacuum.mower", &overrides);
        let Some(CardEvent::CallService(call)) = menu.select("1", &router).unwrap() else {
            panic!("expected a service call");
        };
        assert_eq!(call.qualified_name(), "landroid_cloud.setzone");
        assert_eq!(call.data.get("zone"), Some(&json!("1")));
        assert!(matches!(
            menu.select("7", &router),
            Err(CoreError::InvalidOption { .. })
        ));
    }

    #[test]
    fn rssi_menu_expands_lists_and_firmware() {
        let mut view = MowerView::default();
        view.rssi = -60;
        view.accessories = json!(["ACS", "Off Limits"]);
        view.firmware.version = json!("3.30");
        let menu = menu(MenuKind::Rssi, &view);
        assert_eq!(menu.header.as_deref(), Some("80%"));
        assert_eq!(menu.icon, "mdi:wifi-strength-3");
        let texts: Vec<String> = menu.rows.iter().map(MenuRow::text).collect();
        assert!(texts.contains(&"Accessories".to_owned()));
        assert!(texts.contains(&"ACS".to_owned()));
        assert!(texts.contains(&"Version: 3.30".to_owned()));
    }

    #[test]
    fn informational_menus_ignore_selection() {
        let view = MowerView::default();
        let overrides = IndexMap::new();
        let router = Router::new("vacuum.mower", &overrides);
        assert_eq!(menu(MenuKind::Blades, &view).select("total_on", &router).unwrap(), None);
        assert!(matches!(MenuKind::parse("nope"), Err(CoreError::UnknownMenu { .. })));
    }
}
