//! Fixed name tables and the rendering API the translator targets.

/// Attribute name to DOM event name.
pub const EVENTS: &[(&str, &str)] = &[
    ("onAbort", "abort"),
    ("onCancel", "cancel"),
    ("onCanPlay", "canplay"),
    ("onCanPlayThrough", "canplaythrough"),
    ("onChange", "change"),
    ("onClick", "click"),
    ("onCueChange", "cuechange"),
    ("onDblClick", "dblclick"),
    ("onDurationChange", "durationchange"),
    ("onEmptied", "emptied"),
    ("onEnded", "ended"),
    ("onInput", "input"),
    ("onInvalid", "invalid"),
    ("onKeyDown", "keydown"),
    ("onKeyPress", "keypress"),
    ("onKeyUp", "keyup"),
    ("onLoadedData", "loadeddata"),
    ("onLoadedMetadata", "loadedmetadata"),
    ("onLoadStart", "loadstart"),
    ("onMouseDown", "mousedown"),
    ("onMouseEnter", "mouseenter"),
    ("onMouseLeave", "mouseleave"),
    ("onMouseMove", "mousemove"),
    ("onMouseOut", "mouseout"),
    ("onMouseOver", "mouseover"),
    ("onMouseUp", "mouseup"),
    ("onMouseWheel", "mousewheel"),
    ("onPause", "pause"),
    ("onPlay", "play"),
    ("onPlaying", "playing"),
    ("onProgress", "progress"),
    ("onRateChange", "ratechange"),
    ("onReset", "reset"),
    ("onSeeked", "seeked"),
    ("onSeeking", "seeking"),
    ("onSelect", "select"),
    ("onShow", "show"),
    ("onStalled", "stalled"),
    ("onSubmit", "submit"),
    ("onSuspend", "suspend"),
    ("onTimeUpdate", "timeupdate"),
    ("onToggle", "toggle"),
    ("onVolumeChange", "volumechange"),
    ("onWaiting", "waiting"),
];

/// Attributes the rendering API sets as DOM properties, with their property names.
pub const PROPERTIES: &[(&str, &str)] = &[
    ("autofocus", "autofocus"),
    ("checked", "checked"),
    ("class", "class"),
    ("for", "htmlFor"),
    ("href", "href"),
    ("id", "id"),
    ("placeholder", "placeholder"),
    ("src", "src"),
    ("type", "type"),
    ("value", "value"),
];

/// Attribute whose value is spliced into the markup list as-is.
pub const SPREAD_ATTR: &str = "attrs";

/// Element name that builds a plain text node instead of a tag.
pub const TEXT_TAG: &str = "text";

pub fn event_name(attr: &str) -> Option<&'static str> {
    lookup(EVENTS, attr)
}

pub fn property_name(attr: &str) -> Option<&'static str> {
    lookup(PROPERTIES, attr)
}

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Entry point names of a rendering API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPoints {
    pub tag: &'static str,
    pub plain_text: &'static str,
    pub markup: &'static str,
    pub property: &'static str,
    pub attribute: &'static str,
    pub event_listener: &'static str,
    pub listener_name_field: &'static str,
    pub listener_func_field: &'static str,
    pub text: &'static str,
    pub value: &'static str,
    pub writers: &'static str,
    pub body_field: &'static str,
}

pub const VECTY: EntryPoints = EntryPoints {
    tag: "Tag",
    plain_text: "PlainText",
    markup: "Markup",
    property: "Property",
    attribute: "Attribute",
    event_listener: "EventListener",
    listener_name_field: "Name",
    listener_func_field: "Listener",
    text: "Text",
    value: "Value",
    writers: "Writers",
    body_field: "Body",
};

/// The package the generated calls are qualified with, and its entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderApi {
    pub package: String,
    pub names: EntryPoints,
}

impl RenderApi {
    pub fn with_package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }
}

impl Default for RenderApi {
    fn default() -> Self {
        Self {
            package: "vecty".to_string(),
            names: VECTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_map_names() {
        assert_eq!(event_name("onClick"), Some("click"));
        assert_eq!(event_name("onMouseLeave"), Some("mouseleave"));
        assert_eq!(event_name("click"), None);
        assert_eq!(property_name("for"), Some("htmlFor"));
        assert_eq!(property_name("disabled"), None);
    }

    #[test]
    fn event_table_is_complete_and_unique() {
        assert_eq!(EVENTS.len(), 44);
        for (i, (name, _)) in EVENTS.iter().enumerate() {
            assert!(EVENTS[i + 1..].iter().all(|(other, _)| other != name));
        }
    }
}
