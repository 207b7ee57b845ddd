use super::Style;
use crate::element::Element;

/// What a rule matches on. Classes and attributes are the interesting
/// cases: widgets toggle them at runtime, so presentation follows state
/// without the widgets knowing anything about styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    /// Matches when the attribute is present (value `None`) or carries
    /// exactly the given value.
    Attr { key: String, value: Option<String> },
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    pub fn attr(key: impl Into<String>) -> Self {
        Self::Attr {
            key: key.into(),
            value: None,
        }
    }

    pub fn attr_eq(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Attr {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Id(id) => element.id == *id,
            Selector::Class(class) => element.has_class(class),
            Selector::Attr { key, value } => match element.get_attr(key) {
                Some(actual) => value.as_deref().map_or(true, |v| v == actual),
                None => false,
            },
        }
    }
}

/// Ordered list of selector/style rules. Later rules override earlier
/// ones for the properties they set.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: Vec<(Selector, Style)>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, selector: Selector, style: Style) -> Self {
        self.rules.push((selector, style));
        self
    }

    pub fn class(self, class: impl Into<String>, style: Style) -> Self {
        self.rule(Selector::class(class), style)
    }

    pub fn id(self, id: impl Into<String>, style: Style) -> Self {
        self.rule(Selector::id(id), style)
    }

    pub fn attr_eq(self, key: impl Into<String>, value: impl Into<String>, style: Style) -> Self {
        self.rule(Selector::attr_eq(key, value), style)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fold all matching rules into one style, in rule order.
    pub fn resolve(&self, element: &Element) -> Style {
        let mut resolved = Style::default();
        for (selector, style) in &self.rules {
            if selector.matches(element) {
                apply(&mut resolved, style);
            }
        }
        resolved
    }
}

fn apply(base: &mut Style, over: &Style) {
    if let Some(background) = over.background {
        base.background = Some(background);
    }
    if let Some(foreground) = over.foreground {
        base.foreground = Some(foreground);
    }
    base.text_style.bold |= over.text_style.bold;
    base.text_style.italic |= over.text_style.italic;
    base.text_style.underline |= over.text_style.underline;
    base.text_style.dim |= over.text_style.dim;
}
