//! Stand-ins for the page elements that sit around the 3D canvas.
//!
//! The crate never touches a real DOM. These structs record the class names and inline
//! opacities the page would carry so a host can mirror them.

use std::collections::BTreeSet;

/// Device orientation on touch platforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Taller than wide.
    Portrait,
    /// Wider than tall.
    Landscape,
}

impl Orientation {
    /// CSS class carried by the overlay for this orientation.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Portrait => Self::Landscape,
            Self::Landscape => Self::Portrait,
        }
    }
}

/// Where the page runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Platform {
    /// Mouse and wide screen.
    #[default]
    Desktop,
    /// Phone or tablet.
    Mobile {
        /// Current orientation.
        orientation: Orientation,
    },
}

impl Platform {
    /// `true` for phones and tablets.
    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile { .. })
    }
}

/// The introduction overlay shown at the end of the credits act.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Overlay {
    classes: BTreeSet<String>,
    /// Inline opacity of the inner panel.
    pub panel_opacity: f64,
    /// Inline opacity of the loading progress container.
    pub loading_opacity: f64,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            classes: BTreeSet::new(),
            panel_opacity: 0.0,
            loading_opacity: 1.0,
        }
    }
}

impl Overlay {
    /// Add a class. Adding an existing class is a no-op.
    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_owned());
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Whether `class` is set.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Current classes, sorted.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// `true` once the overlay has been animated in and its panel is opaque.
    pub fn is_visible(&self) -> bool {
        self.has_class("animated") && self.panel_opacity >= 1.0
    }

    /// Start the overlay's CSS animation, tagging mobile layouts.
    pub fn reveal(&mut self, platform: Platform) {
        self.add_class("animated");
        if let Platform::Mobile { orientation } = platform {
            self.add_class("mobile");
            self.add_class(orientation.class_name());
        }
    }

    fn swap_orientation(&mut self, orientation: Orientation) {
        self.add_class(orientation.class_name());
        self.remove_class(orientation.other().class_name());
    }
}

/// The canvas element and the "rotate your device" prompt.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Surface {
    /// Inline opacity of the canvas.
    pub canvas_opacity: f64,
    /// Inline opacity of the orientation prompt.
    pub prompt_opacity: f64,
    /// Whether the prompt carries the `hide` class.
    pub prompt_hidden: bool,
}

impl Surface {
    /// Page `load` handling for touch platforms.
    ///
    /// Desktop pages fade the canvas in with a tween instead, which the stage schedules.
    pub fn page_loaded_mobile(&mut self, orientation: Orientation) {
        self.prompt_opacity = 1.0;
        self.canvas_opacity = 0.0;
        if orientation == Orientation::Landscape {
            self.prompt_hidden = true;
            self.canvas_opacity = 1.0;
        }
    }
}

/// Apply an `orientationchange` to the page. Only touch platforms receive these.
pub fn apply_orientation(
    overlay: &mut Overlay,
    surface: &mut Surface,
    orientation: Orientation,
    credits_visible: bool,
) {
    match orientation {
        Orientation::Portrait => {
            overlay.swap_orientation(Orientation::Portrait);
            surface.prompt_hidden = false;
            surface.canvas_opacity = 0.0;
        }
        Orientation::Landscape => {
            surface.prompt_hidden = true;
            surface.canvas_opacity = 1.0;
            if credits_visible {
                overlay.swap_orientation(Orientation::Landscape);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/overlay.rs"]
mod tests;
