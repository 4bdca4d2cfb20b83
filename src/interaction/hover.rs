use crate::foundation::core::Rgb;
use crate::foundation::error::FolioResult;
use crate::interaction::badge::BadgeId;
use crate::scene::layout::{
    CREDITS_BUTTON_BODY, CREDITS_BUTTON_TEXT, Palette, SKILLS_BUTTON_BODY, SKILLS_BUTTON_TEXT,
};
use crate::scene::model::Scene;
use crate::scene::picking::Hit;

/// Page cursor style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    /// Arrow.
    #[default]
    Default,
    /// Hand, shown over anything pickable.
    Pointer,
}

/// One of the two navigation buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Starts the skills act.
    Skills,
    /// Starts the credits act.
    Credits,
}

impl Button {
    /// Name of the face mesh that receives hover and clicks.
    pub fn body(self) -> &'static str {
        match self {
            Self::Skills => SKILLS_BUTTON_BODY,
            Self::Credits => CREDITS_BUTTON_BODY,
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::Skills => SKILLS_BUTTON_TEXT,
            Self::Credits => CREDITS_BUTTON_TEXT,
        }
    }

    fn from_body(name: &str) -> Option<Self> {
        [Self::Skills, Self::Credits]
            .into_iter()
            .find(|b| b.body() == name)
    }
}

/// Pointer hover bookkeeping for the two buttons and the cursor.
///
/// At most one button is hovered at a time: once one button holds the highlight, a pick list
/// that reaches the other button stops being processed at that hit.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct HoverState {
    skills_hovered: bool,
    credits_hovered: bool,
    cursor: Cursor,
    skills_touched: bool,
    credits_touched: bool,
}

impl HoverState {
    /// Whether the skills button holds the highlight.
    pub fn skills_hovered(&self) -> bool {
        self.skills_hovered
    }

    /// Whether the credits button holds the highlight.
    pub fn credits_hovered(&self) -> bool {
        self.credits_hovered
    }

    /// Whether `button` holds the highlight.
    pub fn is_hovered(&self, button: Button) -> bool {
        match button {
            Button::Skills => self.skills_hovered,
            Button::Credits => self.credits_hovered,
        }
    }

    /// Current cursor style.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn set_hovered(&mut self, button: Button) {
        match button {
            Button::Skills => {
                self.skills_hovered = true;
                self.skills_touched = true;
            }
            Button::Credits => {
                self.credits_hovered = true;
                self.credits_touched = true;
            }
        }
    }

    fn touched(&self, button: Button) -> bool {
        match button {
            Button::Skills => self.skills_touched,
            Button::Credits => self.credits_touched,
        }
    }

    fn paint(scene: &mut Scene, button: Button, face: Rgb, label: Rgb) -> FolioResult<()> {
        let body = scene.require(button.body())?;
        scene.set_color(body, face)?;
        if let Some(text) = scene.find(button.text()) {
            scene.set_color(text, label)?;
        }
        Ok(())
    }

    /// Apply one pointer-move pick list. Returns the badges the pointer asked to spin.
    pub fn on_pointer_move(
        &mut self,
        hits: &[Hit],
        scene: &mut Scene,
        palette: &Palette,
    ) -> FolioResult<Vec<BadgeId>> {
        let mut spins = Vec::new();

        if hits.is_empty() {
            for button in [Button::Skills, Button::Credits] {
                // Buttons keep their initial colour until first hovered.
                if self.touched(button) && scene.find(button.body()).is_some() {
                    Self::paint(scene, button, palette.button_idle, palette.label_idle)?;
                }
            }
            self.skills_hovered = false;
            self.credits_hovered = false;
            self.cursor = Cursor::Default;
            return Ok(spins);
        }

        for hit in hits {
            self.cursor = Cursor::Pointer;

            if let Some(button) = Button::from_body(&hit.name) {
                let other = match button {
                    Button::Skills => Button::Credits,
                    Button::Credits => Button::Skills,
                };
                if self.is_hovered(other) {
                    tracing::debug!(?button, "hover ignored while the other button is hovered");
                    return Ok(spins);
                }
                Self::paint(scene, button, palette.button_hover, palette.label_hover)?;
                self.set_hovered(button);
            }

            if let Some(badge) = BadgeId::from_name(&hit.name) {
                spins.push(badge);
            }
        }
        Ok(spins)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/hover.rs"]
mod tests;
