//! Zone model holding both encodings of the board.

use serde::{Deserialize, Serialize};

use crate::zone::{ZoneContent, ZoneId, ZonePatch};
use crate::{GameError, GameResult};

/// Which representation of the board is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Code tiles.
    #[default]
    Code,
    /// Donuts and inner circles.
    Visual,
}

impl View {
    /// The view reached by toggling.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Code => Self::Visual,
            Self::Visual => Self::Code,
        }
    }

    /// Id of the container element for this view.
    #[must_use]
    pub const fn container_id(self) -> &'static str {
        match self {
            Self::Code => "code-mode-container",
            Self::Visual => "visual-mode-container",
        }
    }
}

/// Per-zone content for the code and the visual encodings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneModel {
    code: [ZoneContent; 3],
    visual: [ZoneContent; 3],
}

impl ZoneModel {
    /// Create a model whose code view holds `code`; the visual view starts
    /// empty until the first sync.
    #[must_use]
    pub fn new(code: [ZoneContent; 3]) -> Self {
        Self {
            code,
            visual: [ZoneContent::empty(); 3],
        }
    }

    /// Content of a zone in the given view.
    #[must_use]
    pub fn zone(&self, view: View, id: ZoneId) -> &ZoneContent {
        &self.zones_of(view)[id.index()]
    }

    /// Mutable content of a zone in the given view.
    pub fn zone_mut(&mut self, view: View, id: ZoneId) -> &mut ZoneContent {
        match view {
            View::Code => &mut self.code[id.index()],
            View::Visual => &mut self.visual[id.index()],
        }
    }

    /// Mutable access to two distinct zones of the same view.
    ///
    /// # Errors
    ///
    /// Returns an error if `a` and `b` are the same zone.
    pub fn pair_mut(
        &mut self,
        view: View,
        a: ZoneId,
        b: ZoneId,
    ) -> GameResult<(&mut ZoneContent, &mut ZoneContent)> {
        if a == b {
            return Err(GameError::InvalidOperation(format!(
                "zone {a} cannot be paired with itself"
            )));
        }
        let zones = match view {
            View::Code => &mut self.code,
            View::Visual => &mut self.visual,
        };
        let (low, high) = if a.index() < b.index() { (a, b) } else { (b, a) };
        let (head, tail) = zones.split_at_mut(high.index());
        let low_ref = &mut head[low.index()];
        let high_ref = &mut tail[0];
        if a == low {
            Ok((low_ref, high_ref))
        } else {
            Ok((high_ref, low_ref))
        }
    }

    /// Apply a partial update to one zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the patch would put the neutral option kind into
    /// the code view, which has no textual form for it.
    pub fn set_zone(&mut self, view: View, id: ZoneId, patch: ZonePatch) -> GameResult<()> {
        if view == View::Code && matches!(patch.options, Some(Some(set)) if set.is_neutral()) {
            return Err(GameError::InvalidOperation(format!(
                "zone {id}: the neutral option set has no code form"
            )));
        }
        self.zone_mut(view, id).apply(patch);
        Ok(())
    }

    /// Replace a zone's content wholesale.
    pub fn replace_zone(&mut self, view: View, id: ZoneId, content: ZoneContent) {
        *self.zone_mut(view, id) = content;
    }

    /// All zones of a view in display order.
    pub fn zones(&self, view: View) -> impl Iterator<Item = (ZoneId, &ZoneContent)> {
        ZoneId::ALL.into_iter().zip(self.zones_of(view).iter())
    }

    fn zones_of(&self, view: View) -> &[ZoneContent; 3] {
        match view {
            View::Code => &self.code,
            View::Visual => &self.visual,
        }
    }
}
