//! Model preference hints and the policies that turn them into a model choice.

use serde::{Deserialize, Serialize};

/// Priority hints attached to an exchange.
///
/// Each priority is in `[0, 1]`. They are hints, not commands: the backend
/// decides which model actually serves the request.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct ModelPreferences {
    /// How much the caller values capability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intelligence_priority: Option<f32>,
    /// How much the caller values low cost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost_priority: Option<f32>,
    /// How much the caller values latency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed_priority: Option<f32>,
}

impl ModelPreferences {
    /// Preferences that ask for the strongest available model.
    ///
    /// # Examples
    ///
    /// ```
    /// use coder_core::ModelPreferences;
    ///
    /// let prefs = ModelPreferences::quality();
    /// assert_eq!(*prefs.intelligence_priority(), Some(1.0));
    /// ```
    pub fn quality() -> Self {
        Self {
            intelligence_priority: Some(1.0),
            ..Default::default()
        }
    }

    /// Set the intelligence priority.
    pub fn with_intelligence_priority(mut self, priority: f32) -> Self {
        self.intelligence_priority = Some(priority);
        self
    }

    /// Set the cost priority.
    pub fn with_cost_priority(mut self, priority: f32) -> Self {
        self.cost_priority = Some(priority);
        self
    }

    /// Set the speed priority.
    pub fn with_speed_priority(mut self, priority: f32) -> Self {
        self.speed_priority = Some(priority);
        self
    }
}

/// The two model classes a backend chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum ModelTier {
    /// Cheaper, faster model
    #[default]
    #[display("fast")]
    Fast,
    /// Stronger model for high-stakes stages
    #[display("strong")]
    Strong,
}

/// Rule that maps preferences to a [`ModelTier`].
///
/// Both variants read "prefer quality when the caller says it matters more
/// than cost". Without preferences the fast model is always chosen.
///
/// # Examples
///
/// ```
/// use coder_core::{ModelPreferences, ModelTier, SelectionPolicy};
///
/// let direct = SelectionPolicy::default();
/// assert_eq!(direct.select(None), ModelTier::Fast);
/// assert_eq!(direct.select(Some(&ModelPreferences::quality())), ModelTier::Strong);
///
/// let host = SelectionPolicy::Comparative;
/// let prefs = ModelPreferences::default()
///     .with_intelligence_priority(0.6)
///     .with_cost_priority(0.4);
/// assert_eq!(host.select(Some(&prefs)), ModelTier::Strong);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPolicy {
    /// Strong model when `intelligence_priority` equals the given level.
    ExactLevel(f32),
    /// Strong model when `intelligence_priority > cost_priority` (absent
    /// values count as zero).
    Comparative,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::ExactLevel(1.0)
    }
}

impl SelectionPolicy {
    /// Pick a model tier for the given preferences.
    pub fn select(&self, preferences: Option<&ModelPreferences>) -> ModelTier {
        let Some(prefs) = preferences else {
            return ModelTier::Fast;
        };

        let strong = match self {
            SelectionPolicy::ExactLevel(level) => prefs.intelligence_priority == Some(*level),
            SelectionPolicy::Comparative => {
                prefs.intelligence_priority.unwrap_or(0.0) > prefs.cost_priority.unwrap_or(0.0)
            }
        };

        if strong {
            ModelTier::Strong
        } else {
            ModelTier::Fast
        }
    }
}
