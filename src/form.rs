//! Declarative form filling.
//!
//! A [`FormPlan`] maps selectors to values per field class; the session
//! applies it with [`Session::fill_form`]. Plans are plain serde data, so a
//! batch of them can come straight out of a JSON file:
//!
//! ```
//! use multipage::FormPlan;
//!
//! let plan: FormPlan = serde_json::from_str(r##"{
//!     "text_inputs": { "#username": "zhangsan", "#email": "z@example.com" },
//!     "checkboxes": { "#newsletter": true, "#agree_terms": true },
//!     "dropdowns": { "#country": "China" }
//! }"##).unwrap();
//! assert_eq!(plan.field_count(), 5);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::session::Session;

// ============================================================================
// FormPlan
// ============================================================================

/// Selector → value mapping for one form submission.
///
/// Ordered maps keep the fill order deterministic run to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormPlan {
    /// Text inputs: selector → value. Empty values are skipped.
    pub text_inputs: BTreeMap<String, String>,
    /// Textareas: selector → value. Empty values are skipped.
    pub textareas: BTreeMap<String, String>,
    /// Checkboxes: selector → desired checked state.
    pub checkboxes: BTreeMap<String, bool>,
    /// Radio buttons to select, in order.
    pub radio_buttons: Vec<String>,
    /// Dropdowns: selector → option label. Empty labels are skipped.
    pub dropdowns: BTreeMap<String, String>,
}

impl FormPlan {
    /// Creates an empty plan.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a text input.
    #[inline]
    #[must_use]
    pub fn with_text(mut self, selector: impl Into<String>, value: impl Into<String>) -> Self {
        self.text_inputs.insert(selector.into(), value.into());
        self
    }

    /// Adds a textarea.
    #[inline]
    #[must_use]
    pub fn with_textarea(mut self, selector: impl Into<String>, value: impl Into<String>) -> Self {
        self.textareas.insert(selector.into(), value.into());
        self
    }

    /// Adds a checkbox with its desired state.
    #[inline]
    #[must_use]
    pub fn with_checkbox(mut self, selector: impl Into<String>, checked: bool) -> Self {
        self.checkboxes.insert(selector.into(), checked);
        self
    }

    /// Adds a radio button to select.
    #[inline]
    #[must_use]
    pub fn with_radio(mut self, selector: impl Into<String>) -> Self {
        self.radio_buttons.push(selector.into());
        self
    }

    /// Adds a dropdown selection by option label.
    #[inline]
    #[must_use]
    pub fn with_dropdown(mut self, selector: impl Into<String>, label: impl Into<String>) -> Self {
        self.dropdowns.insert(selector.into(), label.into());
        self
    }

    /// Total number of fields in the plan.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.text_inputs.len()
            + self.textareas.len()
            + self.checkboxes.len()
            + self.radio_buttons.len()
            + self.dropdowns.len()
    }

    /// Returns `true` when the plan has no fields at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }
}

// ============================================================================
// Session - Form Filling
// ============================================================================

impl Session {
    /// Applies a [`FormPlan`] to the current page, field class by field
    /// class.
    ///
    /// Each step logs its selector and value and propagates failure, so a
    /// caller looping over records decides whether to skip the record and
    /// continue with the next one.
    pub async fn fill_form(&mut self, plan: &FormPlan) -> Result<()> {
        info!(fields = plan.field_count(), "Filling form from plan");

        for (selector, value) in &plan.text_inputs {
            if value.is_empty() {
                debug!(selector, "Skipping empty text input");
                continue;
            }
            self.fill(selector, value).await?;
        }

        for (selector, value) in &plan.textareas {
            if value.is_empty() {
                debug!(selector, "Skipping empty textarea");
                continue;
            }
            self.fill(selector, value).await?;
        }

        for (selector, checked) in &plan.checkboxes {
            self.set_checkbox(selector, *checked).await?;
        }

        for selector in &plan.radio_buttons {
            self.set_checkbox(selector, true).await?;
        }

        for (selector, label) in &plan.dropdowns {
            if label.is_empty() {
                debug!(selector, "Skipping empty dropdown");
                continue;
            }
            self.select_option(selector, label).await?;
        }

        info!("Form plan applied");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plan() {
        let plan = FormPlan::new();
        assert!(plan.is_empty());
        assert_eq!(plan.field_count(), 0);
    }

    #[test]
    fn test_builder_counts_fields() {
        let plan = FormPlan::new()
            .with_text("#username", "testuser")
            .with_text("#email", "test@example.com")
            .with_textarea("#comments", "hello")
            .with_checkbox("#newsletter", true)
            .with_radio("#gender_male")
            .with_dropdown("#country", "China");

        assert_eq!(plan.field_count(), 6);
        assert!(!plan.is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let plan = FormPlan::new()
            .with_text("#username", "lisi")
            .with_checkbox("#agree_terms", true)
            .with_dropdown("#city", "Shanghai");

        let json = serde_json::to_string(&plan).unwrap();
        let back: FormPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, back);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let plan: FormPlan =
            serde_json::from_str(r##"{ "text_inputs": { "#phone": "13800138000" } }"##).unwrap();
        assert_eq!(plan.field_count(), 1);
        assert!(plan.checkboxes.is_empty());
    }

    #[test]
    fn test_fill_order_is_deterministic() {
        let plan = FormPlan::new()
            .with_text("#b", "2")
            .with_text("#a", "1")
            .with_text("#c", "3");

        let keys: Vec<_> = plan.text_inputs.keys().cloned().collect();
        assert_eq!(keys, ["#a", "#b", "#c"]);
    }
}
