//! Config-driven translations for time-frame labels.
//!
//! [`CatalogLabels`] implements the core [`Labels`] trait from the
//! `[labels]` config section. Missing entries fall back to English.

use std::collections::HashMap;

use activity_core::labels::{EnglishLabels, Labels};

use crate::config::LabelsConfig;

#[derive(Debug, Clone, Default)]
pub struct CatalogLabels {
    messages: HashMap<String, String>,
    months: Option<Vec<String>>,
}

impl CatalogLabels {
    pub fn from_config(config: &LabelsConfig) -> Self {
        Self {
            messages: config.messages.clone(),
            months: config.months.clone(),
        }
    }
}

impl Labels for CatalogLabels {
    fn translate(&self, msgid: &str) -> String {
        match self.messages.get(msgid) {
            Some(translated) => translated.clone(),
            None => EnglishLabels.translate(msgid),
        }
    }

    fn month_label(&self, year: i32, month: u32) -> String {
        let name = self.months.as_ref().and_then(|months| {
            let index = usize::try_from(month).ok()?.checked_sub(1)?;
            months.get(index)
        });
        match name {
            Some(name) => format!("{} {:04}", name, year),
            None => EnglishLabels.month_label(year, month),
        }
    }
}
