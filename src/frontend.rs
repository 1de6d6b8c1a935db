//! Seam to the rendering layer.
//!
//! The drawer core hands the frontend a ready-made, sorted, categorized
//! data set and otherwise knows nothing about windows or widgets.

use crate::index::EntryIndex;
use crate::model::{AppEntry, Category};
use crate::pins::Pins;
use log::info;

/// Everything the rendering layer needs to draw one drawer state.
pub struct DrawerView<'a> {
    pub summary: String,
    /// Catalog order: 8 sorted categories, then "other".
    pub categories: &'a [Category],
    /// Visible bucket members, in catalog order.
    pub buckets: Vec<(&'static str, Vec<&'a AppEntry>)>,
    /// Pinned entries that still resolve, in pin order.
    pub pinned: Vec<&'a AppEntry>,
    /// All visible entries, sorted by localized name.
    pub entries: Vec<&'a AppEntry>,
}

impl<'a> DrawerView<'a> {
    pub fn build(
        summary: String,
        categories: &'a [Category],
        index: &'a EntryIndex,
        pins: &'a Pins,
    ) -> Self {
        let buckets = categories
            .iter()
            .map(|category| {
                let members = index
                    .bucket(category.name)
                    .iter()
                    .filter_map(|id| index.get(id))
                    .filter(|entry| !entry.hidden)
                    .collect();
                (category.name, members)
            })
            .collect();
        let pinned = pins
            .items()
            .iter()
            .filter_map(|id| index.get(id.as_str()))
            .collect();
        let entries = index.entries().iter().filter(|e| !e.hidden).collect();
        Self {
            summary,
            categories,
            buckets,
            pinned,
            entries,
        }
    }
}

pub trait Frontend {
    /// The window becomes visible with this data set.
    fn present(&mut self, view: &DrawerView);
    /// The window hides; search text, category filter and scroll position
    /// are reset so the next present starts clean.
    fn withdraw(&mut self);
}

/// Stand-in used when no rendering layer is attached.
pub struct HeadlessFrontend;

impl Frontend for HeadlessFrontend {
    fn present(&mut self, view: &DrawerView) {
        info!(
            "drawer visible: {} ({} pinned, {} categories)",
            view.summary,
            view.pinned.len(),
            view.categories.len()
        );
    }

    fn withdraw(&mut self) {
        info!("drawer hidden, search state reset");
    }
}
