// src/tabs.rs

use crate::error::ContinuationError;
use maud::{html, Markup};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

const HEADER_BASE_CLASS: &str = "text-xs font-bold uppercase px-5 py-3 shadow-lg rounded block leading-normal";

/// The accent colour used when the caller does not pick one.
pub const DEFAULT_ACCENT: &str = "blue";

/// One labelled tab.
///
/// `K` is the caller's enumerated content key type, so a descriptor can only
/// name content that exists as a variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabDescriptor<K> {
    /// Translation key of the tab label.
    pub name: String,
    /// Icon name, rendered as `fas fa-<icon>`.
    pub icon: String,
    pub content_key: K,
}

impl<K> TabDescriptor<K> {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, content_key: K) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            content_key,
        }
    }
}

/// Shows exactly one of several content blocks at a time.
///
/// All content blocks stay owned by the panel for its whole lifetime;
/// switching tabs only changes which one is visible, so per-block state
/// survives.
#[derive(Debug)]
pub struct SelectionPanel<K, C> {
    tabs: Vec<TabDescriptor<K>>,
    block: BTreeMap<K, C>,
    accent: String,
    selected: usize,
}

impl<K, C> SelectionPanel<K, C>
where
    K: Copy + Ord + fmt::Debug,
{
    /// Creates a panel with the first tab selected.
    ///
    /// # Errors
    ///
    /// `EmptyTabs` if `tabs` is empty, `MissingTabContent` if any tab's key
    /// has no entry in `block`.
    pub fn new(tabs: Vec<TabDescriptor<K>>, block: BTreeMap<K, C>) -> Result<Self, ContinuationError> {
        if tabs.is_empty() {
            return Err(ContinuationError::EmptyTabs);
        }
        if let Some(tab) = tabs.iter().find(|tab| !block.contains_key(&tab.content_key)) {
            return Err(ContinuationError::MissingTabContent(format!("{:?}", tab.content_key)));
        }
        Ok(Self {
            tabs,
            block,
            accent: DEFAULT_ACCENT.to_string(),
            selected: 0,
        })
    }

    /// Sets the accent colour used in the header classes.
    pub fn with_accent(mut self, accent: impl Into<String>) -> Self {
        self.accent = accent.into();
        self
    }

    pub fn tabs(&self) -> &[TabDescriptor<K>] {
        &self.tabs
    }

    /// The active tab index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_tab(&self) -> &TabDescriptor<K> {
        &self.tabs[self.selected]
    }

    /// Makes tab `index` the active one. Selecting the active tab is a no-op.
    ///
    /// # Errors
    ///
    /// `TabIndexOutOfRange` if `index` is past the last tab; the selection is
    /// left unchanged.
    pub fn select(&mut self, index: usize) -> Result<(), ContinuationError> {
        if index >= self.tabs.len() {
            return Err(ContinuationError::TabIndexOutOfRange {
                index,
                len: self.tabs.len(),
            });
        }
        if index != self.selected {
            debug!(from = self.selected, to = index, "Switching tab.");
            self.selected = index;
        }
        Ok(())
    }

    /// The content of the active tab.
    pub fn active_content(&self) -> Option<&C> {
        self.block.get(&self.selected_tab().content_key)
    }

    pub fn content(&self, key: K) -> Option<&C> {
        self.block.get(&key)
    }

    /// Mutable access to a content block, visible or not.
    pub fn content_mut(&mut self, key: K) -> Option<&mut C> {
        self.block.get_mut(&key)
    }

    /// Renders every header and every content pane; only the active pane
    /// is visible.
    pub fn render(&self) -> PanelView<'_, C> {
        let headers = self
            .tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| {
                let active = index == self.selected;
                TabHeaderView {
                    index,
                    label: tab.name.clone(),
                    icon_class: format!("fas fa-{} text-base mr-1", tab.icon),
                    class: header_class(&self.accent, active),
                    active,
                }
            })
            .collect();

        let panes = self
            .tabs
            .iter()
            .enumerate()
            .filter_map(|(index, tab)| {
                self.block.get(&tab.content_key).map(|content| ContentPaneView {
                    index,
                    id: format!("link{index}"),
                    visible: index == self.selected,
                    content,
                })
            })
            .collect();

        PanelView { headers, panes }
    }
}

fn header_class(accent: &str, active: bool) -> String {
    if active {
        format!("{HEADER_BASE_CLASS} text-white bg-gradient-to-r from-{accent}-500 to-blue-500 hover:bg-gradient-to-bl")
    } else {
        format!("{HEADER_BASE_CLASS} text-{accent}-600 bg-white")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabHeaderView {
    pub index: usize,
    /// Translation key of the label.
    pub label: String,
    pub icon_class: String,
    pub class: String,
    pub active: bool,
}

#[derive(Debug)]
pub struct ContentPaneView<'a, C> {
    pub index: usize,
    pub id: String,
    pub visible: bool,
    pub content: &'a C,
}

impl<C> ContentPaneView<'_, C> {
    pub fn class(&self) -> &'static str {
        if self.visible {
            "block"
        } else {
            "hidden"
        }
    }
}

/// A rendered [`SelectionPanel`].
#[derive(Debug)]
pub struct PanelView<'a, C> {
    pub headers: Vec<TabHeaderView>,
    pub panes: Vec<ContentPaneView<'a, C>>,
}

impl<'a, C> PanelView<'a, C> {
    pub fn active_header(&self) -> Option<&TabHeaderView> {
        self.headers.iter().find(|header| header.active)
    }

    pub fn visible_panes(&self) -> impl Iterator<Item = &ContentPaneView<'a, C>> {
        self.panes.iter().filter(|pane| pane.visible)
    }
}

impl<C: fmt::Display> PanelView<'_, C> {
    /// Renders the panel as markup. Labels are emitted as their translation
    /// keys; content is escaped.
    pub fn to_markup(&self) -> Markup {
        html! {
            ul class="flex mb-0 list-none flex-wrap pt-3 pb-4 flex-row" role="tablist" {
                @for header in &self.headers {
                    li class="-mb-px mr-2 last:mr-0 flex-auto text-center" {
                        a class=(header.class)
                            data-toggle="tab"
                            href=(format!("#link{}", header.index))
                            role="tablist"
                            aria-selected=(if header.active { "true" } else { "false" }) {
                            i class=(header.icon_class) {}
                            " " (header.label)
                        }
                    }
                }
            }
            div class="tab-content tab-space" {
                @for pane in &self.panes {
                    div class=(pane.class()) id=(pane.id) {
                        (pane.content.to_string())
                    }
                }
            }
        }
    }

    pub fn to_html(&self) -> String {
        self.to_markup().into_string()
    }
}
