//! The parsed document and the only DOM mutations this crate performs.
//!
//! Extraction borrows the page read-only. Trigger insertion and removal
//! mutate the tree in place; both only ever touch elements carrying
//! [`TRIGGER_ATTR`], so tables and their cells are never altered.

use std::collections::HashSet;

use html_escape::encode_double_quoted_attribute;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

use crate::adapter::widget::has_class;
use crate::adapter::TableHandle;
use crate::config::{TriggerStyle, WidgetMarkers};
use crate::error::{Result, TableError};

/// Attribute marking elements inserted by [`Page::add_triggers`].
pub const TRIGGER_ATTR: &str = "data-table2csv-trigger";

static STANDARD_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("valid selector"));
static ARIA_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[role="table"], [role="grid"]"#).expect("valid selector"));
static TRIGGER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(&format!("[{TRIGGER_ATTR}]")).expect("valid selector"));
static BUTTON: Lazy<Selector> = Lazy::new(|| Selector::parse("button").expect("valid selector"));
static ICON: Lazy<Selector> = Lazy::new(|| Selector::parse("i").expect("valid selector"));

/// A parsed HTML document.
pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn document(&self) -> &Html {
        &self.html
    }

    /// Serialize the (possibly modified) document back to HTML.
    pub fn to_html(&self) -> String {
        self.html.html()
    }

    /// Every table-like element, each once.
    ///
    /// Order: `<table>` elements, then ARIA tables/grids, then widget
    /// collection containers, each group in document order.
    pub fn candidates(&self, markers: &WidgetMarkers) -> Vec<ElementRef<'_>> {
        let root = self.html.root_element();
        let widgets = root
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| has_class(*el, &markers.collection_class));

        let mut seen = HashSet::new();
        root.select(&STANDARD_TABLE)
            .chain(root.select(&ARIA_TABLE))
            .chain(widgets)
            .filter(|el| seen.insert(el.id()))
            .collect()
    }

    /// Inserted triggers in document order.
    pub fn triggers(&self) -> Vec<ElementRef<'_>> {
        self.html.root_element().select(&TRIGGER).collect()
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers().len()
    }

    /// Insert a trigger as the first child of every candidate lacking one.
    ///
    /// Each trigger records its candidate's index in [`TRIGGER_ATTR`], so the
    /// link survives a serialize/reparse cycle that moves the button.
    /// Returns how many were inserted; calling it again inserts none.
    pub fn add_triggers(&mut self, style: &TriggerStyle, markers: &WidgetMarkers) -> usize {
        let linked: HashSet<usize> = self.triggers().into_iter().filter_map(linked_candidate).collect();

        let targets: Vec<_> = self
            .candidates(markers)
            .into_iter()
            .enumerate()
            .filter(|(index, el)| !linked.contains(index) && !has_unlinked_trigger(*el))
            .map(|(index, el)| (index, el.id()))
            .collect();

        for (index, id) in &targets {
            let template = TriggerTemplate::new(style, *index);
            if let Some(mut node) = self.html.tree.get_mut(*id) {
                let mut button = node.prepend(template.button);
                button.append(template.icon);
            }
        }

        tracing::debug!("Inserted {} download triggers", targets.len());
        targets.len()
    }

    /// Detach every inserted trigger. Returns how many were removed.
    pub fn remove_triggers(&mut self) -> usize {
        let ids: Vec<_> = self.triggers().iter().map(|el| el.id()).collect();

        for id in &ids {
            if let Some(mut node) = self.html.tree.get_mut(*id) {
                node.detach();
            }
        }

        tracing::debug!("Removed {} download triggers", ids.len());
        ids.len()
    }

    /// Classify the table that trigger `index` belongs to.
    ///
    /// A trigger carrying a candidate index resolves to that candidate.
    /// Unlinked triggers fall back to position: the parent first, then the
    /// following sibling, since an HTML parser moves a `<button>` found
    /// directly inside `<table>` out in front of it.
    pub fn trigger_table(&self, index: usize, markers: &WidgetMarkers) -> Result<TableHandle<'_>> {
        let trigger = self
            .triggers()
            .into_iter()
            .nth(index)
            .ok_or(TableError::TriggerNotFound(index))?;

        if let Some(target) = linked_candidate(trigger) {
            let root = self.candidates(markers).into_iter().nth(target).ok_or_else(|| {
                TableError::ExtractionFailure(format!(
                    "trigger {index} points at table {target}, which is not on the page"
                ))
            })?;
            return TableHandle::classify(root, markers);
        }

        let parent = trigger.parent().and_then(ElementRef::wrap);
        let next = trigger.next_siblings().find_map(ElementRef::wrap);

        parent
            .into_iter()
            .chain(next)
            .find_map(|node| TableHandle::classify(node, markers).ok())
            .ok_or_else(|| {
                TableError::ExtractionFailure(format!("trigger {index} is not attached to a table"))
            })
    }
}

impl From<Html> for Page {
    fn from(html: Html) -> Self {
        Self { html }
    }
}

/// Candidate index recorded on a trigger, if any.
fn linked_candidate(trigger: ElementRef<'_>) -> Option<usize> {
    trigger.value().attr(TRIGGER_ATTR)?.trim().parse().ok()
}

/// `true` if `el` owns a trigger without a recorded index, either as a
/// direct child or as the element right before it.
fn has_unlinked_trigger(el: ElementRef<'_>) -> bool {
    let is_unlinked = |node: ElementRef<'_>| {
        node.value().attr(TRIGGER_ATTR).is_some() && linked_candidate(node).is_none()
    };

    el.children().filter_map(ElementRef::wrap).any(is_unlinked)
        || el
            .prev_siblings()
            .find_map(ElementRef::wrap)
            .is_some_and(is_unlinked)
}

/// Detached button and icon nodes for one trigger.
struct TriggerTemplate {
    button: Node,
    icon: Node,
}

impl TriggerTemplate {
    fn new(style: &TriggerStyle, target: usize) -> Self {
        let markup = format!(
            r#"<button class="{}" type="button" {TRIGGER_ATTR}="{target}"><i class="{}"></i></button>"#,
            encode_double_quoted_attribute(&style.button_class),
            encode_double_quoted_attribute(&style.icon_class),
        );
        let fragment = Html::parse_fragment(&markup);
        let button = fragment
            .select(&BUTTON)
            .next()
            .expect("trigger markup always contains a button");
        let icon = button
            .select(&ICON)
            .next()
            .expect("trigger markup always contains an icon");

        Self {
            button: Node::Element(button.value().clone()),
            icon: Node::Element(icon.value().clone()),
        }
    }
}
