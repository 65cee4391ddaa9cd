#![forbid(unsafe_code)]

//! Navigation menu data model.
//!
//! A [`MenuModel`] is built once at startup (catalog-derived entries for
//! the first navigation item plus hand-authored items) and is immutable
//! afterwards. The overlay controller only ever reads it.
//!
//! # Invariants
//!
//! 1. Item ids are unique and the set is fixed at build time.
//! 2. At most one item carries the account designation; selecting it
//!    highlights the item without replacing displayed content.
//! 3. The item list is never empty.

use std::fmt;

use crate::catalog::{Catalog, CatalogError, CatalogRecord};
use crate::text::bullet_points;

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Reference to an image asset owned by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    /// Reference a host asset by key or URL.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The placeholder asset used for catalog-derived entries.
    #[must_use]
    pub fn placeholder() -> Self {
        Self("placeholder.jpg".to_string())
    }

    /// The asset key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One entry of a navigation item's submenu.
///
/// Entries vary in shape: catalog-derived ones carry a description and an
/// image, authored ones usually just a link. Optional fields model that
/// variance; absent means the renderer omits the affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmenuEntry {
    /// Stable identity within the submenu.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Bullet-delimited free text, if any.
    pub description: Option<String>,

    /// Link target, if any.
    pub link: Option<String>,

    /// Image to render alongside the entry, if any.
    pub image: Option<ImageRef>,

    /// Small classification badge, if any.
    pub meta: Option<String>,
}

impl SubmenuEntry {
    /// An entry with a name and a link, nothing else. The common shape for
    /// hand-authored menu content.
    #[must_use]
    pub fn link(id: impl Into<String>, name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            link: Some(link.into()),
            image: None,
            meta: None,
        }
    }

    /// Map one catalog record to a submenu entry: description carried over,
    /// an anchor link generated from the id unless the record names one, and
    /// the placeholder image.
    #[must_use]
    pub fn from_record(record: &CatalogRecord) -> Self {
        let link = record
            .link
            .clone()
            .unwrap_or_else(|| format!("#{}", record.id));
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            description: Some(record.description_short.clone()),
            link: Some(link),
            image: Some(ImageRef::placeholder()),
            meta: record.meta.clone(),
        }
    }

    /// The description segmented into trimmed bullet items.
    #[must_use]
    pub fn description_bullets(&self) -> Vec<String> {
        self.description
            .as_deref()
            .map(bullet_points)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// One top-level navigation item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    id: String,
    label: String,
    submenu: Vec<SubmenuEntry>,
}

impl MenuItem {
    /// An item without a submenu.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            submenu: Vec::new(),
        }
    }

    /// Attach submenu entries.
    #[must_use]
    pub fn with_submenu(mut self, entries: Vec<SubmenuEntry>) -> Self {
        self.submenu = entries;
        self
    }

    /// Stable identity.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the item opens a submenu pane.
    #[must_use]
    pub fn has_submenu(&self) -> bool {
        !self.submenu.is_empty()
    }

    /// Submenu entries in catalog/authored order.
    #[must_use]
    pub fn submenu(&self) -> &[SubmenuEntry] {
        &self.submenu
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// The complete, immutable navigation menu.
#[derive(Debug, Clone)]
pub struct MenuModel {
    items: Vec<MenuItem>,
    account_id: Option<String>,
}

impl MenuModel {
    /// Start building a menu.
    #[must_use]
    pub fn builder() -> MenuModelBuilder {
        MenuModelBuilder {
            items: Vec::new(),
            account_ids: Vec::new(),
        }
    }

    /// The shipped page's menu: catalog submenu under the leading "Models"
    /// item, authored link entries for the rest, and the account item.
    pub fn standard(catalog: &Catalog) -> Result<Self, MenuError> {
        let records = catalog.require_content()?;
        let models = MenuItem::new("models", "Models")
            .with_submenu(records.iter().map(SubmenuEntry::from_record).collect());
        Self::builder()
            .item(models)
            .item(MenuItem::new("about", "About us").with_submenu(vec![
                SubmenuEntry::link("configurator", "Configurator", "#"),
                SubmenuEntry::link("financing", "Financing & insurance", "#"),
                SubmenuEntry::link("e-performance", "E-Performance", "#"),
            ]))
            .item(MenuItem::new("shop", "Shop"))
            .item(MenuItem::new("services", "Services").with_submenu(vec![
                SubmenuEntry::link("assistance", "Assistance 24/7", "#"),
                SubmenuEntry::link("motorsport", "Motorsport", "#"),
                SubmenuEntry::link("communities", "Owner communities", "#"),
            ]))
            .account_item(MenuItem::new("account", "Account"))
            .build()
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether `id` names an item of this menu.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Whether `id` is the designated account item.
    #[must_use]
    pub fn is_account(&self, id: &str) -> bool {
        self.account_id.as_deref() == Some(id)
    }

    /// Id of the first item. The default selection on mount.
    #[must_use]
    pub fn first_id(&self) -> &str {
        // Builder guarantees a non-empty item list.
        &self.items[0].id
    }
}

/// Builder for [`MenuModel`]; validates the invariants once at `build`.
#[derive(Debug)]
pub struct MenuModelBuilder {
    items: Vec<MenuItem>,
    account_ids: Vec<String>,
}

impl MenuModelBuilder {
    /// Append a regular item.
    #[must_use]
    pub fn item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    /// Append an item and designate it as the account item.
    #[must_use]
    pub fn account_item(mut self, item: MenuItem) -> Self {
        self.account_ids.push(item.id.clone());
        self.items.push(item);
        self
    }

    /// Validate and build the model.
    pub fn build(self) -> Result<MenuModel, MenuError> {
        if self.items.is_empty() {
            return Err(MenuError::Empty);
        }
        if self.account_ids.len() > 1 {
            return Err(MenuError::MultipleAccountItems);
        }
        for (i, item) in self.items.iter().enumerate() {
            if self.items[..i].iter().any(|other| other.id == item.id) {
                return Err(MenuError::DuplicateId(item.id.clone()));
            }
        }
        Ok(MenuModel {
            items: self.items,
            account_id: self.account_ids.into_iter().next(),
        })
    }
}

/// Menu construction failure.
#[derive(Debug)]
pub enum MenuError {
    /// The catalog backing the menu failed to load.
    Catalog(CatalogError),

    /// No items were provided.
    Empty,

    /// Two items share an id.
    DuplicateId(String),

    /// More than one item was designated as the account item.
    MultipleAccountItems,
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "menu catalog: {err}"),
            Self::Empty => write!(f, "menu has no items"),
            Self::DuplicateId(id) => write!(f, "duplicate menu item id: {id}"),
            Self::MultipleAccountItems => write!(f, "more than one account item designated"),
        }
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CatalogError> for MenuError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
