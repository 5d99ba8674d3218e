//! Menus
//!
//! Navigation entries, their public URLs and the active tree shown for a menu type.

use std::{collections::HashMap, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Highest allowed display order.
pub const MAX_MENU_ORDER: u16 = 1000;

/// Unrecognised menu type identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown menu type {0:?}")]
pub struct UnknownMenuType(pub String);

/// Where a menu is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuType {
    /// Site header.
    #[default]
    Main,

    /// Site footer.
    Footer,
}

impl MenuType {
    /// Stable identifier used in storage and transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Footer => "footer",
        }
    }
}

impl FromStr for MenuType {
    type Err = UnknownMenuType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "main" => Ok(Self::Main),
            "footer" => Ok(Self::Footer),
            other => Err(UnknownMenuType(other.to_string())),
        }
    }
}

/// Public URL for a stored menu link.
///
/// Legacy storefront paths are rewritten to their current locations; absolute links pass through.
#[must_use]
pub fn resolve_menu_url(url: Option<&str>) -> String {
    let Some(url) = url.filter(|url| !url.is_empty()) else {
        return "#".to_string();
    };

    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }

    if let Some(rest) = url.strip_prefix("/products/") {
        return format!("/shop/{rest}");
    }

    match url {
        "/products" => "/shop/".to_string(),
        "/about/" => "/About_us/".to_string(),
        "/contact/" => "/Contact_us/".to_string(),
        other => other.to_string(),
    }
}

/// A stored menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Entry identifier.
    pub uuid: Uuid,

    /// Parent entry, `None` at the top level.
    pub parent: Option<Uuid>,

    /// Link text.
    pub title: String,

    /// Stored link, possibly empty.
    pub url: Option<String>,

    /// Display order, `0..=MAX_MENU_ORDER`.
    pub order: u16,

    /// Hidden entries (and their subtrees) are skipped.
    pub is_active: bool,

    /// Menu this entry belongs to.
    pub menu_type: MenuType,
}

/// A rendered menu node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    /// Link text.
    pub title: String,

    /// Resolved link.
    pub url: String,

    /// Active children, ordered.
    pub children: Vec<MenuNode>,
}

/// Build the active tree for `menu_type`, ordered by `(order, title)` at every level.
#[must_use]
pub fn build_menu(entries: &[MenuEntry], menu_type: MenuType) -> Vec<MenuNode> {
    let mut by_parent: HashMap<Option<Uuid>, Vec<&MenuEntry>> = HashMap::new();

    for entry in entries
        .iter()
        .filter(|entry| entry.is_active && entry.menu_type == menu_type)
    {
        by_parent.entry(entry.parent).or_default().push(entry);
    }

    for siblings in by_parent.values_mut() {
        siblings.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));
    }

    let mut visited = Vec::new();

    nodes_under(None, &by_parent, &mut visited)
}

fn nodes_under(
    parent: Option<Uuid>,
    by_parent: &HashMap<Option<Uuid>, Vec<&MenuEntry>>,
    visited: &mut Vec<Uuid>,
) -> Vec<MenuNode> {
    let Some(siblings) = by_parent.get(&parent) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(siblings.len());

    for entry in siblings {
        // Cyclic parent links are rendered once.
        if visited.contains(&entry.uuid) {
            continue;
        }

        visited.push(entry.uuid);

        nodes.push(MenuNode {
            title: entry.title.clone(),
            url: resolve_menu_url(entry.url.as_deref()),
            children: nodes_under(Some(entry.uuid), by_parent, visited),
        });
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u128, parent: Option<u128>, title: &str, order: u16) -> MenuEntry {
        MenuEntry {
            uuid: Uuid::from_u128(id),
            parent: parent.map(Uuid::from_u128),
            title: title.to_string(),
            url: Some(format!("/{title}/")),
            order,
            is_active: true,
            menu_type: MenuType::Main,
        }
    }

    #[test]
    fn urls_are_rewritten() {
        assert_eq!(resolve_menu_url(None), "#");
        assert_eq!(resolve_menu_url(Some("")), "#");
        assert_eq!(
            resolve_menu_url(Some("https://example.com/a")),
            "https://example.com/a"
        );
        assert_eq!(resolve_menu_url(Some("/products/shoes")), "/shop/shoes");
        assert_eq!(resolve_menu_url(Some("/products/")), "/shop/");
        assert_eq!(resolve_menu_url(Some("/products")), "/shop/");
        assert_eq!(resolve_menu_url(Some("/about/")), "/About_us/");
        assert_eq!(resolve_menu_url(Some("/contact/")), "/Contact_us/");
        assert_eq!(resolve_menu_url(Some("/blog/")), "/blog/");
    }

    #[test]
    fn tree_orders_by_order_then_title() {
        let entries = [
            entry(1, None, "shop", 2),
            entry(2, None, "about", 1),
            entry(3, None, "blog", 1),
            entry(4, Some(1), "women", 5),
            entry(5, Some(1), "men", 5),
        ];

        let menu = build_menu(&entries, MenuType::Main);

        let titles: Vec<_> = menu.iter().map(|node| node.title.as_str()).collect();

        assert_eq!(titles, ["about", "blog", "shop"]);

        let children: Vec<_> = menu
            .last()
            .map(|shop| shop.children.iter().map(|node| node.title.clone()).collect())
            .unwrap_or_default();

        assert_eq!(children, ["men", "women"]);
    }

    #[test]
    fn inactive_and_other_types_are_skipped() {
        let mut hidden = entry(1, None, "hidden", 0);
        hidden.is_active = false;

        let mut footer = entry(2, None, "terms", 0);
        footer.menu_type = MenuType::Footer;

        let entries = [hidden, footer, entry(3, Some(1), "orphan", 0)];

        assert!(build_menu(&entries, MenuType::Main).is_empty());
        assert_eq!(build_menu(&entries, MenuType::Footer).len(), 1);
    }
}
