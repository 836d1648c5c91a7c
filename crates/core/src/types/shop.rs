//! Ticket shop tree and its expand/collapse rendering.
//!
//! A shop is a tree of named groups. Groups reference ticket types by key;
//! the metadata for those keys lives in a dictionary shared by the whole
//! tree. Rendering is a pure function of the tree and an [`ExpansionState`],
//! so toggling a group never mutates the tree itself.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::EventKey;

/// Deserialize `null` as the type's default; the API sends explicit nulls
/// for absent collections and names.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Ticket Types
// =============================================================================

/// Metadata for a single ticket type.
///
/// Stored verbatim inside basket line items, so every field beyond the key
/// is optional: older snapshots must keep deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketTypeInfo {
    /// Ticket type key as reported by the dictionary entry.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Longer description, if any.
    pub description: Option<String>,
    /// Unit price. `None` means free.
    pub price: Option<Decimal>,
    /// ISO 4217 code; falls back to the shop currency when absent.
    pub currency: Option<String>,
    /// Service fee per ticket, informational only.
    pub service_fee: Option<Decimal>,
}

impl TicketTypeInfo {
    /// Name to show for this ticket, never empty.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Ticket"
        } else {
            &self.name
        }
    }

    /// Unit price with an absent price treated as zero.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }
}

// =============================================================================
// Shop Tree
// =============================================================================

/// A group of ticket types, possibly with nested groups.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketGroup {
    /// Group identifier, unique within a shop.
    pub id: i64,
    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    /// Group kind as reported by the API (e.g., "group", "tab").
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    pub sort_index: i64,
    /// Whether the group starts collapsed.
    pub collapsed: bool,
    /// Ticket type keys in display order.
    #[serde(deserialize_with = "null_as_default")]
    pub ticket_types: Vec<String>,
    /// Nested groups in display order.
    #[serde(deserialize_with = "null_as_default")]
    pub children: Vec<Self>,
}

/// The ticket shop for one event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShopTree {
    /// Event this shop belongs to.
    pub key: EventKey,
    /// Display title of the shop.
    pub title: String,
    /// Top-level groups in display order.
    pub children: Vec<TicketGroup>,
    /// Ticket type metadata keyed by ticket type key.
    pub ticket_type_dictionary: HashMap<String, TicketTypeInfo>,
    /// Shop-wide currency used when a ticket type has none.
    pub currency: Option<String>,
}

impl ShopTree {
    /// Whether the shop has no groups to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Look up ticket metadata by key.
    #[must_use]
    pub fn ticket(&self, key: &str) -> Option<&TicketTypeInfo> {
        self.ticket_type_dictionary.get(key)
    }

    /// Find a group anywhere in the tree.
    #[must_use]
    pub fn find_group(&self, id: i64) -> Option<&TicketGroup> {
        fn find(groups: &[TicketGroup], id: i64) -> Option<&TicketGroup> {
            groups.iter().find_map(|group| {
                if group.id == id {
                    Some(group)
                } else {
                    find(&group.children, id)
                }
            })
        }
        find(&self.children, id)
    }

    /// Currency that applies to a ticket: its own, else the shop's.
    #[must_use]
    pub fn effective_currency<'a>(&'a self, info: &'a TicketTypeInfo) -> Option<&'a str> {
        info.currency.as_deref().or(self.currency.as_deref())
    }
}

// =============================================================================
// Expansion State
// =============================================================================

/// Set of expanded group ids, kept apart from the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<i64>,
}

impl ExpansionState {
    /// Initial state for a shop: every group at any depth starts expanded
    /// unless its `collapsed` flag is set.
    #[must_use]
    pub fn from_shop(shop: &ShopTree) -> Self {
        fn collect(groups: &[TicketGroup], state: &mut ExpansionState) {
            for group in groups {
                if !group.collapsed {
                    state.expand(group.id);
                }
                collect(&group.children, state);
            }
        }

        let mut state = Self::default();
        collect(&shop.children, &mut state);
        state
    }

    #[must_use]
    pub fn is_expanded(&self, group_id: i64) -> bool {
        self.expanded.contains(&group_id)
    }

    /// Flip one group. Returns the new expanded state.
    pub fn toggle(&mut self, group_id: i64) -> bool {
        if self.expanded.remove(&group_id) {
            false
        } else {
            self.expanded.insert(group_id);
            true
        }
    }

    pub fn expand(&mut self, group_id: i64) {
        self.expanded.insert(group_id);
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// One visible row of a rendered shop tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRow<'a> {
    /// A group header.
    Group {
        id: i64,
        name: &'a str,
        depth: usize,
        expanded: bool,
    },
    /// A resolved ticket type inside an expanded group.
    Ticket {
        key: &'a str,
        info: &'a TicketTypeInfo,
        currency: Option<&'a str>,
        depth: usize,
    },
}

impl TreeRow<'_> {
    #[must_use]
    pub const fn depth(&self) -> usize {
        match self {
            Self::Group { depth, .. } | Self::Ticket { depth, .. } => *depth,
        }
    }
}

/// Flatten the visible part of a shop tree into rows.
///
/// Each group contributes its header. An expanded group then contributes
/// its resolvable tickets followed by its child groups one level deeper.
/// Ticket keys missing from the dictionary are skipped.
#[must_use]
pub fn render_tree<'a>(shop: &'a ShopTree, expansion: &ExpansionState) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::new();
    for group in &shop.children {
        render_group(shop, group, 0, expansion, &mut rows);
    }
    rows
}

fn render_group<'a>(
    shop: &'a ShopTree,
    group: &'a TicketGroup,
    depth: usize,
    expansion: &ExpansionState,
    rows: &mut Vec<TreeRow<'a>>,
) {
    let expanded = expansion.is_expanded(group.id);
    rows.push(TreeRow::Group {
        id: group.id,
        name: &group.name,
        depth,
        expanded,
    });

    if !expanded {
        return;
    }

    for key in &group.ticket_types {
        if let Some(info) = shop.ticket(key) {
            rows.push(TreeRow::Ticket {
                key,
                info,
                currency: shop.effective_currency(info),
                depth: depth + 1,
            });
        }
    }

    for child in &group.children {
        render_group(shop, child, depth + 1, expansion, rows);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn ticket(id: &str, price: Option<i64>) -> TicketTypeInfo {
        TicketTypeInfo {
            id: id.to_string(),
            name: format!("Ticket {id}"),
            price: price.map(|p| Decimal::new(p, 0)),
            ..TicketTypeInfo::default()
        }
    }

    fn group(id: i64, collapsed: bool, tickets: &[&str], children: Vec<TicketGroup>) -> TicketGroup {
        TicketGroup {
            id,
            name: format!("Group {id}"),
            collapsed,
            ticket_types: tickets.iter().map(ToString::to_string).collect(),
            children,
            ..TicketGroup::default()
        }
    }

    fn shop() -> ShopTree {
        let mut dictionary = HashMap::new();
        dictionary.insert("t1".to_string(), ticket("t1", Some(10)));
        dictionary.insert("t2".to_string(), ticket("t2", None));
        dictionary.insert("t3".to_string(), ticket("t3", Some(25)));

        ShopTree {
            key: EventKey::new("ev-1"),
            title: "Shop".to_string(),
            children: vec![
                group(
                    1,
                    false,
                    &["t1", "missing", "t2"],
                    vec![group(11, true, &["t3"], vec![])],
                ),
                group(2, true, &["t3"], vec![]),
            ],
            ticket_type_dictionary: dictionary,
            currency: Some("EUR".to_string()),
        }
    }

    fn group_ids(rows: &[TreeRow<'_>]) -> Vec<i64> {
        rows.iter()
            .filter_map(|row| match row {
                TreeRow::Group { id, .. } => Some(*id),
                TreeRow::Ticket { .. } => None,
            })
            .collect()
    }

    fn ticket_keys<'a>(rows: &[TreeRow<'a>]) -> Vec<&'a str> {
        rows.iter()
            .filter_map(|row| match row {
                TreeRow::Ticket { key, .. } => Some(*key),
                TreeRow::Group { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_expansion_follows_collapsed_flag_at_every_depth() {
        let expansion = ExpansionState::from_shop(&shop());
        assert!(expansion.is_expanded(1));
        assert!(!expansion.is_expanded(11));
        assert!(!expansion.is_expanded(2));
    }

    #[test]
    fn test_render_skips_unresolved_tickets() {
        let shop = shop();
        let rows = render_tree(&shop, &ExpansionState::from_shop(&shop));
        assert_eq!(ticket_keys(&rows), vec!["t1", "t2"]);
    }

    #[test]
    fn test_collapsed_child_shows_header_only() {
        let shop = shop();
        let rows = render_tree(&shop, &ExpansionState::from_shop(&shop));
        assert_eq!(group_ids(&rows), vec![1, 11, 2]);
        assert_eq!(rows[3].depth(), 1);
    }

    #[test]
    fn test_collapsed_parent_hides_subtree() {
        let shop = shop();
        let mut expansion = ExpansionState::from_shop(&shop);
        expansion.expand(11);
        expansion.toggle(1);

        let rows = render_tree(&shop, &expansion);
        assert_eq!(group_ids(&rows), vec![1, 2]);
        assert!(ticket_keys(&rows).is_empty());
    }

    #[test]
    fn test_toggle_child_leaves_parent_alone() {
        let shop = shop();
        let mut expansion = ExpansionState::from_shop(&shop);

        assert!(expansion.toggle(11));
        assert!(expansion.is_expanded(1));

        let rows = render_tree(&shop, &expansion);
        assert_eq!(ticket_keys(&rows), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_ticket_rows_inherit_shop_currency() {
        let shop = shop();
        let rows = render_tree(&shop, &ExpansionState::from_shop(&shop));
        let TreeRow::Ticket { currency, .. } = &rows[1] else {
            panic!("expected ticket row");
        };
        assert_eq!(*currency, Some("EUR"));
    }

    #[test]
    fn test_empty_shop_renders_nothing() {
        let shop = ShopTree::default();
        assert!(shop.is_empty());
        assert!(render_tree(&shop, &ExpansionState::from_shop(&shop)).is_empty());
    }

    #[test]
    fn test_find_group_nested() {
        let shop = shop();
        assert_eq!(shop.find_group(11).map(|g| g.name.as_str()), Some("Group 11"));
        assert!(shop.find_group(99).is_none());
    }

    #[test]
    fn test_group_deserializes_from_api_shape() {
        let json = r#"{
            "id": 7,
            "name": "Regular",
            "type": "group",
            "sortIndex": 2,
            "collapsed": true,
            "ticketTypes": ["a", "b"],
            "unknownField": 1
        }"#;
        let group: TicketGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.kind, "group");
        assert_eq!(group.sort_index, 2);
        assert!(group.collapsed);
        assert!(group.children.is_empty());
        assert_eq!(group.ticket_types, vec!["a", "b"]);
    }

    #[test]
    fn test_group_tolerates_nulls() {
        let json = r#"{"id": 3, "name": null, "ticketTypes": null, "children": null}"#;
        let group: TicketGroup = serde_json::from_str(json).unwrap();
        assert!(group.name.is_empty());
        assert!(group.ticket_types.is_empty());
        assert!(group.children.is_empty());
    }

    #[test]
    fn test_ticket_info_accepts_numeric_price() {
        let info: TicketTypeInfo =
            serde_json::from_str(r#"{"id":"t1","name":"Early","price":12.5,"serviceFee":1}"#)
                .unwrap();
        assert_eq!(info.price, Some(Decimal::new(125, 1)));
        assert_eq!(info.service_fee, Some(Decimal::ONE));
    }

    #[test]
    fn test_display_name_falls_back() {
        assert_eq!(TicketTypeInfo::default().display_name(), "Ticket");
    }
}
