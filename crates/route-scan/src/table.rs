//! Route table: the namespace tree the emitter renders.
//!
//! Each entry is filed under the key path derived from its route path
//! (`/blog/:slug` → `blog` → `slug`, `/` → `home`). Two rules keep the
//! tree well-formed:
//!
//! - **Collisions**: two entries with the same key path resolve to the
//!   later one. The earlier entry is dropped in place, a warning is logged
//!   and a [`NameCollision`] is recorded.
//! - **Terminal/group overlap**: when a key is both a route and a group
//!   (`/blog` next to `/blog/:slug`) the route is exposed inside the group
//!   under the reserved key [`INDEX_KEY`], regardless of insertion order.
//!   If the group already has an `index` child, the route is dropped and
//!   recorded as a collision on `<group>.index`.

use route_core::RouteEntry;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

/// Key under which a route is exposed when its key is also a group.
pub const INDEX_KEY: &str = "index";

/// One key in the namespace tree.
///
/// A node can carry a route, child keys, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceNode {
    entry: Option<RouteEntry>,
    children: RouteNamespace,
}

impl NamespaceNode {
    /// Returns the route stored at this key, if any.
    #[must_use]
    pub fn entry(&self) -> Option<&RouteEntry> {
        self.entry.as_ref()
    }

    /// Returns the child keys.
    #[must_use]
    pub fn children(&self) -> &RouteNamespace {
        &self.children
    }

    /// Returns `true` if the node renders as a single path builder.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if a child already occupies [`INDEX_KEY`], leaving
    /// no room for this node's own route.
    #[must_use]
    pub fn has_index_child(&self) -> bool {
        self.children.get(INDEX_KEY).is_some()
    }
}

/// Ordered mapping from key to [`NamespaceNode`].
///
/// Keys keep their first insertion position, so output order follows
/// discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteNamespace {
    nodes: Vec<(String, NamespaceNode)>,
}

impl RouteNamespace {
    /// Iterates over keys and nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamespaceNode)> {
        self.nodes.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Looks up a direct child.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NamespaceNode> {
        self.nodes.iter().find(|(k, _)| k == key).map(|(_, node)| node)
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node_mut(&mut self, key: &str) -> &mut NamespaceNode {
        let index = match self.nodes.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.nodes.push((key.to_string(), NamespaceNode::default()));
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[index].1
    }

    /// Files `entry` under `key_path`, returning the entry it replaced.
    fn insert(&mut self, key_path: &[String], entry: RouteEntry) -> Option<RouteEntry> {
        let mut segments = key_path.iter();
        let first = segments.next().map_or(INDEX_KEY, String::as_str);
        let mut node = self.node_mut(first);
        for segment in segments {
            node = node.children.node_mut(segment);
        }
        node.entry.replace(entry)
    }
}

/// Two routes that derived the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameCollision {
    /// Dotted key path both routes derived
    pub name: String,
    /// Source file of the route that was kept
    pub kept: PathBuf,
    /// Source file of the route that was dropped
    pub replaced: PathBuf,
}

/// A route together with the accessor path it is exposed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedRoute<'a> {
    /// Keys leading to the builder in the generated object
    pub accessor: &'a [String],
    /// The route itself
    pub entry: &'a RouteEntry,
}

/// The complete, collision-resolved set of routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    namespace: RouteNamespace,
    accessors: Vec<Vec<String>>,
    entries: Vec<RouteEntry>,
    collisions: Vec<NameCollision>,
}

impl RouteTable {
    /// Returns the root of the namespace tree.
    #[must_use]
    pub fn namespace(&self) -> &RouteNamespace {
        &self.namespace
    }

    /// Returns every route in namespace order.
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Returns every route with its accessor path, in namespace order.
    pub fn routes(&self) -> impl Iterator<Item = NamedRoute<'_>> {
        self.accessors
            .iter()
            .zip(&self.entries)
            .map(|(accessor, entry)| NamedRoute { accessor, entry })
    }

    /// Returns the collisions resolved while building.
    #[must_use]
    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    /// Looks up a route by its dotted accessor (e.g. `blog.slug`).
    #[must_use]
    pub fn get(&self, accessor: &str) -> Option<&RouteEntry> {
        self.routes()
            .find(|route| route.accessor.join(".") == accessor)
            .map(|route| route.entry)
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the namespace tree from entries in discovery order.
///
/// # Examples
///
/// ```
/// use route_core::RouteEntry;
/// use route_scan::build_route_table;
///
/// let entry = |path: &str| RouteEntry {
///     source_path: format!("pages{path}.tsx").into(),
///     route_path: path.to_string(),
///     params: vec![],
///     query: None,
/// };
///
/// let table = build_route_table(vec![entry("/blog"), entry("/blog/archive")]);
/// assert_eq!(table.get("blog.index").unwrap().route_path, "/blog");
/// assert_eq!(table.get("blog.archive").unwrap().route_path, "/blog/archive");
/// ```
#[must_use]
pub fn build_route_table(entries: impl IntoIterator<Item = RouteEntry>) -> RouteTable {
    let mut namespace = RouteNamespace::default();
    let mut collisions = Vec::new();

    for entry in entries {
        let key_path = entry.name_segments();
        let kept = entry.source_path.clone();
        if let Some(replaced) = namespace.insert(&key_path, entry) {
            let name = key_path.join(".");
            warn!(
                "Route name '{name}' from {} replaces {}",
                kept.display(),
                replaced.source_path.display()
            );
            collisions.push(NameCollision {
                name,
                kept,
                replaced: replaced.source_path,
            });
        }
    }

    let mut accessors = Vec::new();
    let mut flattened = Vec::new();
    flatten(
        &namespace,
        &mut Vec::new(),
        &mut accessors,
        &mut flattened,
        &mut collisions,
    );

    RouteTable {
        namespace,
        accessors,
        entries: flattened,
        collisions,
    }
}

fn flatten(
    namespace: &RouteNamespace,
    prefix: &mut Vec<String>,
    accessors: &mut Vec<Vec<String>>,
    entries: &mut Vec<RouteEntry>,
    collisions: &mut Vec<NameCollision>,
) {
    for (key, node) in namespace.iter() {
        prefix.push(key.to_string());

        if let Some(entry) = node.entry() {
            if node.is_leaf() {
                accessors.push(prefix.clone());
                entries.push(entry.clone());
            } else if let Some(index) = node.children().get(INDEX_KEY) {
                let name = format!("{}.{INDEX_KEY}", prefix.join("."));
                let kept = first_source(index).unwrap_or_default();
                warn!(
                    "Route name '{name}' from {} replaces {}",
                    kept.display(),
                    entry.source_path.display()
                );
                collisions.push(NameCollision {
                    name,
                    kept,
                    replaced: entry.source_path.clone(),
                });
            } else {
                let mut accessor = prefix.clone();
                accessor.push(INDEX_KEY.to_string());
                accessors.push(accessor);
                entries.push(entry.clone());
            }
        }

        flatten(node.children(), prefix, accessors, entries, collisions);
        prefix.pop();
    }
}

/// Source of the first route at or below `node`, in output order.
fn first_source(node: &NamespaceNode) -> Option<PathBuf> {
    node.entry().map(|e| e.source_path.clone()).or_else(|| {
        node.children()
            .iter()
            .find_map(|(_, child)| first_source(child))
    })
}
