use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PathSegment {
    WildCard,
    Named(String),
}

#[derive(Debug, Clone)]
struct PermissionNode {
    path: Vec<PathSegment>,
    value: bool,
}

impl PermissionNode {
    /// A trailing `*` matches any number of remaining segments.
    fn matches(&self, permission: &str) -> bool {
        let mut segments = permission.split('.');
        for segment in &self.path {
            match segment {
                PathSegment::WildCard => return true,
                PathSegment::Named(name) => match segments.next() {
                    Some(s) if s.eq_ignore_ascii_case(name) => {}
                    _ => return false,
                },
            }
        }
        segments.next().is_none()
    }
}

/// Permission nodes checked in insertion order. The first node that matches decides.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    nodes: Vec<PermissionNode>,
}

impl PermissionSet {
    /// Builds a set from strings like `warps.*` or `-server.stop`.
    pub fn from_nodes<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = PermissionSet::default();
        for node in nodes {
            let node = node.as_ref().trim();
            match node.strip_prefix('-') {
                Some(denied) => set.insert(denied, false),
                None => set.insert(node, true),
            }
        }
        set
    }

    pub fn insert(&mut self, name: &str, value: bool) {
        if name.is_empty() {
            warn!("Ignoring empty permission node");
            return;
        }
        let path = name
            .split('.')
            .map(|s| match s {
                "*" => PathSegment::WildCard,
                s => PathSegment::Named(s.to_owned()),
            })
            .collect();
        self.nodes.push(PermissionNode { path, value });
    }

    pub fn get_node_val(&self, name: &str) -> Option<bool> {
        self.nodes
            .iter()
            .find(|node| node.matches(name))
            .map(|node| node.value)
    }

    /// Unmatched permissions are denied.
    pub fn has(&self, name: &str) -> bool {
        self.get_node_val(name).unwrap_or(false)
    }
}
