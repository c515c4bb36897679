// Scope tree over the dotted names of a VCD library

/// One scope level
///
/// `signals` holds the full dotted names of the signals declared directly in
/// this scope, in library order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeNode {
    pub name: String,
    pub scopes: Vec<ScopeNode>,
    pub signals: Vec<String>,
}

impl ScopeNode {
    /// Build the tree; the root node has an empty name
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut root = ScopeNode::default();

        for full_name in names {
            if full_name.is_empty() {
                continue;
            }
            let mut path: Vec<&str> = full_name.split('.').collect();
            path.pop();

            let mut node = &mut root;
            for part in path {
                let index = match node.scopes.iter().position(|s| s.name == part) {
                    Some(index) => index,
                    None => {
                        node.scopes.push(ScopeNode {
                            name: part.to_string(),
                            ..ScopeNode::default()
                        });
                        node.scopes.len() - 1
                    }
                };
                node = &mut node.scopes[index];
            }
            node.signals.push(full_name.to_string());
        }

        root
    }

    /// Look up a scope by dotted path (`"top.core"`); `""` is this node
    pub fn scope(&self, path: &str) -> Option<&ScopeNode> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, part| {
            node.scopes.iter().find(|s| s.name == part)
        })
    }

    /// Number of signals in this scope and all scopes below it
    pub fn signal_count(&self) -> usize {
        self.signals.len() + self.scopes.iter().map(ScopeNode::signal_count).sum::<usize>()
    }
}
