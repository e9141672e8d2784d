use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::node::{FileState, FolderState, NodeKind};
use crate::path;

/// Classifies files by extension. Registration order is precedence
/// order: the first provider whose extension list matches wins.
pub trait FileProvider: Send + Sync {
    /// Suffixes this provider claims, e.g. `&[".proj.yaml", ".yaml"]`.
    fn extensions(&self) -> &[&str];

    /// Tag stored on matched file nodes.
    fn type_name(&self) -> &str;
}

/// What to do with a file no provider claims.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UnknownFilePolicy {
    /// Construct a generic, untyped file node.
    #[default]
    Generic,
    /// Leave the file out of the tree (silent skip during enumeration).
    Skip,
    /// Fail with `UnknownFileType`.
    Reject,
}

/// Maps backend entries to node state.
#[derive(Default)]
pub struct NodeFactory {
    providers: Vec<Arc<dyn FileProvider>>,
    unknown_policy: UnknownFilePolicy,
}

impl NodeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown_policy(mut self, policy: UnknownFilePolicy) -> Self {
        self.unknown_policy = policy;
        self
    }

    pub fn register(&mut self, provider: Arc<dyn FileProvider>) {
        self.providers.push(provider);
    }

    /// File classification. `Ok(None)` means "no node" (skip policy).
    pub fn classify_file(&self, file: &Path) -> Result<Option<NodeKind>> {
        let name = path::basename(file).unwrap_or_default();
        for provider in &self.providers {
            if provider.extensions().iter().any(|ext| name.ends_with(ext)) {
                return Ok(Some(NodeKind::File(FileState {
                    dirty_text: None,
                    type_name: Some(provider.type_name().to_string()),
                    extensions: provider
                        .extensions()
                        .iter()
                        .map(|e| e.to_string())
                        .collect(),
                })));
            }
        }
        match self.unknown_policy {
            UnknownFilePolicy::Generic => Ok(Some(NodeKind::File(FileState::default()))),
            UnknownFilePolicy::Skip => Ok(None),
            UnknownFilePolicy::Reject => Err(Error::unknown_file_type(file)),
        }
    }

    /// Folder classification always succeeds.
    pub fn classify_folder(&self) -> NodeKind {
        NodeKind::Folder(FolderState::default())
    }
}

impl std::fmt::Debug for NodeFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NodeFactory{{providers: {}, unknown: {:?}}}",
            self.providers.len(),
            self.unknown_policy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Csv;
    impl FileProvider for Csv {
        fn extensions(&self) -> &[&str] {
            &[".csv"]
        }
        fn type_name(&self) -> &str {
            "csv"
        }
    }

    struct CatchAll;
    impl FileProvider for CatchAll {
        fn extensions(&self) -> &[&str] {
            &[".csv", ".txt"]
        }
        fn type_name(&self) -> &str {
            "any"
        }
    }

    #[test]
    fn registration_order_is_precedence() {
        let mut factory = NodeFactory::new();
        factory.register(Arc::new(Csv));
        factory.register(Arc::new(CatchAll));

        let kind = factory.classify_file(Path::new("a/b.csv")).unwrap();
        match kind {
            Some(NodeKind::File(state)) => assert_eq!(state.type_name.as_deref(), Some("csv")),
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn unknown_policies() {
        let mut factory = NodeFactory::new().with_unknown_policy(UnknownFilePolicy::Skip);
        factory.register(Arc::new(Csv));
        assert!(factory.classify_file(Path::new("x.bin")).unwrap().is_none());

        let factory = NodeFactory::new().with_unknown_policy(UnknownFilePolicy::Reject);
        assert_eq!(
            factory.classify_file(Path::new("x.bin")),
            Err(Error::unknown_file_type("x.bin"))
        );

        let factory = NodeFactory::new();
        assert!(factory.classify_file(Path::new("x.bin")).unwrap().is_some());
    }
}
