/// How a layer's strings combine with the values accumulated so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// The layer's strings become the whole list.
    #[default]
    Replace,
    /// The layer's strings are added after the accumulated ones.
    Append,
}

impl MergePolicy {
    /// Fold `loaded` into `accumulated`. Order within each side is kept.
    pub fn merge(self, mut accumulated: Vec<String>, loaded: Vec<String>) -> Vec<String> {
        match self {
            MergePolicy::Replace => loaded,
            MergePolicy::Append => {
                accumulated.extend(loaded);
                accumulated
            }
        }
    }
}
