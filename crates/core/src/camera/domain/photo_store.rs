use std::path::Path;

/// Persistent app storage that captured photos are copied into.
pub trait PhotoStore: Send {
    fn documents_dir(&self) -> &Path;

    /// Copies `from` to `to`, returning the number of bytes written.
    fn copy(&self, from: &Path, to: &Path) -> std::io::Result<u64>;
}
