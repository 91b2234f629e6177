use crate::error::Result;

/// Durable key-value slot holding serialized collections.
///
/// This trait handles the "where" of persistence (filesystem vs memory);
/// `EntryStore` handles the "what" (validation, identity, write-through).
pub trait StorageBackend {
    /// Read the raw contents stored under `key`.
    /// Returns Ok(None) if the key has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the contents stored under `key`.
    /// MUST be all-or-nothing: on error the previous contents stay readable.
    fn write(&self, key: &str, contents: &str) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        (**self).write(key, contents)
    }
}
