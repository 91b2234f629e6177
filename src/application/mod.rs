//! Application layer - Use cases and orchestration

pub mod diary;
pub mod entry_store;
pub mod init;
pub mod manage_config;
pub mod sync;

pub use diary::DiaryService;
pub use entry_store::{EntryStore, STORAGE_KEY};
pub use sync::{channel, Applied, ApplyReport, ChangeEvent, ChangeFeed, ChangeSender};
