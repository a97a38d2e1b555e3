pub(crate) mod config;
pub use config::{
    AppConfig, AppConfigError, CaseMatching, Dialect, IndexConfig, LoggingConfig, MatchMode,
    SearchSettings,
};

pub(crate) mod key;
pub use key::{MAX_KEY_LENGTH, SearchKey, SearchKeyError, decode, normalize};

pub(crate) mod entry;
pub use entry::{EntryError, IndexEntry, Target};

pub(crate) mod partition;
pub use partition::{Category, Partition, ShardId};
