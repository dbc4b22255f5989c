//! Scout engine: image probing, batched validation and asset output.
mod download;
mod engine;
mod filename;
mod persist;
mod probe;
mod types;
mod validate;

pub use download::{AssetDownloader, DownloadError, DownloadReport};
pub use engine::EngineHandle;
pub use filename::asset_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use probe::{ProbeSettings, Prober, ReqwestProber};
pub use types::{EngineError, EngineEvent, FailureKind, ProbeOutcome, RunProgress};
pub use validate::{
    progress_percent, validate, BatchSettings, ChannelProgressSink, ProgressSink, RunContext,
    DEFAULT_BATCH_SIZE,
};
