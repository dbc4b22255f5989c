//! Scout core: candidate generation, session state machine and view-model helpers.
//!
//! Everything in this crate is pure; probing and file output live in `scout_engine`.
mod candidate;
mod category;
mod effect;
mod generate;
mod msg;
mod state;
mod update;
mod view_model;

pub use candidate::{Candidate, RunId, ScanOutcome, ValidatedCandidate};
pub use category::{
    lookup, CategoryCode, CategorySpec, GenerationPlan, ParseCategoryError, SubAsset, CATEGORIES,
};
pub use effect::Effect;
pub use generate::{
    generate, normalize_name, prepare_name, InputError, CDN_BASE, INDICES, IND_STORE_REGION,
    REGIONS, SPLASH_REGION, STORE_REGION,
};
pub use msg::Msg;
pub use state::{AppState, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, ResultRowView};
