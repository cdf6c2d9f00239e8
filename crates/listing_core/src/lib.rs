//! Listing harvester core: pure menu state machine and input helpers.
mod effect;
mod input;
mod msg;
mod skills;
mod state;
mod update;

pub use effect::{Effect, Operation, Prompt};
pub use input::{parse_page_count, parse_skill, InputError};
pub use msg::Msg;
pub use skills::{suggest_similar_skills, KNOWN_SKILLS, SUGGESTION_CUTOFF, SUGGESTION_LIMIT};
pub use state::{AppState, Expecting, PendingOp, SkillSearch, Stage, MENU_ITEMS};
pub use update::{update, INVALID_CHOICE};
