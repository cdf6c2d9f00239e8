use crate::{Msg, Operation};

pub const MENU_ITEMS: [&str; 6] = [
    "1. Scrape and save Internshala jobs",
    "2. Scrape and save TimesJobs jobs",
    "3. Find and save TimesJobs jobs by skill",
    "4. Quit",
    "5. List TimesJobs jobs",
    "6. Find and save TimesJobs jobs without an unfamiliar skill",
];

/// Which way a skill narrows a TimesJobs search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillSearch {
    Include,
    Exclude,
}

/// An operation chosen at the menu that still needs a page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOp {
    ScrapeTimesJobs,
    ListTimesJobs,
    FindBySkill { skill: String },
    SkipUnfamiliarSkill { skill: String },
}

impl PendingOp {
    pub fn with_pages(self, pages: u32) -> Operation {
        match self {
            PendingOp::ScrapeTimesJobs => Operation::ScrapeTimesJobs { pages },
            PendingOp::ListTimesJobs => Operation::ListTimesJobs { pages },
            PendingOp::FindBySkill { skill } => Operation::FindBySkill { skill, pages },
            PendingOp::SkipUnfamiliarSkill { skill } => {
                Operation::SkipUnfamiliarSkill { skill, pages }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Menu,
    AwaitingSkill(SkillSearch),
    AwaitingPages(PendingOp),
    Running(Operation),
    Closed,
}

/// What kind of line the shell should read next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expecting {
    MenuChoice,
    Skill,
    PageCount,
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    stage: Stage,
    completed_runs: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn completed_runs(&self) -> u32 {
        self.completed_runs
    }

    pub fn is_closed(&self) -> bool {
        self.stage == Stage::Closed
    }

    pub fn expecting(&self) -> Expecting {
        match self.stage {
            Stage::Menu => Expecting::MenuChoice,
            Stage::AwaitingSkill(_) => Expecting::Skill,
            Stage::AwaitingPages(_) => Expecting::PageCount,
            Stage::Running(_) | Stage::Closed => Expecting::Nothing,
        }
    }

    /// Wraps a line read from the user in the message for the current stage.
    pub fn message_for_line(&self, line: String) -> Msg {
        match self.expecting() {
            Expecting::MenuChoice => Msg::MenuChoice(line),
            Expecting::Skill => Msg::SkillEntered(line),
            Expecting::PageCount => Msg::PageCountEntered(line),
            Expecting::Nothing => Msg::NoOp,
        }
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub(crate) fn record_run(&mut self) {
        self.completed_runs += 1;
    }
}
