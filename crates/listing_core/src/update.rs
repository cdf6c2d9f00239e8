use crate::{
    parse_page_count, parse_skill, suggest_similar_skills, AppState, Effect, Msg, Operation,
    PendingOp, Prompt, SkillSearch, Stage,
};

pub const INVALID_CHOICE: &str = "Invalid choice. Please try again.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.is_closed() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Started => match state.stage() {
            Stage::Menu => vec![Effect::ShowMenu],
            _ => Vec::new(),
        },
        Msg::MenuChoice(raw) => {
            if *state.stage() != Stage::Menu {
                return (state, Vec::new());
            }
            choose(&mut state, raw.trim())
        }
        Msg::SkillEntered(raw) => {
            let Stage::AwaitingSkill(search) = *state.stage() else {
                return (state, Vec::new());
            };
            match parse_skill(&raw) {
                Ok(skill) => {
                    let mut effects = Vec::with_capacity(2);
                    let suggestions = suggest_similar_skills(&skill);
                    if !suggestions.is_empty() {
                        effects.push(Effect::Suggest(suggestions));
                    }
                    let pending = match search {
                        SkillSearch::Include => PendingOp::FindBySkill { skill },
                        SkillSearch::Exclude => PendingOp::SkipUnfamiliarSkill { skill },
                    };
                    state.set_stage(Stage::AwaitingPages(pending));
                    effects.push(Effect::Prompt(Prompt::PageCount));
                    effects
                }
                Err(err) => back_to_menu(&mut state, err.to_string()),
            }
        }
        Msg::PageCountEntered(raw) => {
            let Stage::AwaitingPages(pending) = state.stage().clone() else {
                return (state, Vec::new());
            };
            match parse_page_count(&raw) {
                Ok(pages) => start(&mut state, pending.with_pages(pages)),
                Err(err) => back_to_menu(&mut state, err.to_string()),
            }
        }
        Msg::OperationFinished => finish(&mut state, None),
        Msg::OperationFailed(reason) => finish(&mut state, Some(reason)),
        Msg::InputClosed => {
            state.set_stage(Stage::Closed);
            vec![Effect::Quit]
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn choose(state: &mut AppState, choice: &str) -> Vec<Effect> {
    match choice {
        "1" => start(state, Operation::ScrapeInternshala),
        "2" => await_pages(state, PendingOp::ScrapeTimesJobs),
        "3" => await_skill(state, SkillSearch::Include, Prompt::Skill),
        "4" => {
            state.set_stage(Stage::Closed);
            vec![Effect::Quit]
        }
        "5" => await_pages(state, PendingOp::ListTimesJobs),
        "6" => await_skill(state, SkillSearch::Exclude, Prompt::UnfamiliarSkill),
        _ => vec![Effect::Notice(INVALID_CHOICE.to_string()), Effect::ShowMenu],
    }
}

fn start(state: &mut AppState, operation: Operation) -> Vec<Effect> {
    state.set_stage(Stage::Running(operation.clone()));
    vec![Effect::Run(operation)]
}

fn await_pages(state: &mut AppState, pending: PendingOp) -> Vec<Effect> {
    state.set_stage(Stage::AwaitingPages(pending));
    vec![Effect::Prompt(Prompt::PageCount)]
}

fn await_skill(state: &mut AppState, search: SkillSearch, prompt: Prompt) -> Vec<Effect> {
    state.set_stage(Stage::AwaitingSkill(search));
    vec![Effect::Prompt(prompt)]
}

fn finish(state: &mut AppState, failure: Option<String>) -> Vec<Effect> {
    if !matches!(state.stage(), Stage::Running(_)) {
        return Vec::new();
    }
    state.record_run();
    state.set_stage(Stage::Menu);
    match failure {
        Some(reason) => vec![Effect::Notice(format!("Error: {reason}")), Effect::ShowMenu],
        None => vec![Effect::ShowMenu],
    }
}

/// Input errors abandon the pending operation.
fn back_to_menu(state: &mut AppState, notice: String) -> Vec<Effect> {
    state.set_stage(Stage::Menu);
    vec![Effect::Notice(notice), Effect::ShowMenu]
}
