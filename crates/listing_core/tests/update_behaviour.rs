use std::sync::Once;

use listing_core::{
    update, AppState, Effect, Expecting, Msg, Operation, PendingOp, Prompt, Stage, INVALID_CHOICE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(listing_logging::initialize_for_tests);
}

/// Feeds lines the way the shell does: each one wrapped for the current stage.
fn type_lines(mut state: AppState, lines: &[&str]) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();
    for line in lines {
        let msg = state.message_for_line(line.to_string());
        let (next, produced) = update(state, msg);
        state = next;
        effects = produced;
    }
    (state, effects)
}

#[test]
fn started_shows_menu() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::Started);
    assert_eq!(effects, vec![Effect::ShowMenu]);
    assert_eq!(state.expecting(), Expecting::MenuChoice);
}

#[test]
fn internshala_runs_without_prompts() {
    init_logging();
    let (state, effects) = type_lines(AppState::new(), &["1"]);
    assert_eq!(effects, vec![Effect::Run(Operation::ScrapeInternshala)]);
    assert_eq!(state.expecting(), Expecting::Nothing);
}

#[test]
fn timesjobs_asks_for_pages_then_runs() {
    init_logging();
    let (state, effects) = type_lines(AppState::new(), &["2"]);
    assert_eq!(effects, vec![Effect::Prompt(Prompt::PageCount)]);
    assert_eq!(state.stage(), &Stage::AwaitingPages(PendingOp::ScrapeTimesJobs));

    let (state, effects) = type_lines(state, &[" 3 "]);
    assert_eq!(
        effects,
        vec![Effect::Run(Operation::ScrapeTimesJobs { pages: 3 })]
    );
    assert_eq!(
        state.stage(),
        &Stage::Running(Operation::ScrapeTimesJobs { pages: 3 })
    );
}

#[test]
fn skill_search_suggests_then_runs_with_typed_skill() {
    init_logging();
    let (state, effects) = type_lines(AppState::new(), &["3"]);
    assert_eq!(effects, vec![Effect::Prompt(Prompt::Skill)]);

    let (state, effects) = type_lines(state, &["pyhton"]);
    assert_eq!(
        effects,
        vec![
            Effect::Suggest(vec!["python".to_string()]),
            Effect::Prompt(Prompt::PageCount),
        ]
    );

    let (_state, effects) = type_lines(state, &["2"]);
    assert_eq!(
        effects,
        vec![Effect::Run(Operation::FindBySkill {
            skill: "pyhton".to_string(),
            pages: 2,
        })]
    );
}

#[test]
fn known_skill_gets_no_suggestion() {
    init_logging();
    let (_state, effects) = type_lines(AppState::new(), &["3", "Python"]);
    assert_eq!(effects, vec![Effect::Prompt(Prompt::PageCount)]);
}

#[test]
fn unfamiliar_skill_runs_exclusion_search() {
    init_logging();
    let (state, effects) = type_lines(AppState::new(), &["6"]);
    assert_eq!(effects, vec![Effect::Prompt(Prompt::UnfamiliarSkill)]);

    let (_state, effects) = type_lines(state, &["java", "1"]);
    assert_eq!(
        effects,
        vec![Effect::Run(Operation::SkipUnfamiliarSkill {
            skill: "java".to_string(),
            pages: 1,
        })]
    );
}

#[test]
fn listing_runs_after_page_count() {
    init_logging();
    let (_state, effects) = type_lines(AppState::new(), &["5", "4"]);
    assert_eq!(effects, vec![Effect::Run(Operation::ListTimesJobs { pages: 4 })]);
}

#[test]
fn invalid_page_count_returns_to_menu_without_running() {
    init_logging();
    let (state, effects) = type_lines(AppState::new(), &["2", "abc"]);

    assert!(!effects.iter().any(|e| matches!(e, Effect::Run(_))));
    assert!(matches!(
        &effects[0],
        Effect::Notice(text) if text.contains("abc")
    ));
    assert_eq!(effects.last(), Some(&Effect::ShowMenu));
    assert_eq!(state.stage(), &Stage::Menu);
}

#[test]
fn zero_pages_is_rejected() {
    init_logging();
    let (state, effects) = type_lines(AppState::new(), &["3", "python", "0"]);
    assert!(!effects.iter().any(|e| matches!(e, Effect::Run(_))));
    assert_eq!(state.stage(), &Stage::Menu);
}

#[test]
fn empty_skill_returns_to_menu() {
    init_logging();
    let (state, effects) = type_lines(AppState::new(), &["3", "   "]);
    assert_eq!(
        effects,
        vec![
            Effect::Notice("A skill is required.".to_string()),
            Effect::ShowMenu
        ]
    );
    assert_eq!(state.stage(), &Stage::Menu);
}

#[test]
fn unknown_choice_is_reported() {
    init_logging();
    let (state, effects) = type_lines(AppState::new(), &["9"]);
    assert_eq!(
        effects,
        vec![
            Effect::Notice(INVALID_CHOICE.to_string()),
            Effect::ShowMenu
        ]
    );
    assert_eq!(state.stage(), &Stage::Menu);
}

#[test]
fn quit_closes_the_shell() {
    init_logging();
    let (state, effects) = type_lines(AppState::new(), &["4"]);
    assert_eq!(effects, vec![Effect::Quit]);
    assert!(state.is_closed());

    let (state, effects) = update(state, Msg::MenuChoice("1".to_string()));
    assert!(effects.is_empty());
    assert!(state.is_closed());
}

#[test]
fn end_of_input_quits_from_any_prompt() {
    init_logging();
    let (state, _) = type_lines(AppState::new(), &["3"]);
    let (state, effects) = update(state, Msg::InputClosed);
    assert_eq!(effects, vec![Effect::Quit]);
    assert!(state.is_closed());
}

#[test]
fn finished_run_returns_to_menu() {
    init_logging();
    let (state, _) = type_lines(AppState::new(), &["1"]);
    let (state, effects) = update(state, Msg::OperationFinished);
    assert_eq!(effects, vec![Effect::ShowMenu]);
    assert_eq!(state.stage(), &Stage::Menu);
    assert_eq!(state.completed_runs(), 1);
}

#[test]
fn failed_run_is_reported_then_menu() {
    init_logging();
    let (state, _) = type_lines(AppState::new(), &["5", "1"]);
    let (state, effects) = update(state, Msg::OperationFailed("robots.txt unavailable".into()));
    assert_eq!(
        effects,
        vec![
            Effect::Notice("Error: robots.txt unavailable".to_string()),
            Effect::ShowMenu
        ]
    );
    assert_eq!(state.expecting(), Expecting::MenuChoice);
}

#[test]
fn stray_messages_are_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::PageCountEntered("3".into()));
    assert_eq!(next, state);
    assert!(effects.is_empty());

    let (next, effects) = update(state.clone(), Msg::OperationFinished);
    assert_eq!(next, state);
    assert!(effects.is_empty());
}
