#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Shell is up; show the menu.
    Started,
    /// A line typed at the menu.
    MenuChoice(String),
    /// A line typed at a skill prompt.
    SkillEntered(String),
    /// A line typed at the page-count prompt.
    PageCountEntered(String),
    /// The running operation completed.
    OperationFinished,
    /// The running operation aborted with a reportable error.
    OperationFailed(String),
    /// Standard input reached end of file.
    InputClosed,
    NoOp,
}
