/// A scraping run the shell should carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ScrapeInternshala,
    ScrapeTimesJobs { pages: u32 },
    FindBySkill { skill: String, pages: u32 },
    ListTimesJobs { pages: u32 },
    SkipUnfamiliarSkill { skill: String, pages: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Choice,
    Skill,
    UnfamiliarSkill,
    PageCount,
}

impl Prompt {
    pub fn text(self) -> &'static str {
        match self {
            Prompt::Choice => "Enter your choice: ",
            Prompt::Skill => "Enter a skill you want to search for: ",
            Prompt::UnfamiliarSkill => "Enter a skill you are unfamiliar with: ",
            Prompt::PageCount => "Enter the number of pages to scrape from TimesJobs: ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Print the menu followed by the choice prompt.
    ShowMenu,
    Prompt(Prompt),
    /// Known skills close to what was typed.
    Suggest(Vec<String>),
    Run(Operation),
    /// One line of feedback for the user.
    Notice(String),
    Quit,
}
