/// Answer assumed when the confirmation prompt receives an empty line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultAnswer {
    Yes,
    #[default]
    No,
}

impl DefaultAnswer {
    pub fn hint(self) -> &'static str {
        match self {
            DefaultAnswer::Yes => "[Y/n]",
            DefaultAnswer::No => "[y/N]",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenameOptions {
    pub force: bool,
    pub verbose: bool,
    pub default_answer: DefaultAnswer,
}
