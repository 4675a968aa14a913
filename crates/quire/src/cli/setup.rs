use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to emit completions for.
    #[arg(value_enum)]
    shell: Shell,
}

impl CompletionsArgs {
    pub fn run(self) -> Result<()> {
        let mut cmd = super::App::command();
        generate(self.shell, &mut cmd, "quire", &mut std::io::stdout());
        Ok(())
    }
}
