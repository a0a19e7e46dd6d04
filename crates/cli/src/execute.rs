use crate::commands::{text, Commands};
use exitkit_core::{IoResultExt, Result};
use std::io::Write;

impl Commands {
    pub fn execute(self, out: &mut impl Write) -> Result<()> {
        tracing::debug!(command = self.name(), "executing command");
        match self {
            Commands::Quote { args } => text::quote(out, &args),
            Commands::Atoi { lenient, values } => text::atoi(out, &values, lenient),
            Commands::Compare { a, b } => text::compare(out, &a, &b),
            Commands::Classify { text: input } => text::classify(out, &input),
        }?;
        out.flush().fs_context("", text::STDOUT)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        match self {
            Commands::Quote { .. } => "quote",
            Commands::Atoi { .. } => "atoi",
            Commands::Compare { .. } => "compare",
            Commands::Classify { .. } => "classify",
        }
    }
}
