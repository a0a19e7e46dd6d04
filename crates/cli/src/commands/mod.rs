use clap::Subcommand;

pub mod text;

#[derive(Subcommand)]
pub enum Commands {
    /// Quote each argument as a single rc word
    Quote {
        /// Words to quote
        args: Vec<String>,
    },

    /// Parse integers, accepting 0x, 0o, 0b and leading-zero octal prefixes
    Atoi {
        /// Print 0 for malformed input and saturate out-of-range values
        #[arg(long)]
        lenient: bool,

        /// Values to parse
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Compare two strings byte-wise and print -1, 0 or 1
    Compare { a: String, b: String },

    /// Print the class of every character: space, alpha, digit or other
    Classify { text: String },
}
