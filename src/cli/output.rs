use clap::ValueEnum;

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Readable text
    #[default]
    Human,
    /// Pretty-printed JSON on stdout
    Json,
}
