use clap::{Parser, ValueEnum};

/// Command-line arguments for the `sema` binary.
#[derive(Parser, Debug)]
#[command(name = "sema", version, about = "Module loading, resolution and type inference for sema sources")]
pub struct CliArgs {
    /// Entry point module paths to compile (dotted or slash-separated).
    #[arg(required = true)]
    pub entry_points: Vec<String>,

    /// Directory to search for modules. May be repeated; searched in order.
    #[arg(short = 'I', long = "search-path")]
    pub search_paths: Vec<String>,

    /// File extensions to try when resolving a module path, without the dot.
    #[arg(long = "ext", default_value = "json")]
    pub extensions: Vec<String>,

    /// Treat warnings as errors.
    #[arg(long)]
    pub strict: bool,

    /// Stop after this many reported errors.
    #[arg(long, default_value_t = 100)]
    pub max_errors: usize,

    /// Diagnostic categories to suppress entirely.
    #[arg(long = "ignore-category", value_enum)]
    pub ignore_categories: Vec<Category>,

    /// Diagnostic codes to suppress entirely, e.g. `E1601`.
    #[arg(long = "ignore-code")]
    pub ignore_codes: Vec<String>,

    /// Print the resolved program's diagnostics as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Category {
    Syntax,
    Type,
    Semantic,
    Performance,
    Style,
    Security,
}

impl From<Category> for sema_common::Category {
    fn from(value: Category) -> Self {
        match value {
            Category::Syntax => sema_common::Category::Syntax,
            Category::Type => sema_common::Category::Type,
            Category::Semantic => sema_common::Category::Semantic,
            Category::Performance => sema_common::Category::Performance,
            Category::Style => sema_common::Category::Style,
            Category::Security => sema_common::Category::Security,
        }
    }
}

impl CliArgs {
    pub fn to_core_options(&self) -> sema_common::CoreOptions {
        sema_common::CoreOptions {
            strict_mode: self.strict,
            warnings_as_errors: self.strict,
            ignore_categories: self.ignore_categories.iter().map(|c| (*c).into()).collect(),
            ignore_codes: self.ignore_codes.clone(),
            max_errors: self.max_errors,
            search_paths: self.search_paths.clone(),
            extensions: self.extensions.clone(),
            ..sema_common::CoreOptions::default()
        }
    }
}
