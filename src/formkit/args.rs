use clap::{ArgAction, Parser, Subcommand};
use formkit::field::InputKind;
use formkit::model::MetaKind;
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " ", env!("GIT_HASH"));

#[derive(Parser, Debug)]
#[command(name = "formkit")]
#[command(version = VERSION)]
#[command(about = "Resolve nested form attributes and render them as HTML", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding formkit.json (defaults to the user config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the segments of an attribute path, one per line
    Normalize {
        /// Attribute path (e.g. profile[address][city])
        path: String,
    },

    /// Print the value at an attribute path as JSON
    Value {
        /// JSON model file
        model: PathBuf,

        /// Attribute path
        path: String,
    },

    /// Print the label, hint or placeholder of an attribute
    Meta {
        /// JSON model file
        model: PathBuf,

        /// Attribute path
        path: String,

        /// Which metadata to print: label, hint or placeholder
        #[arg(long, default_value = "label")]
        kind: MetaKind,
    },

    /// Render an attribute as an HTML form field
    Field {
        /// JSON model file
        model: PathBuf,

        /// Attribute path
        path: String,

        /// Input type (text, email, password, number, url, hidden, textarea, checkbox)
        #[arg(long = "type")]
        kind: Option<InputKind>,

        /// Form name scoping input names (defaults to the model's type name)
        #[arg(long)]
        form: Option<String>,

        /// Validation error to show (repeatable)
        #[arg(long = "error")]
        errors: Vec<String>,

        /// Mark the field as required
        #[arg(long)]
        required: bool,

        /// Maximum length of the value
        #[arg(long)]
        max_length: Option<usize>,

        /// Extra attribute as key=value, or a bare key for a flag (repeatable)
        #[arg(long = "attr")]
        attrs: Vec<String>,

        /// Render only the input, without label, hint and error
        #[arg(long)]
        input_only: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (show-hints, missing-class-indicator, class.<role>)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
