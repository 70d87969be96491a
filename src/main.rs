use clap::{Args, Parser, Subcommand};

use gridgen::commands::{self, CodeOutput, ReplayOptions};
use gridgen::error_fmt::{AppError, SettingsResultExt};
use gridgen::{Settings, SETTINGS_FILE};

#[derive(Parser)]
#[command(name = "gridgen")]
#[command(about = "Build CSS grid layouts by merging cells, then emit HTML and CSS")]
struct Cli {
    /// Settings file (default: .gridgen.yml in the current directory)
    #[arg(long, global = true)]
    config: Option<String>,
    /// Log session events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Which artifacts to print
#[derive(Args, Clone, Copy)]
struct OutputArgs {
    /// Print only the HTML
    #[arg(long, conflicts_with = "css")]
    html: bool,
    /// Print only the CSS
    #[arg(long)]
    css: bool,
}

impl OutputArgs {
    fn selection(self) -> CodeOutput {
        match (self.html, self.css) {
            (true, _) => CodeOutput::Markup,
            (_, true) => CodeOutput::Style,
            _ => CodeOutput::Both,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate HTML and CSS for a layout document
    Generate {
        /// Layout document (YAML, `-` for stdin); the default grid if omitted
        layout: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Replay an event script against a grid and print the result
    Replay {
        /// Event script (`-` for stdin)
        script: String,
        /// Start from this layout document instead of the default grid
        #[arg(long, short)]
        layout: Option<String>,
        /// Print a picture of the grid after the script
        #[arg(long, short)]
        grid: bool,
        /// Save the final grid as a layout document
        #[arg(long, short)]
        save: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the default layout document
    Defaults,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    init_logging(cli.verbose)?;
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate { layout, output } => {
            commands::generate(layout.as_deref(), &settings, output.selection())
        }
        Commands::Replay {
            script,
            layout,
            grid,
            save,
            output,
        } => {
            let options = ReplayOptions {
                layout: layout.as_deref(),
                show_grid: grid,
                save: save.as_deref(),
                output: output.selection(),
            };
            commands::replay(&script, &settings, &options)
        }
        Commands::Defaults => commands::defaults(),
    }
}

fn init_logging(verbose: bool) -> Result<(), AppError> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| AppError::Logging(e.to_string()))
}

fn load_settings(path: Option<&str>) -> Result<Settings, AppError> {
    let path = shellexpand::tilde(path.unwrap_or(SETTINGS_FILE)).to_string();
    Settings::load(std::path::Path::new(&path)).with_settings_path(&path)
}
