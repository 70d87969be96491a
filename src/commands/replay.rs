//! Replay command - drives a session with an event script.

use owo_colors::OwoColorize;

use crate::commands::shared::{
    format_code, format_notification, load_model, read_input, save_model, CodeOutput,
};
use crate::context::{Event, GridSession, Settings};
use crate::error_fmt::{AppError, ScriptResultExt};
use crate::render::GenerateOptions;
use crate::script::parse_script;

/// Options for a replay run.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions<'a> {
    /// Layout document to start from instead of the default grid.
    pub layout: Option<&'a str>,
    /// Print the grid picture after the script.
    pub show_grid: bool,
    /// Write the final state to this layout document.
    pub save: Option<&'a str>,
    pub output: CodeOutput,
}

/// Run the events of `script` (a path, or `-` for stdin) and print the
/// resulting code. Notifications are printed as they are raised.
pub fn replay(script: &str, settings: &Settings, options: &ReplayOptions) -> Result<(), AppError> {
    let content = read_input(script)?;
    let events = parse_script(&content).with_script_path(script)?;

    let model = load_model(options.layout)?;
    let mut session = GridSession::with_model(model, GenerateOptions::from(settings))?;

    for line in run_events(&mut session, events) {
        eprintln!("{}", line);
    }

    if options.show_grid {
        println!("{}", "Grid".bold());
        print!("{}", session.preview());
        println!();
    }

    let code = session.generated()?;
    print!("{}", format_code(&code, options.output));

    if let Some(path) = options.save {
        save_model(session.model(), path)?;
        eprintln!("{} {}", "saved".green().bold(), path);
    }

    Ok(())
}

/// Feed events to the session, collecting formatted notifications in order.
fn run_events(session: &mut GridSession, events: Vec<Event>) -> Vec<String> {
    let mut lines = Vec::new();
    for event in events {
        session.handle(event);
        lines.extend(session.take_notifications().iter().map(format_notification));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let re = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap();
        re.replace_all(s, "").to_string()
    }

    #[test]
    fn test_run_events_reports_notifications_in_order() {
        let script = "\
set columns 3
set rows 2
drag 1-1 1-2
drag 1-1
drag 2-1
remove div-1
";
        let events = parse_script(script).unwrap();
        let mut session = GridSession::new(GenerateOptions::default()).unwrap();

        let lines: Vec<String> = run_events(&mut session, events)
            .iter()
            .map(|l| strip_ansi(l))
            .collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("warning:"));
        assert!(lines[0].contains("div-1"));
        assert_eq!(lines[1], "info: item div-1 removed");

        let regions = session.regions();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].id, "div-1");
        assert_eq!(regions[0].range.start_row, 2);
    }

    #[test]
    fn test_unterminated_gesture_is_not_committed() {
        let events = parse_script("down 1-1\nenter 2-2\n").unwrap();
        let mut session = GridSession::new(GenerateOptions::default()).unwrap();
        run_events(&mut session, events);
        assert!(session.regions().is_empty());
        assert!(session.selection().is_active());
    }
}
