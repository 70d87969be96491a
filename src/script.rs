//! Event scripts: a line-oriented text form of presentation-layer events.
//!
//! ```text
//! # comments and blank lines are ignored
//! set columns 3
//! set container-height-unit vh
//! drag 1-1 1-2        # down on the first cell, enter the rest, up
//! down 2-1
//! enter 2-2
//! up
//! remove div-1        # same as double-clicking the item
//! reset
//! ```

use thiserror::Error;

use crate::context::{Cell, ConfigField, Event};

#[derive(Error, Debug, PartialEq)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// Parse a whole script into the events it stands for.
pub fn parse_script(content: &str) -> Result<Vec<Event>, ScriptError> {
    let mut events = Vec::new();
    for (i, raw_line) in content.lines().enumerate() {
        let line = i + 1;
        let text = raw_line.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        parse_line(text, &mut events).map_err(|message| ScriptError { line, message })?;
    }
    Ok(events)
}

fn parse_line(text: &str, events: &mut Vec<Event>) -> Result<(), String> {
    let mut words = text.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(());
    };
    let args: Vec<&str> = words.collect();

    match command {
        "set" => {
            let Some((field, value)) = args.split_first() else {
                return Err("usage: set <field> <value>".to_string());
            };
            let field: ConfigField = field.parse()?;
            events.push(Event::ConfigFieldChange {
                field,
                raw: value.join(" "),
            });
        }
        "down" => events.push(Event::PointerDown(single_cell(command, &args)?)),
        "enter" => events.push(Event::PointerEnter(single_cell(command, &args)?)),
        "up" => {
            no_args(command, &args)?;
            events.push(Event::PointerUp);
        }
        "cancel" => {
            no_args(command, &args)?;
            events.push(Event::PointerCancel);
        }
        "drag" => {
            let cells = args
                .iter()
                .map(|a| a.parse::<Cell>().map_err(|e| e.to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            let Some((first, rest)) = cells.split_first() else {
                return Err("usage: drag <row-col> [<row-col>...]".to_string());
            };
            events.push(Event::PointerDown(*first));
            events.extend(rest.iter().copied().map(Event::PointerEnter));
            events.push(Event::PointerUp);
        }
        "remove" => match args.as_slice() {
            [id] => events.push(Event::RegionDoubleClick((*id).to_string())),
            _ => return Err("usage: remove <region-id>".to_string()),
        },
        "reset" => {
            no_args(command, &args)?;
            events.push(Event::Reset);
        }
        other => return Err(format!("unknown command '{}'", other)),
    }

    Ok(())
}

fn single_cell(command: &str, args: &[&str]) -> Result<Cell, String> {
    match args {
        [cell] => cell.parse::<Cell>().map_err(|e| e.to_string()),
        _ => Err(format!("usage: {} <row-col>", command)),
    }
}

fn no_args(command: &str, args: &[&str]) -> Result<(), String> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(format!("'{}' takes no arguments", command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = r#"
# build a header
set columns 3
set item-width-mode custom   # switch to a fixed size
drag 1-1 1-3
down 2-1
enter 2-2
up
cancel
remove div-1
reset
"#;
        let events = parse_script(script).unwrap();
        assert_eq!(
            events,
            vec![
                Event::ConfigFieldChange {
                    field: ConfigField::Columns,
                    raw: "3".to_string()
                },
                Event::ConfigFieldChange {
                    field: ConfigField::ItemWidthMode,
                    raw: "custom".to_string()
                },
                Event::PointerDown(Cell::new(1, 1)),
                Event::PointerEnter(Cell::new(1, 3)),
                Event::PointerUp,
                Event::PointerDown(Cell::new(2, 1)),
                Event::PointerEnter(Cell::new(2, 2)),
                Event::PointerUp,
                Event::PointerCancel,
                Event::RegionDoubleClick("div-1".to_string()),
                Event::Reset,
            ]
        );
    }

    #[test]
    fn test_set_without_value_passes_empty_text() {
        let events = parse_script("set gap").unwrap();
        assert_eq!(
            events,
            vec![Event::ConfigFieldChange {
                field: ConfigField::Gap,
                raw: String::new()
            }]
        );
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_script("set columns 2\n\njump 1-1\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("unknown command 'jump'"));

        let err = parse_script("down 0-1").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("invalid cell id"));

        let err = parse_script("set colour red").unwrap_err();
        assert!(err.message.contains("unknown config field"));

        assert!(parse_script("drag").is_err());
        assert!(parse_script("up now").is_err());
        assert!(parse_script("remove").is_err());
        assert!(parse_script("enter 1-1 1-2").is_err());
    }
}
