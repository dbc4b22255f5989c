use scout_core::{CategoryCode, Msg};

pub const HELP: &str = "\
Commands:
  name <text>       set the asset name (e.g. name VacationRing)
  scan <code>       scan a category: TW, FW, DW or O
  region <r>|all    show one region or all of them
  copy [label]      print the visible links, optionally one category label
  results           print the visible results again
  status            print the current status
  cancel            stop the running scan
  reset             clear everything
  help              show this text
  quit              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Goes straight into the state machine.
    Send(Msg),
    Copy(Option<String>),
    Results,
    Status,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        // The name keeps its spaces here; the generator strips them.
        "name" => ReplCommand::Send(Msg::NameChanged(rest.to_string())),
        "scan" => {
            let code: CategoryCode = rest.parse().map_err(|err| format!("{err}"))?;
            ReplCommand::Send(Msg::CategorySelected(code))
        }
        "region" => match rest {
            "" => return Err("usage: region <name>|all".to_string()),
            r if r.eq_ignore_ascii_case("all") => {
                ReplCommand::Send(Msg::RegionFilterSelected(None))
            }
            r => ReplCommand::Send(Msg::RegionFilterSelected(Some(r.to_string()))),
        },
        "cancel" => ReplCommand::Send(Msg::CancelClicked),
        "reset" => ReplCommand::Send(Msg::ResetClicked),
        "copy" => ReplCommand::Copy((!rest.is_empty()).then(|| rest.to_string())),
        "results" => ReplCommand::Results,
        "status" => ReplCommand::Status,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };
    Ok(Some(command))
}
