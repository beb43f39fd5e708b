//! Line commands for the terminal front end

use anyhow::{anyhow, bail, Result};

use dex_catalog::Intent;
use dex_core::SortKey;

pub const HELP: &str = "\
Commands:
  search <text>     filter by name (empty text clears the search)
  type <name>       toggle a type filter
  gen <n|all>       pick a generation
  sort <key>        id_asc, id_desc, name_asc, name_desc, height_asc, height_desc, weight_asc, weight_desc
  next | prev       change page
  page <n>          jump to a page
  clear             reset every filter
  show <id>         open the detail panel
  types             list types and generations
  help              this text
  quit              exit";

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(Intent),
    Show(u32),
    Filters,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "search" | "s" => Command::Query(Intent::Search(rest.to_string())),
        "type" | "t" => {
            if rest.is_empty() {
                bail!("type needs a name");
            }
            Command::Query(Intent::ToggleCategory(rest.to_lowercase()))
        }
        "gen" | "g" => {
            let group = match rest {
                "" | "all" => None,
                n => Some(n.parse().map_err(|_| anyhow!("Not a generation: {}", n))?),
            };
            Command::Query(Intent::SelectGroup(group))
        }
        "sort" => {
            let key: SortKey = rest.parse()?;
            Command::Query(Intent::Sort(key))
        }
        "next" | "n" => Command::Query(Intent::NextPage),
        "prev" | "p" => Command::Query(Intent::PreviousPage),
        "page" => {
            let page = rest.parse().map_err(|_| anyhow!("Not a page number: {}", rest))?;
            Command::Query(Intent::GoToPage(page))
        }
        "clear" => Command::Query(Intent::ClearFilters),
        "show" => {
            let id = rest
                .trim_start_matches('#')
                .parse()
                .map_err(|_| anyhow!("Not an id: {}", rest))?;
            Command::Show(id)
        }
        "types" | "filters" => Command::Filters,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "" => bail!("Type a command, or help"),
        other => bail!("Unknown command: {}", other),
    };

    Ok(command)
}
