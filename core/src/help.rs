//! Help system for adgrid commands.

pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => overview(),
        Some(t) => {
            if let Some(text) = command_help(t) {
                return text;
            }
            if let Some(text) = group_help(t) {
                return text;
            }
            format!("Unknown help topic: '{}'. Run 'adgrid help' for a list of commands.", t)
        }
    }
}


fn overview() -> String {
    "\
adgrid — ad-space grid command-line interface

Usage: adgrid [--layout <path>] <command> [args...]

Commands:
  show                       Print every ad space as JSON
  status                     Show item, lock and selection counts
  help [topic]               Show help

Layout commands:
  import <file>              Replace the layout with a serialized layout file
  export                     Print the serialized layout

Item commands:
  add                        Add a new 3x3 ad space at the top-left
  remove <id>                Remove an ad space
  lock <id>                  Toggle an ad space's lock
  move <id> <x> <y>          Move an ad space to a cell
  resize <id> <w> <h>        Resize an ad space (minimum 3x3)

Run 'adgrid help <command>' for detailed help on a specific command."
        .into()
}


fn group_help(group: &str) -> Option<String> {
    let text = match group {
        "layout" => "\
Layout commands — persist and restore the grid

  import <file>
    Parse a serialized layout (a JSON array of
    {x, y, w, h, content, minW, minH, locked}) and load it. Every item is
    held to a 3x3 minimum. Invalid files leave the layout untouched.

  export
    Print the current layout in the same format.",
        "item" => "\
Item commands — edit individual ad spaces

  add                   New 3x3 ad space labelled 'New Ad Space'
  remove <id>           Remove by id (see 'adgrid show')
  lock <id>             Lock or unlock; locked items cannot move or resize
  move <id> <x> <y>     Move to column x, row y
  resize <id> <w> <h>   Resize, never below 3x3",
        _ => return None,
    };
    Some(text.into())
}


fn command_help(cmd: &str) -> Option<String> {
    let text = match cmd {
        "show" => "adgrid show\n\nPrint every ad space with geometry, label, classes and attributes.",
        "status" => "adgrid status\n\nShow how many ad spaces exist, how many are locked, and the selection.",
        "import" => "adgrid import <file>\n\nReplace the layout with the serialized layout in <file>.",
        "export" => "adgrid export\n\nPrint the serialized layout as a JSON array.",
        "add" => "adgrid add\n\nAdd a new 3x3 ad space at column 0.",
        "remove" => "adgrid remove <id>\n\nRemove the ad space with the given id.",
        "lock" => "adgrid lock <id>\n\nToggle the lock on an ad space.",
        "move" => "adgrid move <id> <x> <y>\n\nMove an unlocked ad space to column x, row y.",
        "resize" => "adgrid resize <id> <w> <h>\n\nResize an unlocked ad space. Sizes below 3x3 are raised to 3x3.",
        _ => return None,
    };
    Some(text.into())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_lists_commands() {
        let text = help_text(None);
        assert!(text.contains("adgrid"));
        assert!(text.contains("import <file>"));
        assert!(text.contains("lock <id>"));
    }

    #[test]
    fn command_topic() {
        assert!(help_text(Some("resize")).contains("3x3"));
    }

    #[test]
    fn group_topic() {
        assert!(help_text(Some("layout")).contains("minW"));
    }

    #[test]
    fn unknown_topic() {
        assert!(help_text(Some("bogus")).starts_with("Unknown help topic"));
    }
}
