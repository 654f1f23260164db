//! Parsing of the line commands typed at the prompt.

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Assign the current photo to an email. The email may be empty.
    Assign(String),
    /// Show the warning, if any, for an email without assigning.
    Check(String),
    List,
    /// Fetch another photo, e.g. after a failed fetch.
    Next,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command {0:?}")]
    Unknown(String),
}

/// Help text listing every command.
pub const HELP: &str = "\
Commands:
  assign <email>   assign the current photo to <email> (alias: a)
  check <email>    check an email address without assigning (alias: c)
  list             show every email and its photos (alias: l)
  next             fetch another photo (alias: n, retry)
  help             show this help (alias: h, ?)
  quit             exit (alias: q, exit)";

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// The first word selects the command; for `assign` and `check` the rest of
/// the line, trimmed, is the email.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "assign" | "a" => Command::Assign(rest.to_string()),
        "check" | "c" => Command::Check(rest.to_string()),
        "list" | "l" => Command::List,
        "next" | "n" | "retry" => Command::Next,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_no_command() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   \t"), Ok(None));
    }

    #[test]
    fn assign_takes_rest_of_line() {
        assert_eq!(
            parse("assign  alice@example.com  "),
            Ok(Some(Command::Assign("alice@example.com".into())))
        );
        assert_eq!(
            parse("a user@ex ample.com"),
            Ok(Some(Command::Assign("user@ex ample.com".into())))
        );
    }

    #[test]
    fn assign_without_email_is_empty() {
        assert_eq!(parse("assign"), Ok(Some(Command::Assign(String::new()))));
    }

    #[test]
    fn email_case_is_preserved() {
        assert_eq!(
            parse("ASSIGN Bob@Example.com"),
            Ok(Some(Command::Assign("Bob@Example.com".into())))
        );
    }

    #[test]
    fn aliases() {
        assert_eq!(parse("c x@y.z"), Ok(Some(Command::Check("x@y.z".into()))));
        assert_eq!(parse("l"), Ok(Some(Command::List)));
        assert_eq!(parse("retry"), Ok(Some(Command::Next)));
        assert_eq!(parse("?"), Ok(Some(Command::Help)));
        assert_eq!(parse("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse("adopt bob@example.com"),
            Err(CommandError::Unknown("adopt".into()))
        );
    }
}
