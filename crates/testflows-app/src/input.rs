//! Line input: continuation lines and slash commands.

/// What the user asked for with one complete input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    /// New conversation against the same webhook.
    Reset,
    /// Forget the webhook and ask for a new one.
    Reconfigure,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(text: String) -> Self {
        match text.trim() {
            "/reset" => Command::Reset,
            "/config" => Command::Reconfigure,
            "/history" => Command::History,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            word if word.starts_with('/') && !word.contains(char::is_whitespace) => {
                Command::Unknown(word.to_string())
            }
            _ => Command::Send(text),
        }
    }
}

pub const HELP: &str = "\
/reset    start a new conversation (Reiniciar Chat)
/config   configure another webhook (Configurar)
/history  print the whole conversation
/quit     exit
End a line with \\ to continue the message on the next line.";

/// Joins lines ending in `\` into one multi-line message.
#[derive(Debug, Default)]
pub struct InputBuffer {
    lines: Vec<String>,
}

impl InputBuffer {
    /// Feed one raw line. Returns the complete input once a line does not
    /// end with a continuation backslash.
    pub fn push(&mut self, line: &str) -> Option<String> {
        match line.strip_suffix('\\') {
            Some(partial) => {
                self.lines.push(partial.to_string());
                None
            }
            None => {
                self.lines.push(line.to_string());
                Some(std::mem::take(&mut self.lines).join("\n"))
            }
        }
    }

    pub fn is_continuing(&self) -> bool {
        !self.lines.is_empty()
    }
}
