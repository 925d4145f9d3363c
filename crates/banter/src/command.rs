/// What a line typed at the prompt asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// Nothing but whitespace.
    Empty,
    /// Text to send to the model.
    Message(&'a str),
    Reset,
    Save,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        match line {
            "" => Command::Empty,
            "/reset" | "/clear" => Command::Reset,
            "/save" => Command::Save,
            "/help" => Command::Help,
            "/quit" | "/exit" => Command::Quit,
            text => Command::Message(text),
        }
    }
}

pub const HELP: &str = "\
/reset  clear the conversation
/save   save the conversation as JSON
/help   show this help
/quit   leave";
