use crate::core_error::FtpError;

/// One parsed client request: the verb and whatever followed the first space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    verb: String,
    argument: Option<String>,
}

impl Command {
    /// Parses a raw control line. The input must contain the CRLF terminator;
    /// the first CRLF is stripped before splitting on the first space.
    pub fn parse(raw: &str) -> Result<Self, FtpError> {
        let pos = raw
            .find("\r\n")
            .ok_or_else(|| FtpError::InvalidCommandFormat(raw.to_string()))?;

        let mut line = String::with_capacity(raw.len() - 2);
        line.push_str(&raw[..pos]);
        line.push_str(&raw[pos + 2..]);

        let command = match line.split_once(' ') {
            Some((verb, argument)) => Self {
                verb: verb.to_string(),
                argument: Some(argument.to_string()),
            },
            None => Self {
                verb: line,
                argument: None,
            },
        };
        Ok(command)
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }

    /// The argument, or an empty string when the client sent none.
    pub fn arg(&self) -> &str {
        self.argument().unwrap_or("")
    }
}
