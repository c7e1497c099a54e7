#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    USER,
    PASS,
    ABOR,
    CWD,
    DELE,
    LIST,
    MKD,
    NOOP,
    PASV,
    PORT,
    PWD,
    QUIT,
    RETR,
    RMD,
    SIZE,
    STOR,
    TYPE,
}

impl FtpCommand {
    /// Looks a verb up in the command table. Matching is case-sensitive.
    pub fn from_verb(verb: &str) -> Option<FtpCommand> {
        match verb {
            "USER" => Some(FtpCommand::USER),
            "PASS" => Some(FtpCommand::PASS),
            "ABOR" => Some(FtpCommand::ABOR),
            "CWD" => Some(FtpCommand::CWD),
            "DELE" => Some(FtpCommand::DELE),
            "LIST" => Some(FtpCommand::LIST),
            "MKD" => Some(FtpCommand::MKD),
            "NOOP" => Some(FtpCommand::NOOP),
            "PASV" => Some(FtpCommand::PASV),
            "PORT" => Some(FtpCommand::PORT),
            "PWD" => Some(FtpCommand::PWD),
            "QUIT" => Some(FtpCommand::QUIT),
            "RETR" => Some(FtpCommand::RETR),
            "RMD" => Some(FtpCommand::RMD),
            "SIZE" => Some(FtpCommand::SIZE),
            "STOR" => Some(FtpCommand::STOR),
            "TYPE" => Some(FtpCommand::TYPE),
            _ => None,
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, FtpCommand::USER | FtpCommand::PASS)
    }
}
