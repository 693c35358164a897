// Wire message codes for IBFT 2.0 consensus messages.

pub const PROPOSAL: u8 = 0x00;
pub const PREPARE: u8 = 0x01;
pub const COMMIT: u8 = 0x02;
pub const ROUND_CHANGE: u8 = 0x03;

pub const MESSAGE_SPACE: usize = 4;

pub fn message_name(code: u8) -> &'static str {
    match code {
        PROPOSAL => "Proposal",
        PREPARE => "Prepare",
        COMMIT => "Commit",
        ROUND_CHANGE => "RoundChange",
        _ => "<Invalid/Unknown IBFT Message Code>",
    }
}
