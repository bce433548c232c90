use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::history::History;
use crate::store::HistoryBackend;

pub fn run<B: HistoryBackend>(history: &mut History<B>) -> Result<CmdResult> {
    let removed = history.len();
    history.clear();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cleared {} {}",
        removed,
        if removed == 1 { "entry" } else { "entries" }
    )));
    Ok(result)
}
