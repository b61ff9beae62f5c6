use crate::board::Rules;
use crate::error::BoardError;

// Leaf count via make/unmake; exercises the push/pop discipline the search relies on.
pub fn perft<R: Rules>(pos: &mut R, depth: u32) -> Result<u64, BoardError> {
    if depth == 0 { return Ok(1); }
    let moves = pos.legal_moves();
    if depth == 1 { return Ok(moves.len() as u64); }
    let mut nodes = 0u64;
    for m in moves {
        let mut child = pos.push_scoped(m)?;
        nodes += perft(&mut *child, depth - 1)?;
    }
    Ok(nodes)
}
