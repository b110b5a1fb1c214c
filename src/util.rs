use crate::{FemError, FemResult, Stage};

pub fn flags_to_indicies(flags: &[bool]) -> Vec<usize> {
  flags
    .iter()
    .enumerate()
    .filter_map(|(i, &flag)| flag.then_some(i))
    .collect()
}

/// Maps every global index to its position within `indicies`, if present.
pub fn local_positions(indicies: &[usize], len: usize) -> FemResult<Vec<Option<usize>>> {
  let mut positions = vec![None; len];
  for (ilocal, &iglobal) in indicies.iter().enumerate() {
    let position = positions
      .get_mut(iglobal)
      .ok_or(FemError::IndexOutOfRange {
        stage: Stage::Solve,
        index: iglobal,
        size: len,
      })?;
    *position = Some(ilocal);
  }
  Ok(positions)
}
