use crate::common::{BridgeError, Mode, Side, WorldState};

/// Remaining-cost estimate read off the agents holding the light.
///
/// In basic mode, while the light is away from `start_side`, this is the
/// slowest of them; otherwise the fastest. Not a lower bound in every
/// configuration.
pub fn estimate(state: &WorldState, mode: Mode, start_side: Side) -> Result<usize, BridgeError> {
    let people = state.light_side_agents();
    let (Some(fastest), Some(slowest)) = (people.first(), people.last()) else {
        return Err(BridgeError::EmptyGroup {
            side: state.light(),
        });
    };

    if state.light() != start_side && mode == Mode::Basic {
        Ok(slowest.cost)
    } else {
        Ok(fastest.cost)
    }
}
