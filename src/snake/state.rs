//! The snake's tick-level state machine, independent of any entities.
//!
//! All movement rules live here: pending-direction commit, toroidal
//! wraparound, self-collision, and growth bookkeeping. The systems in the
//! parent module only feed it input and mirror the result into the world.

use bevy::prelude::*;

use crate::game::{Direction, Position};

/// Result of a single [`SnakeState::advance`] tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The head moved to this cell; the body has been updated.
    Moved(Position),
    /// The new head would land on the body. Nothing was mutated.
    SelfCollision,
}

/// The snake: body cells head-first, committed and pending direction, and
/// the length the body is growing toward.
#[derive(Resource, Debug, Clone)]
pub struct SnakeState {
    body: Vec<Position>,
    direction: Direction,
    pending_direction: Option<Direction>,
    target_length: usize,
    width: i32,
    height: i32,
    start: Position,
}

impl SnakeState {
    /// A length-1 snake at `start`, heading right, on a `width` x `height`
    /// toroidal grid.
    pub fn new(width: i32, height: i32, start: Position) -> Self {
        SnakeState {
            body: vec![start],
            direction: Direction::Right,
            pending_direction: None,
            target_length: 1,
            width,
            height,
            start,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// The direction the next `advance` will move in if no turn is pending.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Request a direction change for the next tick.
    ///
    /// A request opposite to the committed direction is silently dropped
    /// while the snake has a tail; a length-1 snake may reverse freely. A
    /// second request in the same tick overwrites the first.
    pub fn turn(&mut self, requested: Direction) {
        if requested != self.direction.opposite() || self.body.len() == 1 {
            self.pending_direction = Some(requested);
        }
    }

    /// Advance one tick: commit any pending turn, move the head one cell
    /// with wraparound, and check for self-collision before touching the
    /// body.
    ///
    /// The head's own cell and the neck (index 1) are excluded from the
    /// collision check; the neck is the cell the head just vacated on a
    /// no-growth tick, so hitting it is not a real overlap.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if let Some(pending) = self.pending_direction.take() {
            self.direction = pending;
        }

        let (dx, dy) = self.direction.delta();
        let head = self.head();
        let new_head = Position {
            x: (head.x + dx + self.width) % self.width,
            y: (head.y + dy + self.height) % self.height,
        };

        if self.body.len() > 2 && self.body[2..].contains(&new_head) {
            return AdvanceOutcome::SelfCollision;
        }

        self.body.insert(0, new_head);
        if self.body.len() > self.target_length {
            self.body.pop();
        }

        AdvanceOutcome::Moved(new_head)
    }

    /// Raise the target length by one; the next `advance` keeps its tail.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Reinitialize to the starting state: length 1 at the start cell,
    /// heading right, nothing pending.
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push(self.start);
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.target_length = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    fn snake() -> SnakeState {
        SnakeState::new(32, 24, pos(16, 12))
    }

    #[test]
    fn turn_then_three_advances() {
        let mut state = snake();
        state.turn(Direction::Up);
        for _ in 0..3 {
            state.advance();
        }
        assert_eq!(state.head(), pos(16, 9));
        assert_eq!(state.body(), &[pos(16, 9)]);
    }

    #[test]
    fn advance_wraps_at_left_edge() {
        let mut state = SnakeState::new(32, 24, pos(0, 0));
        state.turn(Direction::Left); // length 1, reversal is allowed
        assert_eq!(state.advance(), AdvanceOutcome::Moved(pos(31, 0)));
    }

    #[test]
    fn body_stays_in_bounds_over_many_ticks() {
        let mut state = snake();
        let turns = [
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ];
        for (i, &turn) in turns.iter().cycle().take(500).enumerate() {
            if i % 7 == 0 {
                state.grow();
            }
            state.turn(turn);
            if state.advance() == AdvanceOutcome::SelfCollision {
                state.reset();
            }
            for cell in state.body() {
                assert!((0..32).contains(&cell.x), "col out of range: {cell:?}");
                assert!((0..24).contains(&cell.y), "row out of range: {cell:?}");
            }
        }
    }

    #[test]
    fn reversal_rejected_with_tail() {
        let mut state = snake();
        state.grow();
        state.advance();
        state.advance();
        assert_eq!(state.len(), 2);
        assert_eq!(state.direction(), Direction::Right);

        state.turn(Direction::Left);
        assert_eq!(state.pending_direction, None);

        // A legal turn still goes through afterwards.
        state.turn(Direction::Up);
        assert_eq!(state.pending_direction, Some(Direction::Up));
    }

    #[test]
    fn later_turn_overwrites_pending() {
        let mut state = snake();
        state.turn(Direction::Up);
        state.turn(Direction::Down);
        state.advance();
        assert_eq!(state.direction(), Direction::Down);
    }

    #[test]
    fn length_is_stable_without_growth() {
        let mut state = snake();
        state.grow();
        state.grow();
        state.advance();
        state.advance();
        assert_eq!(state.len(), 3);
        for _ in 0..10 {
            state.advance();
            assert_eq!(state.len(), 3);
        }
    }

    #[test]
    fn grow_adds_exactly_one_segment_per_advance() {
        let mut state = snake();
        assert_eq!(state.len(), 1);
        state.grow();
        state.advance();
        assert_eq!(state.len(), 2);
        state.advance();
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn neck_is_not_a_collision() {
        // Length 2 heading right: the new head lands on the neck cell the
        // head is vacating. Must not count as a collision.
        let mut state = snake();
        state.body = vec![pos(2, 2), pos(3, 2)];
        state.target_length = 2;
        assert_eq!(state.advance(), AdvanceOutcome::Moved(pos(3, 2)));
        assert_eq!(state.body(), &[pos(3, 2), pos(2, 2)]);
    }

    #[test]
    fn self_collision_leaves_body_untouched() {
        // Head at (2,2), body curling back so that moving right lands on
        // body[3].
        let mut state = snake();
        state.body = vec![pos(2, 2), pos(2, 3), pos(3, 3), pos(3, 2), pos(4, 2)];
        state.target_length = 5;
        state.direction = Direction::Right;

        let before = state.body.clone();
        assert_eq!(state.advance(), AdvanceOutcome::SelfCollision);
        assert_eq!(state.body, before);
        assert_eq!(state.len(), 5);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut state = snake();
        state.grow();
        state.grow();
        state.turn(Direction::Down);
        state.advance();
        state.advance();
        state.turn(Direction::Left);

        state.reset();
        assert_eq!(state.body(), &[pos(16, 12)]);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.pending_direction, None);
        assert_eq!(state.target_length, 1);
    }
}
