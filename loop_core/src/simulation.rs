use std::marker::PhantomData;

use cg_math::Interpolate;

/// Consumer side of the loop.
///
/// The scheduler owns the two most recent states; implementors only produce
/// new ones (`update`), blend them (`interpolate`) and draw (`render`).
/// Callbacks run synchronously on the caller's thread, updates first.
pub trait Simulation {
    type State: Interpolate;

    /// Advances `state` by exactly `dt` seconds.
    fn update(&mut self, state: &Self::State, dt: f32) -> Self::State;

    /// Render-time blend of two snapshots. `alpha` is in `[0, 1]`.
    fn interpolate(&self, previous: &Self::State, current: &Self::State, alpha: f32) -> Self::State {
        previous.interpolate(current, alpha)
    }

    /// Draws a state. Must not feed back into simulation state.
    fn render(&mut self, state: &Self::State);
}

/// `Simulation` assembled from closures.
pub struct FnSimulation<S, U, I, R> {
    update: U,
    interpolate: I,
    render: R,
    _state: PhantomData<fn() -> S>,
}

impl<S, U, I, R> FnSimulation<S, U, I, R>
where
    S: Interpolate,
    U: FnMut(&S, f32) -> S,
    I: Fn(&S, &S, f32) -> S,
    R: FnMut(&S),
{
    pub fn new(update: U, interpolate: I, render: R) -> Self {
        Self {
            update,
            interpolate,
            render,
            _state: PhantomData,
        }
    }
}

impl<S, U, I, R> Simulation for FnSimulation<S, U, I, R>
where
    S: Interpolate,
    U: FnMut(&S, f32) -> S,
    I: Fn(&S, &S, f32) -> S,
    R: FnMut(&S),
{
    type State = S;

    #[inline]
    fn update(&mut self, state: &S, dt: f32) -> S {
        (self.update)(state, dt)
    }

    #[inline]
    fn interpolate(&self, previous: &S, current: &S, alpha: f32) -> S {
        (self.interpolate)(previous, current, alpha)
    }

    #[inline]
    fn render(&mut self, state: &S) {
        (self.render)(state)
    }
}
