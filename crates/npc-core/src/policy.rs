use crate::TickContext;

/// A decision engine driven once per external time step.
///
/// `A` is the agent context owned by the caller. Engines read and write it only for the duration
/// of a single `tick` call and never keep references to it between ticks.
pub trait Policy<A>: 'static {
    fn tick(&mut self, ctx: &TickContext, agent: &mut A);
}

impl<A> Policy<A> for Box<dyn Policy<A>>
where
    A: 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: &mut A) {
        (**self).tick(ctx, agent)
    }
}
