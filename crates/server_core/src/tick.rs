//! Tick orchestration: run the schedule once and record timings.

use crate::schedule::{Ctx, Schedule};
use crate::ServerState;

/// Run one authoritative tick. Replication output and deaths land in `ctx`.
pub fn run_tick(srv: &mut ServerState, ctx: &mut Ctx) {
    let t0 = std::time::Instant::now();
    Schedule.run(srv, ctx);
    srv.tick_count += 1;
    metrics::histogram!("tick.ms").record(t0.elapsed().as_secs_f64() * 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tick_advances_counter() {
        let mut srv = ServerState::with_seed(3);
        let mut ctx = Ctx::default();
        run_tick(&mut srv, &mut ctx);
        run_tick(&mut srv, &mut ctx);
        assert_eq!(srv.tick_count, 2);
        assert!(ctx.deaths.is_empty());
    }
}
