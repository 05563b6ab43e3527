//! Frame-driven timers. Time only moves when [`Timers::tick`] is called with
//! the frame's `dt`, so the whole slideshow runs on the window's loop.

#[derive(Debug)]
struct Repeating<T> {
    period: f32,
    elapsed: f32,
    task: T,
}

#[derive(Debug)]
struct Pending<T> {
    remaining: f32,
    seq: u64,
    task: T,
}

#[derive(Debug)]
pub struct Timers<T> {
    repeating: Vec<Repeating<T>>,
    pending: Vec<Pending<T>>,
    seq: u64,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self { repeating: Vec::new(), pending: Vec::new(), seq: 0 }
    }
}

impl<T: Clone> Timers<T> {
    /// Fire `task` every `period` seconds until the timers are dropped.
    pub fn every(&mut self, period: f32, task: T) {
        debug_assert!(period > 0.0, "repeating timer needs a positive period");
        self.repeating.push(Repeating { period, elapsed: 0.0, task });
    }

    /// Fire `task` once, `delay` seconds from now.
    pub fn after(&mut self, delay: f32, task: T) {
        self.seq += 1;
        self.pending.push(Pending { remaining: delay, seq: self.seq, task });
    }

    pub fn has_repeating(&self) -> bool {
        !self.repeating.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Advance time by `dt` and return every task that came due, earliest
    /// first. Tasks scheduled for the same instant keep their insertion order.
    pub fn tick(&mut self, dt: f32) -> Vec<T> {
        // (time into this tick at which it fired, tie breaker, task)
        let mut due: Vec<(f32, u64, T)> = Vec::new();

        for (n, timer) in self.repeating.iter_mut().enumerate() {
            timer.elapsed += dt;
            while timer.elapsed >= timer.period {
                timer.elapsed -= timer.period;
                due.push((dt - timer.elapsed, n as u64, timer.task.clone()));
            }
        }

        let mut kept = Vec::with_capacity(self.pending.len());
        for mut timer in self.pending.drain(..) {
            timer.remaining -= dt;
            if timer.remaining <= 0.0 {
                due.push((dt + timer.remaining, u64::MAX / 2 + timer.seq, timer.task));
            } else {
                kept.push(timer);
            }
        }
        self.pending = kept;

        due.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        due.into_iter().map(|(_, _, task)| task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum T {
        Tick,
        Once(u8),
    }

    #[test]
    fn repeating_fires_each_period() {
        let mut timers = Timers::default();
        timers.every(5.0, T::Tick);
        assert!(timers.tick(4.5).is_empty());
        assert_eq!(timers.tick(0.5), vec![T::Tick]);
        assert!(timers.tick(4.0).is_empty());
        assert_eq!(timers.tick(1.0), vec![T::Tick]);
    }

    #[test]
    fn long_frame_fires_repeating_more_than_once() {
        let mut timers = Timers::default();
        timers.every(1.0, T::Tick);
        assert_eq!(timers.tick(3.5), vec![T::Tick, T::Tick, T::Tick]);
    }

    #[test]
    fn one_shot_fires_once() {
        let mut timers = Timers::default();
        timers.after(0.8, T::Once(1));
        assert!(timers.tick(0.5).is_empty());
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.tick(0.5), vec![T::Once(1)]);
        assert!(timers.tick(10.0).is_empty());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn due_tasks_come_out_in_time_order() {
        let mut timers = Timers::default();
        timers.after(0.75, T::Once(2));
        timers.after(0.25, T::Once(1));
        timers.every(0.5, T::Tick);
        assert_eq!(timers.tick(1.0), vec![T::Once(1), T::Tick, T::Once(2), T::Tick]);
    }
}
