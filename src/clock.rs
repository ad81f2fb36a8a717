/// Frame-counted periodic timer.
///
/// `T` is the owner the callback acts on. The owner calls [`tick`](Clock::tick)
/// exactly once per frame; the callback runs on the `period`-th call, then on
/// every `period` calls after that. A period of 1 fires every frame.
///
/// The callback is a plain function pointer, so ticking never allocates.
///
/// # Usage
/// ```
/// use sprig::Clock;
///
/// struct Blink { on: bool, clock: Clock<Blink> }
///
/// let mut blink = Blink { on: false, clock: Clock::new(30, |b: &mut Blink| b.on = !b.on) };
/// for _ in 0..30 {
///     Clock::tick_within(&mut blink, |b| &mut b.clock);
/// }
/// assert!(blink.on);
/// ```
pub struct Clock<T> {
    period: u16,
    action: fn(&mut T),
    elapsed: u16,
}

impl<T> Clock<T> {
    /// Panics if `period` is 0; a clock that can never fire is a programming error.
    pub fn new(period: u16, action: fn(&mut T)) -> Self {
        assert!(period >= 1, "Clock period must be at least 1 frame");
        Self {
            period,
            action,
            elapsed: 0,
        }
    }

    /// Advance one frame for an owner that lives outside the clock's storage.
    pub fn tick(&mut self, owner: &mut T) {
        if self.advance() {
            (self.action)(owner);
        }
    }

    /// Advance one frame for a clock stored inside `owner` itself.
    ///
    /// `clock` projects the owner onto its clock field. The borrow of the clock
    /// ends before the callback receives the owner.
    pub fn tick_within(owner: &mut T, clock: impl FnOnce(&mut T) -> &mut Clock<T>) {
        let clock = clock(owner);
        if clock.advance() {
            let action = clock.action;
            action(owner);
        }
    }

    /// Returns `true` when this tick completes a period.
    fn advance(&mut self) -> bool {
        if self.elapsed < self.period - 1 {
            self.elapsed += 1;
            false
        } else {
            self.elapsed = 0;
            true
        }
    }

    pub fn period(&self) -> u16 {
        self.period
    }

    /// Frames counted since the last firing (or construction). Always `< period`.
    pub fn elapsed(&self) -> u16 {
        self.elapsed
    }

    /// Restart the current period without firing.
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }
}

impl<T> std::fmt::Debug for Clock<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clock")
            .field("period", &self.period)
            .field("elapsed", &self.elapsed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        fired: u32,
    }

    fn bump(c: &mut Counter) {
        c.fired += 1;
    }

    /// Period 3 fires on calls 3 and 6 and nowhere else.
    #[test]
    fn period_three_fires_on_third_and_sixth_tick() {
        let mut clock = Clock::new(3, bump);
        let mut counter = Counter::default();
        let mut fired_on = Vec::new();

        for call in 1..=6 {
            let before = counter.fired;
            clock.tick(&mut counter);
            if counter.fired != before {
                fired_on.push(call);
            }
        }

        assert_eq!(fired_on, vec![3, 6]);
    }

    #[test]
    fn period_one_fires_every_frame() {
        let mut clock = Clock::new(1, bump);
        let mut counter = Counter::default();
        for _ in 0..5 {
            clock.tick(&mut counter);
        }
        assert_eq!(counter.fired, 5);
        assert_eq!(clock.elapsed(), 0);
    }

    #[test]
    fn one_short_of_a_period_never_fires() {
        let mut clock = Clock::new(10, bump);
        let mut counter = Counter::default();
        for _ in 0..9 {
            clock.tick(&mut counter);
        }
        assert_eq!(counter.fired, 0);
        assert_eq!(clock.elapsed(), 9);
    }

    #[test]
    #[should_panic(expected = "at least 1 frame")]
    fn zero_period_panics() {
        let _ = Clock::<Counter>::new(0, bump);
    }

    #[test]
    fn reset_restarts_the_period() {
        let mut clock = Clock::new(4, bump);
        let mut counter = Counter::default();
        clock.tick(&mut counter);
        clock.tick(&mut counter);
        clock.reset();
        for _ in 0..3 {
            clock.tick(&mut counter);
        }
        assert_eq!(counter.fired, 0);
        clock.tick(&mut counter);
        assert_eq!(counter.fired, 1);
    }

    struct Owner {
        fired: u32,
        clock: Clock<Owner>,
    }

    #[test]
    fn tick_within_reaches_owner_holding_the_clock() {
        let mut owner = Owner {
            fired: 0,
            clock: Clock::new(2, |o: &mut Owner| o.fired += 1),
        };
        for _ in 0..6 {
            Clock::tick_within(&mut owner, |o| &mut o.clock);
        }
        assert_eq!(owner.fired, 3);
    }
}
