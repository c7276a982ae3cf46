//! Hit-chain bookkeeping shared by the offensive skills.

/// Default ticks a combo stays alive between hits.
const DEFAULT_WINDOW: u32 = 20;
/// Default number of hits before a combo ends on its own.
const DEFAULT_MAX_SIZE: usize = 16;

/// An in-progress chain of melee hits. The chain lapses when the window
/// timer runs out, the owner takes damage, or it reaches max size. Hits on
/// a different target keep the chain alive but reset the consecutive count.
#[derive(Debug)]
pub struct Combo {
    hits: Vec<f32>,
    consecutive: u32,
    last_target: Option<u32>,
    timer: u32,
    window: u32,
    max_size: usize,
}

impl Default for Combo {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE, DEFAULT_WINDOW)
    }
}

impl Combo {
    pub fn new(max_size: usize, window: u32) -> Self {
        Self {
            hits: Vec::new(),
            consecutive: 0,
            last_target: None,
            timer: 0,
            window,
            max_size,
        }
    }

    #[inline]
    pub fn in_progress(&self) -> bool {
        self.timer > 0
    }

    /// Total hits in the current chain.
    #[inline]
    pub fn size(&self) -> usize {
        self.hits.len()
    }

    /// Hits landed on the current target without switching.
    #[inline]
    pub fn consecutive_hits(&self) -> u32 {
        self.consecutive
    }

    #[inline]
    pub fn last_target(&self) -> Option<u32> {
        self.last_target
    }

    pub fn damage_total(&self) -> f32 {
        self.hits.iter().sum()
    }

    /// Record a landed hit, starting a new chain if none is live.
    pub fn on_hit_target(&mut self, target: u32, amount: f32) {
        if self.timer == 0 {
            self.hits.clear();
            self.consecutive = 0;
            self.last_target = None;
        }
        if self.last_target == Some(target) {
            self.consecutive += 1;
        } else {
            self.consecutive = 1;
            self.last_target = Some(target);
        }
        self.hits.push(amount);
        self.timer = self.window;
        if self.hits.len() >= self.max_size {
            self.end();
        }
    }

    /// Taking damage breaks the chain.
    pub fn on_owner_hurt(&mut self) {
        self.end();
    }

    pub fn end(&mut self) {
        self.timer = 0;
    }

    pub fn tick(&mut self) {
        if self.timer > 0 {
            self.timer -= 1;
        }
    }
}
