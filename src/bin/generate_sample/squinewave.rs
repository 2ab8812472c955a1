use std::f64::consts::PI;

/// Highest accepted frequency in Hz.
const MAX_FREQ: f64 = 10_000.0;

/// Sync input level that counts as a trigger.
const SYNC_TRIGGER: f64 = 0.9997;

/// Like `f64::clamp`, but NaN maps to `max` instead of propagating.
fn clamp(x: f64, min: f64, max: f64) -> f64 {
    if x >= min && x <= max {
        x
    } else if x < min {
        min
    } else {
        max
    }
}

// ---------------------------------------------------------------------------
// Per-instance limits derived from the sample rate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Limits {
    /// Shortest sweep, in samples.
    min_sweep: f64,
    /// Largest sweep-phase step per sample.
    max_sweep_inc: f64,
    /// Phase advance per sample per Hz (phase spans 0..2).
    phase_per_hz: f64,
    /// Above this frequency the output is a plain cosine.
    max_sweep_freq: f64,
    /// Above this frequency hard sync requests are ignored.
    max_sync_freq: f64,
    /// Hard-sync sweep step per sample, in radians.
    sync_phase_inc: f64,
}

impl Limits {
    fn new(min_sweep: f64, sample_rate: f64) -> Self {
        let min_sweep = clamp(min_sweep, 4.0, 100.0);
        Limits {
            min_sweep,
            max_sweep_inc: 1.0 / min_sweep,
            phase_per_hz: 2.0 / sample_rate,
            max_sweep_freq: sample_rate / (2.0 * min_sweep),
            max_sync_freq: sample_rate / (3.0 * min_sweep.ln()),
            sync_phase_inc: 1.0 / min_sweep.ln(),
        }
    }
}

// ---------------------------------------------------------------------------
// Oscillator
// ---------------------------------------------------------------------------

/// Band-limited oscillator that morphs between sine, square, saw and pulse,
/// with hard sync and through-zero FM.
///
/// One cycle runs `phase` from 0 to 2 in four parts: a cosine sweep down,
/// a flat -1 until the midpoint (set by skew), a sweep up, and a flat +1.
/// `clip` shortens the sweeps; a sweep is never shorter than `min_sweep`
/// samples, which keeps the edges free of aliasing.
///
/// Per sample: [`update`](Self::update) (or the setters), then
/// [`generate`](Self::generate), then read [`audio`](Self::audio) and
/// [`sync`](Self::sync).
#[derive(Debug, Clone)]
pub struct Squinewave {
    freq: f64,
    raw_freq: f64,
    /// Stored as `1 - clip`, i.e. the sweep share of each half.
    clip: f64,
    /// Stored as `1 - skew`, i.e. the midpoint in 0..2.
    skew: f64,
    sync_in: bool,
    neg_freq: bool,

    phase: f64,
    sweep_phase: f64,
    hardsync_phase: f64,
    hardsync_inc: f64,

    audio_out: f64,
    sync_out: f64,

    limits: Limits,
}

impl Squinewave {
    /// `min_sweep` is the shortest edge in samples (4..100, around 4..20 is
    /// useful). A negative `phase_in` starts on the rising zero crossing,
    /// like a sine; see [`set_init_phase`](Self::set_init_phase).
    pub fn new(min_sweep: f64, sample_rate: f64, phase_in: f64) -> Self {
        let mut squine = Squinewave {
            freq: 220.0,
            raw_freq: 0.0,
            clip: 1.0,
            skew: 0.0,
            sync_in: false,
            neg_freq: false,
            phase: 0.0,
            sweep_phase: 0.0,
            hardsync_phase: 0.0,
            hardsync_inc: 0.0,
            audio_out: 0.0,
            sync_out: 0.0,
            limits: Limits::new(min_sweep, sample_rate),
        };
        squine.set_init_phase(phase_in);
        squine
    }

    /// Set all inputs for the next sample.
    pub fn update(&mut self, freq: f64, clip: f64, skew: f64, sync: f64) {
        self.set_freq(freq);
        self.set_clip(clip);
        self.set_skew(skew);
        self.set_sync(sync);
    }

    /// Frequency in Hz, up to 10 kHz. Negative values run the waveform
    /// backwards.
    pub fn set_freq(&mut self, freq: f64) {
        self.freq = clamp(freq.abs(), 0.0, MAX_FREQ);
        self.raw_freq = freq;
    }

    /// Squareness, 0..1.
    pub fn set_clip(&mut self, clip: f64) {
        self.clip = 1.0 - clamp(clip, 0.0, 1.0);
    }

    /// Left/right symmetry, -1..1.
    pub fn set_skew(&mut self, skew: f64) {
        self.skew = 1.0 - clamp(skew, -1.0, 1.0);
    }

    /// A value of 1.0 starts a hard sync: a fast sweep back to the start of
    /// the cycle over a handful of samples.
    pub fn set_sync(&mut self, sync: f64) {
        self.sync_in = sync >= SYNC_TRIGGER;
    }

    /// Last generated sample, in -1..=1.
    pub fn audio(&self) -> f64 {
        self.audio_out
    }

    /// 1.0 on the sample where a cycle ends, otherwise 0.0.
    pub fn sync(&self) -> f64 {
        self.sync_out
    }

    /// Produce one sample.
    pub fn generate(&mut self) {
        if self.sync_in {
            self.start_hardsync();
            self.sync_in = false;
        }

        self.advance_hardsync();
        self.follow_zero_crossing();

        let phase_inc = self.limits.phase_per_hz * self.freq;

        if self.freq >= self.limits.max_sweep_freq {
            self.audio_out = (PI * self.sweep_phase).cos();
            self.phase = self.sweep_phase;
            self.sweep_phase += phase_inc;
        } else {
            self.shape(phase_inc);
        }

        self.phase += phase_inc;
        self.wrap(phase_inc);
    }

    /// Place the oscillator at `phase_in` (0..2) of the symbolic cycle:
    /// 0..0.5 sweep down, 0.5..1 flat low, 1..1.5 sweep up, 1.5..2 flat
    /// high. Negative means 1.25, the rising zero crossing.
    ///
    /// Jumps the waveform, so only call it while the output is silent.
    pub fn set_init_phase(&mut self, phase_in: f64) {
        let phase_inc = self.limits.phase_per_hz * self.freq;
        let min_sweep = phase_inc * self.limits.min_sweep;
        let midpoint = clamp(self.skew, self.limits.min_sweep, 2.0 - self.limits.min_sweep);

        self.sweep_phase = if phase_in < 0.0 {
            1.25
        } else if phase_in > 2.0 {
            phase_in % 2.0
        } else {
            phase_in
        };

        if self.sweep_phase < 1.0 {
            let sweep_length = (self.clip * midpoint).max(min_sweep);
            if self.sweep_phase < 0.5 {
                self.phase = sweep_length * (self.sweep_phase * 2.0);
                self.sweep_phase *= 2.0;
            } else {
                let flat_length = midpoint - sweep_length;
                self.phase = sweep_length + flat_length * ((self.sweep_phase - 0.5) * 2.0);
                self.sweep_phase = 1.0;
            }
        } else {
            let sweep_length = (self.clip * (2.0 - midpoint)).max(min_sweep);
            if self.sweep_phase < 1.5 {
                self.phase = midpoint + sweep_length * ((self.sweep_phase - 1.0) * 2.0);
                self.sweep_phase = 1.0 + (self.sweep_phase - 1.0) * 2.0;
            } else {
                let flat_length = 2.0 - (midpoint + sweep_length);
                self.phase =
                    midpoint + sweep_length + flat_length * ((self.sweep_phase - 1.5) * 2.0);
                self.sweep_phase = 2.0;
            }
        }
    }

    fn start_hardsync(&mut self) {
        if self.hardsync_phase != 0.0 {
            return;
        }
        // Already on the last flat part: just end the cycle now.
        if self.sweep_phase == 2.0 {
            self.phase = 2.0;
            return;
        }
        if self.freq > self.limits.max_sync_freq {
            return;
        }
        self.hardsync_inc = self.limits.sync_phase_inc;
        self.hardsync_phase = self.hardsync_inc * 0.5;
    }

    /// While syncing, ramp the frequency towards `max_sync_freq` until the
    /// cycle wraps.
    fn advance_hardsync(&mut self) {
        if self.hardsync_phase == 0.0 {
            return;
        }
        let ramp = 0.5 * (1.0 - self.hardsync_phase.cos());
        self.freq += ramp * (self.limits.max_sync_freq - self.freq);
        self.hardsync_phase += self.hardsync_inc;
        if self.hardsync_phase > PI {
            self.hardsync_phase = PI;
            self.hardsync_inc = 0.0;
        }
    }

    /// Mirror the waveform when the frequency changes sign.
    fn follow_zero_crossing(&mut self) {
        let negative = self.raw_freq < 0.0;
        if negative != self.neg_freq && self.hardsync_phase == 0.0 {
            self.phase = 1.5 - self.phase;
            if self.phase < 0.0 {
                self.phase += 2.0;
            }
            self.sweep_phase = 2.0 - self.sweep_phase;
        }
        self.neg_freq = negative;
        if negative {
            self.skew = clamp(2.0 - self.skew, 0.0, 2.0);
        }
    }

    /// Sweep/flat state machine for one sample below `max_sweep_freq`.
    ///
    /// `sweep_phase` drives the output shape; `phase` tracks where in the
    /// cycle the flat parts end. When a sweep overshoots, the overshoot is
    /// carried into the flat part or straight into the next sweep.
    fn shape(&mut self, phase_inc: f64) {
        let min_sweep = phase_inc * self.limits.min_sweep;
        let midpoint = clamp(self.skew, min_sweep, 2.0 - min_sweep);
        let max_inc = self.limits.max_sweep_inc;

        if self.sweep_phase < 1.0 {
            let sweep_length = (self.clip * midpoint).max(min_sweep);
            self.audio_out = (PI * self.sweep_phase).cos();
            self.sweep_phase += (phase_inc / sweep_length).min(max_inc);

            if self.sweep_phase > 1.0 {
                let flat_length = midpoint - sweep_length;
                let overshoot = (self.sweep_phase - 1.0) * sweep_length;
                self.phase = midpoint - flat_length + overshoot - phase_inc;
                if flat_length >= overshoot {
                    self.sweep_phase = 1.0;
                } else {
                    let next_sweep = (self.clip * (2.0 - midpoint)).max(min_sweep);
                    self.sweep_phase = 1.0 + (overshoot - flat_length) / next_sweep;
                }
            }
        } else if self.sweep_phase == 1.0 && self.phase < midpoint {
            self.audio_out = -1.0;
        } else if self.sweep_phase < 2.0 {
            let sweep_length = (self.clip * (2.0 - midpoint)).max(min_sweep);
            if self.sweep_phase == 1.0 {
                let entered = (self.phase - midpoint).min(phase_inc) / sweep_length;
                self.sweep_phase = 1.0 + entered.min(max_inc);
            }
            self.audio_out = (PI * self.sweep_phase).cos();
            self.sweep_phase += (phase_inc / sweep_length).min(max_inc);

            if self.sweep_phase > 2.0 {
                let flat_length = 2.0 - (midpoint + sweep_length);
                let overshoot = (self.sweep_phase - 2.0) * sweep_length;
                self.phase = 2.0 - flat_length + overshoot - phase_inc;
                if flat_length >= overshoot {
                    self.sweep_phase = 2.0;
                } else {
                    let next_sweep = (self.clip * midpoint).max(min_sweep);
                    self.sweep_phase = 2.0 + (overshoot - flat_length) / next_sweep;
                }
            }
        } else {
            self.audio_out = 1.0;
            self.sweep_phase = 2.0;
        }
    }

    /// End of cycle: restart both phases and raise the sync output.
    fn wrap(&mut self, phase_inc: f64) {
        if !(self.sweep_phase >= 2.0 && self.phase >= 2.0) {
            self.sync_out = 0.0;
            return;
        }

        if self.hardsync_phase != 0.0 {
            self.sweep_phase = 0.0;
            self.phase = 0.0;
            self.hardsync_phase = 0.0;
            self.hardsync_inc = 0.0;
        } else {
            self.phase -= 2.0;
            if self.phase > phase_inc {
                // Aliasing territory; restart mid-step.
                self.phase = phase_inc * 0.5;
            }
            if self.freq < self.limits.max_sweep_freq {
                let min_sweep = phase_inc * self.limits.min_sweep;
                let midpoint = clamp(self.skew, min_sweep, 2.0 - min_sweep);
                let next_sweep = (self.clip * midpoint).max(min_sweep);
                self.sweep_phase = (self.phase / next_sweep).min(self.limits.max_sweep_inc);
            } else {
                self.sweep_phase = self.phase;
            }
        }

        self.sync_out = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f64 = 10_000.0;

    fn run(squine: &mut Squinewave, n: usize, freq: f64, clip: f64, skew: f64) -> Vec<f64> {
        (0..n)
            .map(|_| {
                squine.update(freq, clip, skew, 0.0);
                squine.generate();
                squine.audio()
            })
            .collect()
    }

    fn cycles(squine: &mut Squinewave, n: usize, freq: f64) -> usize {
        (0..n)
            .filter(|_| {
                squine.update(freq, 0.0, 0.0, 0.0);
                squine.generate();
                squine.sync() == 1.0
            })
            .count()
    }

    #[test]
    fn default_start_is_the_rising_zero_crossing() {
        let mut squine = Squinewave::new(7.0, SR, -1.0);
        squine.update(100.0, 0.0, 0.0, 0.0);
        squine.generate();
        assert!(squine.audio().abs() < 0.1, "first sample {}", squine.audio());
    }

    #[test]
    fn output_stays_within_unit_range() {
        for (clip, skew) in [(0.0, 0.0), (1.0, 0.0), (0.5, -0.8), (0.9, 0.9)] {
            let mut squine = Squinewave::new(7.0, SR, -1.0);
            for v in run(&mut squine, 4000, 55.0, clip, skew) {
                assert!(v.is_finite());
                assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&v), "{v} at clip {clip} skew {skew}");
            }
        }
    }

    #[test]
    fn full_clip_spends_time_on_the_flat_parts() {
        let mut squine = Squinewave::new(7.0, SR, -1.0);
        let out = run(&mut squine, 2000, 50.0, 1.0, 0.0);
        let flat = out.iter().filter(|v| v.abs() == 1.0).count();
        assert!(flat > out.len() / 2, "only {flat} flat samples");
    }

    #[test]
    fn sync_fires_once_per_cycle() {
        // 100 Hz at 10 kHz: one cycle every 100 samples.
        let mut squine = Squinewave::new(7.0, SR, -1.0);
        let n = cycles(&mut squine, 1000, 100.0);
        assert!((9..=11).contains(&n), "{n} cycles");
    }

    #[test]
    fn sync_input_restarts_the_cycle_early() {
        // 10 Hz: a free-running cycle takes 1000 samples.
        let mut squine = Squinewave::new(7.0, SR, -1.0);
        run(&mut squine, 50, 10.0, 0.0, 0.0);

        squine.update(10.0, 0.0, 0.0, 1.0);
        squine.generate();
        let restarted = (0..100).any(|_| {
            squine.update(10.0, 0.0, 0.0, 0.0);
            squine.generate();
            squine.sync() == 1.0
        });
        assert!(restarted, "hard sync did not end the cycle within 100 samples");
    }

    #[test]
    fn sync_below_trigger_level_is_ignored() {
        let mut squine = Squinewave::new(7.0, SR, -1.0);
        run(&mut squine, 50, 10.0, 0.0, 0.0);

        squine.update(10.0, 0.0, 0.0, 0.5);
        squine.generate();
        let synced = (0..100).any(|_| {
            squine.update(10.0, 0.0, 0.0, 0.0);
            squine.generate();
            squine.sync() == 1.0
        });
        assert!(!synced);
    }

    #[test]
    fn clamp_maps_nan_to_max() {
        assert_eq!(clamp(f64::NAN, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }
}
