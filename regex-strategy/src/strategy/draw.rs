use std::collections::HashMap;

use bon::Builder;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use thiserror::Error;

use super::{Characters, Strategy};

#[derive(Builder, Debug, Clone)]
pub struct DrawConfig {
    /// Number of draws [`Drawer::find()`] makes before giving up.
    #[builder(default = 100)]
    pub max_examples: usize,

    /// Number of times a [`Strategy::Filter`] redraws its base before giving up on the draw.
    #[builder(default = 3)]
    pub filter_attempts: usize,

    /// Average number of optional elements of a [`Strategy::Repeat`].
    ///
    /// Clamped to `0..=`[`MAX_AVERAGE_SIZE`]. NaN counts as 0.
    #[builder(default = 5.0)]
    pub average_size: f64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Upper bound of [`DrawConfig::average_size`] in effect. Larger values, infinity included, are clamped to it.
pub const MAX_AVERAGE_SIZE: f64 = 1e6;

/// Probability of drawing one more optional element, for `average` optional elements on average.
///
/// NaN and negative averages mean no optional elements.
fn continue_probability(average: f64) -> f64 {
    if average.is_nan() {
        return 0.0;
    }
    let average = average.clamp(0.0, MAX_AVERAGE_SIZE);
    average / (average + 1.0)
}

/// Failing to draw a value. This is not a problem of the strategy itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("strategy cannot produce any value")]
    Unsatisfiable,
    #[error("filter rejected every attempt")]
    FilterExhausted,
    #[error("no example found in {attempts} attempts")]
    NoExampleFound { attempts: usize },
}

/// Draws strings from [`Strategy`]s.
///
/// ## Example
/// ```
/// use regex_strategy::{from_regex, strategy::Drawer};
///
/// let strategy = from_regex(r"[a-f0-9]{8}").unwrap();
/// let mut drawer = Drawer::seeded(42);
/// let s = drawer.find(&strategy, |s| s.starts_with(|c: char| c.is_ascii_digit())).unwrap();
/// assert!(s[..1].parse::<u8>().is_ok());
/// ```
#[derive(Debug)]
pub struct Drawer<R = StdRng> {
    rng: R,
    config: DrawConfig,
    shared: HashMap<String, String>,
}

impl Drawer<StdRng> {
    /// A reproducible drawer.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Drawer<R> {
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, DrawConfig::default())
    }

    pub fn with_config(rng: R, config: DrawConfig) -> Self {
        Self {
            rng,
            config,
            shared: HashMap::new(),
        }
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Draw one value.
    pub fn draw(&mut self, strategy: &Strategy) -> Result<String, DrawError> {
        self.shared.clear();
        let mut out = String::new();
        self.draw_into(strategy, &mut out)?;
        Ok(out)
    }

    /// Independent draws.
    pub fn samples<'a>(
        &'a mut self,
        strategy: &'a Strategy,
    ) -> impl Iterator<Item = Result<String, DrawError>> + 'a {
        std::iter::repeat_with(move || self.draw(strategy))
    }

    /// Draw until a value satisfies `condition`, for at most [`DrawConfig::max_examples`] draws.
    pub fn find(
        &mut self,
        strategy: &Strategy,
        mut condition: impl FnMut(&str) -> bool,
    ) -> Result<String, DrawError> {
        for _ in 0..self.config.max_examples {
            match self.draw(strategy) {
                Ok(s) if condition(&s) => return Ok(s),
                Ok(_) | Err(DrawError::FilterExhausted) => {}
                Err(e) => return Err(e),
            }
        }
        Err(DrawError::NoExampleFound {
            attempts: self.config.max_examples,
        })
    }

    fn draw_into(&mut self, strategy: &Strategy, out: &mut String) -> Result<(), DrawError> {
        match strategy {
            Strategy::Just(s) => out.push_str(s),
            Strategy::SampledFrom(values) => {
                let s = values
                    .choose(&mut self.rng)
                    .ok_or(DrawError::Unsatisfiable)?;
                out.push_str(s);
            }
            Strategy::Characters(chars) => out.push(self.draw_char(chars)?),
            Strategy::OneOf(strategies) => {
                let strategy = strategies
                    .choose(&mut self.rng)
                    .ok_or(DrawError::Unsatisfiable)?;
                self.draw_into(strategy, out)?;
            }
            Strategy::Concat(strategies) => {
                for strategy in strategies {
                    self.draw_into(strategy, out)?;
                }
            }
            Strategy::Repeat { element, min, max } => {
                let mut n = 0;
                while n < *min {
                    self.draw_into(element, out)?;
                    n += 1;
                }
                if element.is_empty() {
                    return Ok(());
                }
                let more = continue_probability(self.config.average_size);
                while max.map_or(true, |max| n < max) && self.rng.gen_bool(more) {
                    self.draw_into(element, out)?;
                    n += 1;
                }
            }
            Strategy::Shared { key, base } => match self.shared.get(key) {
                Some(s) => out.push_str(s),
                None => {
                    let mut s = String::new();
                    self.draw_into(base, &mut s)?;
                    out.push_str(&s);
                    self.shared.insert(key.clone(), s);
                }
            },
            Strategy::Filter { base, predicate } => {
                for _ in 0..self.config.filter_attempts {
                    // Shared values of a rejected attempt must not leak into the next one
                    let snapshot = self.shared.clone();
                    let mut s = String::new();
                    match self.draw_into(base, &mut s) {
                        Ok(()) if predicate.test(&s) => {
                            out.push_str(&s);
                            return Ok(());
                        }
                        Ok(()) | Err(DrawError::FilterExhausted) => {}
                        Err(e) => return Err(e),
                    }
                    self.shared = snapshot;
                }
                return Err(DrawError::FilterExhausted);
            }
        }
        Ok(())
    }

    /// Uniform over the set, but half of the time limited to U+0000..=U+00FF if the set has any of them.
    fn draw_char(&mut self, chars: &Characters) -> Result<char, DrawError> {
        let len = chars.len();
        if len == 0 {
            return Err(DrawError::Unsatisfiable);
        }
        let low = chars.len_up_to('\u{FF}');
        let n = if low != 0 && self.rng.gen_bool(0.5) {
            self.rng.gen_range(0..low)
        } else {
            self.rng.gen_range(0..len)
        };
        chars.nth(n).ok_or(DrawError::Unsatisfiable)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn just() {
        let mut drawer = Drawer::seeded(0);
        assert_eq!(drawer.draw(&Strategy::just("abc")).unwrap(), "abc");
    }

    #[test]
    fn sampled_from() {
        let mut drawer = Drawer::seeded(0);
        let strategy = Strategy::sampled_from(["a", "b", "c"]);
        let seen: BTreeSet<_> = drawer
            .samples(&strategy)
            .take(100)
            .map(Result::unwrap)
            .collect();
        assert_eq!(seen, BTreeSet::from(["a", "b", "c"].map(String::from)));

        let empty = Strategy::sampled_from(Vec::<String>::new());
        assert_eq!(drawer.draw(&empty), Err(DrawError::Unsatisfiable));
    }

    #[test]
    fn repeat() {
        let mut drawer = Drawer::seeded(1);
        let strategy = Strategy::repeat(Strategy::just("a"), 2, Some(4));
        let lens: BTreeSet<_> = drawer
            .samples(&strategy)
            .take(200)
            .map(|s| s.unwrap().len())
            .collect();
        assert_eq!(lens, BTreeSet::from([2, 3, 4]));

        let strategy = Strategy::repeat(Strategy::just("a"), 0, None);
        let max = drawer
            .samples(&strategy)
            .take(200)
            .map(|s| s.unwrap().len())
            .max();
        dbg!(max);
        assert!(max > Some(5));

        let config = DrawConfig::builder().average_size(0.0).build();
        let mut drawer = Drawer::with_config(StdRng::seed_from_u64(0), config);
        assert_eq!(drawer.draw(&strategy).unwrap(), "");
    }

    #[test]
    fn repeat_empty_element() {
        let mut drawer = Drawer::seeded(6);
        let empty = Strategy::sampled_from(Vec::<String>::new());
        let strategy = Strategy::repeat(empty.clone(), 0, None);
        for s in drawer.samples(&strategy).take(100) {
            assert_eq!(s.unwrap(), "");
        }

        let strategy = Strategy::concat([
            Strategy::just("a"),
            Strategy::repeat(empty.clone(), 0, Some(3)),
            Strategy::just("b"),
        ]);
        for s in drawer.samples(&strategy).take(100) {
            assert_eq!(s.unwrap(), "ab");
        }

        let strategy = Strategy::repeat(empty, 1, None);
        assert_eq!(drawer.draw(&strategy), Err(DrawError::Unsatisfiable));
    }

    #[test]
    fn average_size_out_of_range() {
        assert_eq!(continue_probability(f64::NAN), 0.0);
        assert_eq!(continue_probability(-1.0), 0.0);
        assert!(continue_probability(f64::INFINITY) < 1.0);

        let strategy = Strategy::repeat(Strategy::just("a"), 0, Some(3));
        for average_size in [f64::INFINITY, f64::MAX] {
            let config = DrawConfig::builder().average_size(average_size).build();
            let mut drawer = Drawer::with_config(StdRng::seed_from_u64(7), config);
            for s in drawer.samples(&strategy).take(50) {
                assert!(s.unwrap().len() <= 3);
            }
        }

        let config = DrawConfig::builder().average_size(f64::NAN).build();
        let mut drawer = Drawer::with_config(StdRng::seed_from_u64(8), config);
        for s in drawer.samples(&strategy).take(50) {
            assert_eq!(s.unwrap(), "");
        }
    }

    #[test]
    fn shared() {
        let mut drawer = Drawer::seeded(2);
        let digit = Strategy::sampled_from(["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]);
        let strategy = Strategy::concat([
            digit.clone().shared("1"),
            Strategy::just("-"),
            digit.shared("1"),
        ]);
        let mut seen = BTreeSet::new();
        for s in drawer.samples(&strategy).take(50) {
            let s = s.unwrap();
            let (a, b) = s.split_once('-').unwrap();
            assert_eq!(a, b);
            seen.insert(s);
        }
        // keys are reset between draws
        assert!(seen.len() > 1);
    }

    #[test]
    fn filter() {
        let mut drawer = Drawer::seeded(3);
        let strategy = Strategy::sampled_from(["a", "b"]).filter(|s| s == "a");
        for s in drawer.samples(&strategy).take(20) {
            match s {
                Ok(s) => assert_eq!(s, "a"),
                Err(e) => assert_eq!(e, DrawError::FilterExhausted),
            }
        }

        let never = Strategy::just("a").filter(|_| false);
        assert_eq!(drawer.draw(&never), Err(DrawError::FilterExhausted));
        assert_eq!(
            drawer.find(&never, |_| true),
            Err(DrawError::NoExampleFound { attempts: 100 })
        );
    }

    #[test]
    fn filter_rolls_back_shared() {
        let mut drawer = Drawer::seeded(4);
        let x = Strategy::sampled_from(["x", "y"]).shared("x");
        let strategy = Strategy::concat([x.clone().filter(|s| s == "y"), x]);
        for s in drawer.samples(&strategy).take(30) {
            if let Ok(s) = s {
                assert_eq!(s, "yy");
            }
        }
    }

    #[test]
    fn characters() {
        let mut drawer = Drawer::seeded(5);
        let strategy = Strategy::characters().call();
        let mut low = 0;
        for s in drawer.samples(&strategy).take(1000) {
            let s = s.unwrap();
            assert_eq!(s.chars().count(), 1);
            if s.chars().all(|c| c <= '\u{FF}') {
                low += 1;
            }
        }
        println!("low: {low}");
        assert!(low > 300);
        assert!(low < 1000);

        let empty = Strategy::characters().max_codepoint(127).blacklist_categories(
            regex_strategy_unicode::GeneralCategory::VARIANTS.into(),
        );
        assert_eq!(
            drawer.draw(&empty.call()),
            Err(DrawError::Unsatisfiable)
        );
    }

    #[test]
    fn find() {
        let mut drawer = Drawer::seeded(6);
        let strategy = Strategy::repeat(Strategy::sampled_from(["a", "b"]), 1, Some(3));
        let s = drawer.find(&strategy, |s| s.contains('b')).unwrap();
        assert!(s.contains('b'));
        assert_eq!(
            drawer.find(&strategy, |s| s.len() > 3),
            Err(DrawError::NoExampleFound { attempts: 100 })
        );
        assert_eq!(
            drawer.find(&Strategy::one_of(Vec::new()), |_| true),
            Err(DrawError::Unsatisfiable)
        );
    }
}
