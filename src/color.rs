use super::error::EffectError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    // Per channel blend, truncated toward zero. t == 0 returns self exactly.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Rgba::new(c[0], c[1], c[2], c[3])
    }
}

/// Color keyframes anchored at fractions of a particle's lifetime.
///
/// A gradient is immutable once built and shared by every particle of a
/// type; each particle walks it with its own [`GradientCursor`].
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGradient {
    colors: Vec<Rgba>,
    stops: Vec<f32>,
}

impl ColorGradient {
    pub fn new(colors: Vec<Rgba>, stops: Vec<f32>) -> Result<Self, EffectError> {
        if colors.len() != stops.len() {
            return Err(EffectError::ColorStopMismatch {
                colors: colors.len(),
                stops: stops.len(),
            });
        }
        if let Some(&first) = stops.first() {
            if first != 0.0 {
                return Err(EffectError::FirstStopNotZero(first));
            }
        }
        let mut previous = 0.0;
        for (index, &value) in stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) || value < previous {
                return Err(EffectError::InvalidColorStop { index, value });
            }
            previous = value;
        }
        Ok(ColorGradient { colors, stops })
    }

    pub fn solid(color: Rgba) -> Self {
        ColorGradient {
            colors: vec![color],
            stops: vec![0.0],
        }
    }

    pub fn empty() -> Self {
        ColorGradient {
            colors: Vec::new(),
            stops: Vec::new(),
        }
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn stops(&self) -> &[f32] {
        &self.stops
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    // Color a freshly spawned particle starts with.
    pub fn initial_color(&self) -> Rgba {
        self.colors.first().copied().unwrap_or(Rgba::WHITE)
    }
}

/// Forward-only position inside a [`ColorGradient`]. Segments are consumed
/// once `life` reaches their right stop and never revisited, even if a later
/// sample asks for an earlier `life`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GradientCursor {
    segment: usize,
}

impl GradientCursor {
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Color at lifetime fraction `life`, or `None` when the gradient has no
    /// keys.
    pub fn sample(&mut self, gradient: &ColorGradient, life: f32) -> Option<Rgba> {
        let colors = &gradient.colors;
        let stops = &gradient.stops;
        if colors.is_empty() {
            return None;
        }
        while self.segment + 1 < stops.len() && life >= stops[self.segment + 1] {
            self.segment += 1;
        }
        let left = colors[self.segment];
        if self.segment + 1 >= colors.len() {
            return Some(left);
        }
        let span = stops[self.segment + 1] - stops[self.segment];
        if span <= 0.0 {
            return Some(left);
        }
        let t = (life - stops[self.segment]) / span;
        Some(left.lerp(colors[self.segment + 1], t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);
    const BLUE: Rgba = Rgba::new(0, 0, 255, 0);
    const GREEN: Rgba = Rgba::new(0, 200, 0, 100);

    fn three_keys() -> ColorGradient {
        ColorGradient::new(vec![RED, BLUE, GREEN], vec![0.0, 0.5, 1.0]).unwrap()
    }

    #[test]
    fn lerp_truncates() {
        let c = Rgba::new(0, 0, 0, 0).lerp(Rgba::new(255, 3, 1, 10), 0.5);
        assert_eq!(c, Rgba::new(127, 1, 0, 5));
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = ColorGradient::new(vec![RED, BLUE], vec![0.0]).unwrap_err();
        assert_eq!(err, EffectError::ColorStopMismatch { colors: 2, stops: 1 });
    }

    #[test]
    fn rejects_bad_stops() {
        assert_eq!(
            ColorGradient::new(vec![RED, BLUE], vec![0.2, 0.5]).unwrap_err(),
            EffectError::FirstStopNotZero(0.2)
        );
        assert_eq!(
            ColorGradient::new(vec![RED, BLUE, GREEN], vec![0.0, 0.6, 0.4]).unwrap_err(),
            EffectError::InvalidColorStop { index: 2, value: 0.4 }
        );
        assert!(ColorGradient::new(vec![RED, BLUE], vec![0.0, 1.5]).is_err());
    }

    #[test]
    fn exact_at_every_stop() {
        let gradient = three_keys();
        let mut cursor = GradientCursor::default();
        assert_eq!(cursor.sample(&gradient, 0.0), Some(RED));
        assert_eq!(cursor.sample(&gradient, 0.5), Some(BLUE));
        assert_eq!(cursor.sample(&gradient, 1.0), Some(GREEN));
    }

    #[test]
    fn blends_between_bounding_keys() {
        let gradient = three_keys();
        let mut cursor = GradientCursor::default();
        assert_eq!(cursor.sample(&gradient, 0.25), Some(RED.lerp(BLUE, 0.5)));
        assert_eq!(cursor.sample(&gradient, 0.75), Some(BLUE.lerp(GREEN, 0.5)));
        assert_eq!(cursor.segment(), 1);
    }

    #[test]
    fn never_moves_backwards() {
        let gradient = three_keys();
        let mut cursor = GradientCursor::default();
        cursor.sample(&gradient, 0.6);
        assert_eq!(cursor.segment(), 1);
        // An earlier life stays on the current segment instead of returning
        // to the first one.
        let c = cursor.sample(&gradient, 0.4).unwrap();
        assert_ne!(c, RED.lerp(BLUE, 0.8));
        assert_eq!(cursor.segment(), 1);
    }

    #[test]
    fn zero_width_segment_jumps() {
        let gradient = ColorGradient::new(vec![RED, BLUE, GREEN], vec![0.0, 0.5, 0.5]).unwrap();
        let mut cursor = GradientCursor::default();
        assert_eq!(cursor.sample(&gradient, 0.5), Some(GREEN));
    }

    #[test]
    fn single_and_empty() {
        let mut cursor = GradientCursor::default();
        assert_eq!(cursor.sample(&ColorGradient::solid(GREEN), 0.7), Some(GREEN));
        assert_eq!(cursor.sample(&ColorGradient::empty(), 0.7), None);
        assert_eq!(ColorGradient::empty().initial_color(), Rgba::WHITE);
    }
}
